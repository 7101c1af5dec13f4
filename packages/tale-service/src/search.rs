use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tale_domain::{
	query::{FilterInput, MAX_LIMIT, PageWindow, build_filter},
	ranking::{RelevanceQuery, rank_page},
	story::{StoryStatus, StoryType},
};
use tale_storage::{models::StoryCard, queries};

use crate::{Error, Result, TaleService, assets};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStoriesRequest {
	/// Free text matched against name and summary; also drives relevance ranking.
	pub query: Option<String>,
	pub status: Option<StoryStatus>,
	#[serde(rename = "type")]
	pub story_type: Option<StoryType>,
	pub tags: Option<Vec<String>>,
	#[serde(alias = "minWordsPerWeek")]
	pub min_words_per_week: Option<f64>,
	#[serde(alias = "maxWordsPerWeek")]
	pub max_words_per_week: Option<f64>,
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}
impl SearchStoriesRequest {
	/// Boundary checks applied by transports before calling the service. The service itself
	/// clamps instead of rejecting.
	pub fn validate(&self) -> Result<()> {
		if let Some(limit) = self.limit
			&& !(1..=i64::from(MAX_LIMIT)).contains(&limit)
		{
			return Err(Error::InvalidRequest {
				message: format!("limit must be in the range 1-{MAX_LIMIT}."),
			});
		}
		if let Some(offset) = self.offset
			&& offset < 0
		{
			return Err(Error::InvalidRequest {
				message: "offset must be zero or greater.".to_string(),
			});
		}

		for (label, bound) in [
			("min_words_per_week", self.min_words_per_week),
			("max_words_per_week", self.max_words_per_week),
		] {
			if let Some(bound) = bound
				&& !bound.is_finite()
			{
				return Err(Error::InvalidRequest {
					message: format!("{label} must be a finite number."),
				});
			}
		}

		Ok(())
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResult {
	pub story_id: Uuid,
	pub owner_id: i64,
	pub name: String,
	pub summary: Option<String>,
	pub status: StoryStatus,
	#[serde(rename = "type")]
	pub story_type: StoryType,
	pub words_per_week: Option<i32>,
	pub chapters: Option<i32>,
	pub pages: Option<i32>,
	pub cover_art_url: Option<String>,
	pub cover_color: String,
	pub cover_text_color: String,
	pub cover_font_family: String,
	pub sort_order: i32,
	pub tags: Vec<String>,
	#[serde(with = "crate::rfc3339")]
	pub created_at: time::OffsetDateTime,
	#[serde(with = "crate::rfc3339")]
	pub updated_at: time::OffsetDateTime,
	/// Relevance score, present only when a free-text query ranked the page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStoriesResponse {
	pub stories: Vec<StoryResult>,
	pub total_count: u64,
}

impl TaleService {
	/// Lists stories matching the request filters, one page at a time.
	///
	/// With a non-empty `query` the fetched page is re-ordered by relevance. Ranking only
	/// sees the page itself; stronger matches on later pages stay where storage put them.
	pub async fn search_stories(&self, req: SearchStoriesRequest) -> Result<SearchStoriesResponse> {
		let filter = build_filter(FilterInput {
			text: req.query.as_deref(),
			status: req.status,
			story_type: req.story_type,
			tags: req.tags.as_deref(),
			min_words_per_week: req.min_words_per_week,
			max_words_per_week: req.max_words_per_week,
		});
		let window = PageWindow::clamped(
			req.limit,
			req.offset,
			self.cfg.search.default_limit,
			self.cfg.search.max_limit,
		);
		let (cards, total_count) = tokio::try_join!(
			queries::find_story_cards(&self.db, &filter, window),
			queries::count_stories(&self.db, &filter),
		)?;
		let relevance = filter.free_text().and_then(RelevanceQuery::new);
		let fetched = cards.len();
		let scored: Vec<(StoryCard, Option<u32>)> = match relevance.as_ref() {
			Some(relevance) => rank_page(cards, relevance)
				.into_iter()
				.map(|scored| (scored.item, Some(scored.score)))
				.collect(),
			None => cards.into_iter().map(|card| (card, None)).collect(),
		};
		let stories = scored
			.into_iter()
			.map(|(card, score)| self.story_result(card, score))
			.collect::<Result<Vec<_>>>()?;

		tracing::debug!(
			unfiltered = filter.is_unfiltered(),
			ranked_by = relevance.as_ref().map(RelevanceQuery::needle),
			tag_count = filter.tags.as_ref().map(Vec::len).unwrap_or(0),
			limit = window.limit,
			offset = window.offset,
			fetched,
			total_count,
			"Story search completed."
		);

		Ok(SearchStoriesResponse { stories, total_count: u64::try_from(total_count).unwrap_or(0) })
	}

	fn story_result(&self, card: StoryCard, score: Option<u32>) -> Result<StoryResult> {
		let status = card.status.parse::<StoryStatus>().map_err(storage_value_error)?;
		let story_type = card.r#type.parse::<StoryType>().map_err(storage_value_error)?;
		let cover_art_url = assets::cover_art_url(
			&self.cfg.assets.public_base_url,
			card.owner_id,
			card.story_id,
			card.cover_art_path.as_deref(),
		);

		Ok(StoryResult {
			story_id: card.story_id,
			owner_id: card.owner_id,
			name: card.name,
			summary: card.summary,
			status,
			story_type,
			words_per_week: card.words_per_week,
			chapters: card.chapters,
			pages: card.pages,
			cover_art_url,
			cover_color: card.cover_color,
			cover_text_color: card.cover_text_color,
			cover_font_family: card.cover_font_family,
			sort_order: card.sort_order,
			tags: card.tags,
			created_at: card.created_at,
			updated_at: card.updated_at,
			score,
		})
	}
}

pub(crate) fn storage_value_error(err: tale_domain::story::UnknownVariant) -> Error {
	Error::Storage { message: err.to_string() }
}
