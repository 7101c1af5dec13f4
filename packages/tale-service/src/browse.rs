use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tale_domain::{
	query::{MAX_LIMIT, PageWindow},
	story::{BrowseSort, StoryStatus, StoryType},
};
use tale_storage::{
	models::PublicStoryRow,
	queries::{self, BrowseFilter},
};

use crate::{Error, Result, TaleService, search::storage_value_error};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseRequest {
	pub page: Option<u32>,
	pub page_size: Option<u32>,
	pub search: Option<String>,
	pub status: Option<StoryStatus>,
	#[serde(rename = "type")]
	pub story_type: Option<StoryType>,
	pub sort_by: Option<BrowseSort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryOwner {
	pub id: i64,
	pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicStory {
	pub story_id: Uuid,
	pub name: String,
	pub summary: Option<String>,
	pub owner: StoryOwner,
	pub status: StoryStatus,
	#[serde(rename = "type")]
	pub story_type: StoryType,
	pub cover_color: String,
	pub cover_text_color: String,
	pub cover_font_family: String,
	pub pages: Option<i32>,
	#[serde(with = "crate::rfc3339")]
	pub created_at: time::OffsetDateTime,
	#[serde(with = "crate::rfc3339")]
	pub updated_at: time::OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub page: u32,
	pub page_size: u32,
	pub total: u64,
	pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
	pub stories: Vec<PublicStory>,
	pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
	pub story: PublicStory,
}

impl TaleService {
	/// Pages through the published catalogue.
	pub async fn browse_stories(&self, req: BrowseRequest) -> Result<BrowseResponse> {
		let page = req.page.unwrap_or(1);
		let page_size = req.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

		if page == 0 {
			return Err(Error::InvalidRequest { message: "page must be 1 or greater.".to_string() });
		}
		if !(1..=MAX_LIMIT).contains(&page_size) {
			return Err(Error::InvalidRequest {
				message: format!("page_size must be in the range 1-{MAX_LIMIT}."),
			});
		}

		let filter = BrowseFilter {
			search: req.search.filter(|search| !search.is_empty()),
			status: req.status,
			story_type: req.story_type,
		};
		let sort = req.sort_by.unwrap_or_default();
		let window =
			PageWindow { limit: page_size, offset: u64::from(page - 1) * u64::from(page_size) };
		let (rows, total) = tokio::try_join!(
			queries::browse_published(&self.db, &filter, sort, window),
			queries::count_published(&self.db, &filter),
		)?;
		let total = u64::try_from(total).unwrap_or(0);
		let stories = rows.into_iter().map(public_story).collect::<Result<Vec<_>>>()?;

		tracing::debug!(page, page_size, ?sort, total, "Catalogue page served.");

		Ok(BrowseResponse {
			stories,
			pagination: Pagination {
				page,
				page_size,
				total,
				total_pages: total.div_ceil(u64::from(page_size)),
			},
		})
	}

	/// Fetches one published story. Unpublished stories are reported as missing.
	pub async fn get_story(&self, story_id: Uuid) -> Result<StoryResponse> {
		let row = queries::get_published_story(&self.db, story_id).await?;

		Ok(StoryResponse { story: public_story(row)? })
	}
}

fn public_story(row: PublicStoryRow) -> Result<PublicStory> {
	Ok(PublicStory {
		story_id: row.story_id,
		name: row.name,
		summary: row.summary,
		owner: StoryOwner { id: row.owner_id, name: row.owner_name },
		status: row.status.parse().map_err(storage_value_error)?,
		story_type: row.r#type.parse().map_err(storage_value_error)?,
		cover_color: row.cover_color,
		cover_text_color: row.cover_text_color,
		cover_font_family: row.cover_font_family,
		pages: row.pages,
		created_at: row.created_at,
		updated_at: row.updated_at,
	})
}
