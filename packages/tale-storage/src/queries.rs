use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use tale_domain::{
	query::{PageWindow, StoryFilter},
	story::{BrowseSort, StoryStatus, StoryType},
};

use crate::{
	Error, Result,
	db::Db,
	models::{NewStory, PublicStoryRow, StoryCard},
};

const STORY_CARD_COLUMNS: &str = "\
SELECT
	s.story_id,
	s.owner_id,
	s.name,
	s.summary,
	s.status,
	s.type,
	s.words_per_week,
	s.chapters,
	s.pages,
	s.cover_art_path,
	s.cover_color,
	s.cover_text_color,
	s.cover_font_family,
	s.sort_order,
	ARRAY(
		SELECT t.name
		FROM story_tags st
		JOIN tags t ON t.tag_id = st.tag_id
		WHERE st.story_id = s.story_id
		ORDER BY st.position, t.name
	) AS tags,
	s.created_at,
	s.updated_at
FROM stories s";

const PUBLIC_STORY_COLUMNS: &str = "\
SELECT
	s.story_id,
	s.name,
	s.summary,
	s.owner_id,
	u.name AS owner_name,
	s.status,
	s.type,
	s.cover_color,
	s.cover_text_color,
	s.cover_font_family,
	s.pages,
	s.created_at,
	s.updated_at
FROM stories s
JOIN users u ON u.user_id = s.owner_id";

/// Criteria for the public catalogue listing. Only published stories are ever returned.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
	/// Case-insensitive substring matched against name or summary.
	pub search: Option<String>,
	pub status: Option<StoryStatus>,
	pub story_type: Option<StoryType>,
}

/// Fetches one page of story cards matching `filter`, ordered by `sort_order` then id.
pub async fn find_story_cards(
	db: &Db,
	filter: &StoryFilter,
	window: PageWindow,
) -> Result<Vec<StoryCard>> {
	let mut builder = QueryBuilder::<Postgres>::new(STORY_CARD_COLUMNS);

	push_story_filter(&mut builder, filter);

	builder.push(" ORDER BY s.sort_order ASC, s.story_id ASC LIMIT ");
	builder.push_bind(i64::from(window.limit));
	builder.push(" OFFSET ");
	builder.push_bind(offset_to_i64(window.offset)?);

	let cards = builder.build_query_as::<StoryCard>().fetch_all(&db.pool).await?;

	Ok(cards)
}

pub async fn count_stories(db: &Db, filter: &StoryFilter) -> Result<i64> {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM stories s");

	push_story_filter(&mut builder, filter);

	let count = builder.build_query_scalar::<i64>().fetch_one(&db.pool).await?;

	Ok(count)
}

pub async fn browse_published(
	db: &Db,
	filter: &BrowseFilter,
	sort: BrowseSort,
	window: PageWindow,
) -> Result<Vec<PublicStoryRow>> {
	let mut builder = QueryBuilder::<Postgres>::new(PUBLIC_STORY_COLUMNS);

	push_browse_filter(&mut builder, filter);

	builder.push(match sort {
		BrowseSort::Recent => " ORDER BY s.updated_at DESC, s.story_id ASC",
		BrowseSort::Popular => " ORDER BY s.pages DESC NULLS LAST, s.updated_at DESC, s.story_id ASC",
		BrowseSort::Title => " ORDER BY s.name ASC, s.story_id ASC",
	});
	builder.push(" LIMIT ");
	builder.push_bind(i64::from(window.limit));
	builder.push(" OFFSET ");
	builder.push_bind(offset_to_i64(window.offset)?);

	let rows = builder.build_query_as::<PublicStoryRow>().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn count_published(db: &Db, filter: &BrowseFilter) -> Result<i64> {
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT count(*) FROM stories s JOIN users u ON u.user_id = s.owner_id",
	);

	push_browse_filter(&mut builder, filter);

	let count = builder.build_query_scalar::<i64>().fetch_one(&db.pool).await?;

	Ok(count)
}

pub async fn get_published_story(db: &Db, story_id: Uuid) -> Result<PublicStoryRow> {
	let mut builder = QueryBuilder::<Postgres>::new(PUBLIC_STORY_COLUMNS);

	builder.push(" WHERE s.published AND s.story_id = ");
	builder.push_bind(story_id);

	builder
		.build_query_as::<PublicStoryRow>()
		.fetch_optional(&db.pool)
		.await?
		.ok_or_else(|| Error::NotFound(format!("Story {story_id} was not found.")))
}

pub async fn insert_user(db: &Db, name: &str) -> Result<i64> {
	if name.trim().is_empty() {
		return Err(Error::InvalidArgument("User name must be non-empty.".to_string()));
	}

	let user_id = sqlx::query_scalar::<_, i64>(
		"\
INSERT INTO users (name)
VALUES ($1)
RETURNING user_id",
	)
	.bind(name)
	.fetch_one(&db.pool)
	.await?;

	Ok(user_id)
}

pub async fn insert_story(db: &Db, story: &NewStory) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO stories (
	story_id,
	owner_id,
	name,
	summary,
	published,
	status,
	type,
	words_per_week,
	chapters,
	pages,
	cover_art_path,
	sort_order,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
	)
	.bind(story.story_id)
	.bind(story.owner_id)
	.bind(story.name.as_str())
	.bind(story.summary.as_deref())
	.bind(story.published)
	.bind(story.status.as_str())
	.bind(story.r#type.as_str())
	.bind(story.words_per_week)
	.bind(story.chapters)
	.bind(story.pages)
	.bind(story.cover_art_path.as_deref())
	.bind(story.sort_order)
	.bind(story.updated_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Links `tags` to a story in the given order, creating tags that do not exist yet.
pub async fn tag_story(db: &Db, story_id: Uuid, tags: &[String]) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	for (position, name) in tags.iter().enumerate() {
		let name = name.trim();

		if name.is_empty() {
			return Err(Error::InvalidArgument("Tag names must be non-empty.".to_string()));
		}

		let tag_id = sqlx::query_scalar::<_, Uuid>(
			"\
INSERT INTO tags (tag_id, name)
VALUES ($1, $2)
ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
RETURNING tag_id",
		)
		.bind(Uuid::now_v7())
		.bind(name)
		.fetch_one(&mut *tx)
		.await?;
		let position = i32::try_from(position)
			.map_err(|_| Error::InvalidArgument("Too many tags for one story.".to_string()))?;

		sqlx::query(
			"\
INSERT INTO story_tags (story_id, tag_id, position)
VALUES ($1, $2, $3)
ON CONFLICT (story_id, tag_id) DO UPDATE SET position = EXCLUDED.position",
		)
		.bind(story_id)
		.bind(tag_id)
		.bind(position)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}

fn push_story_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &StoryFilter) {
	builder.push(" WHERE TRUE");

	if let Some(status) = filter.status {
		builder.push(" AND s.status = ");
		builder.push_bind(status.as_str());
	}
	if let Some(story_type) = filter.story_type {
		builder.push(" AND s.type = ");
		builder.push_bind(story_type.as_str());
	}
	if let Some(min) = filter.min_words_per_week {
		builder.push(" AND s.words_per_week >= ");
		builder.push_bind(min);
	}
	if let Some(max) = filter.max_words_per_week {
		builder.push(" AND s.words_per_week <= ");
		builder.push_bind(max);
	}
	if let Some(tags) = filter.tags.as_ref() {
		builder.push(
			" AND EXISTS (SELECT 1 FROM story_tags st JOIN tags t ON t.tag_id = st.tag_id \
			 WHERE st.story_id = s.story_id AND t.name = ANY(",
		);
		builder.push_bind(tags.clone());
		builder.push("))");
	}
	// strpos treats LIKE wildcards literally; lower() on both sides ignores case.
	if let Some(text) = filter.free_text() {
		builder.push(" AND (strpos(lower(s.name), lower(");
		builder.push_bind(text.to_string());
		builder.push(")) > 0 OR strpos(lower(COALESCE(s.summary, '')), lower(");
		builder.push_bind(text.to_string());
		builder.push(")) > 0)");
	}
}

fn push_browse_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &BrowseFilter) {
	builder.push(" WHERE s.published");

	if let Some(search) = filter.search.as_deref().filter(|search| !search.is_empty()) {
		let pattern = format!("%{}%", escape_like(search));

		builder.push(" AND (s.name ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR s.summary ILIKE ");
		builder.push_bind(pattern);
		builder.push(")");
	}
	if let Some(status) = filter.status {
		builder.push(" AND s.status = ");
		builder.push_bind(status.as_str());
	}
	if let Some(story_type) = filter.story_type {
		builder.push(" AND s.type = ");
		builder.push_bind(story_type.as_str());
	}
}

/// Escapes `LIKE` metacharacters using the default backslash escape.
pub fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

fn offset_to_i64(offset: u64) -> Result<i64> {
	i64::try_from(offset)
		.map_err(|_| Error::InvalidArgument("Offset is out of range.".to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn like_metacharacters_are_escaped() {
		assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
		assert_eq!(escape_like("dragon"), "dragon");
	}

	#[test]
	fn unfiltered_story_query_has_no_predicates() {
		let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM stories s");

		push_story_filter(&mut builder, &StoryFilter::default());

		assert_eq!(builder.sql(), "SELECT count(*) FROM stories s WHERE TRUE");
	}

	#[test]
	fn story_filter_binds_every_present_field() {
		let filter = StoryFilter {
			text: Some("dragon".to_string()),
			status: Some(StoryStatus::Completed),
			story_type: Some(StoryType::Original),
			tags: Some(vec!["fantasy".to_string()]),
			min_words_per_week: Some(1_000.0),
			max_words_per_week: Some(9_000.0),
		};
		let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM stories s");

		push_story_filter(&mut builder, &filter);

		let sql = builder.sql();

		assert!(sql.contains("s.status = $1"));
		assert!(sql.contains("s.type = $2"));
		assert!(sql.contains("s.words_per_week >= $3"));
		assert!(sql.contains("s.words_per_week <= $4"));
		assert!(sql.contains("t.name = ANY($5)"));
		assert!(sql.contains("strpos(lower(s.name), lower($6)) > 0"));
		assert!(sql.contains("strpos(lower(COALESCE(s.summary, '')), lower($7)) > 0"));
	}

	#[test]
	fn browse_filter_always_requires_published() {
		let mut builder = QueryBuilder::<Postgres>::new(PUBLIC_STORY_COLUMNS);

		push_browse_filter(
			&mut builder,
			&BrowseFilter { search: Some(String::new()), ..Default::default() },
		);

		assert!(builder.sql().ends_with(" WHERE s.published"));
	}
}
