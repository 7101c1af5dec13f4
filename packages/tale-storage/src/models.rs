use time::OffsetDateTime;
use uuid::Uuid;

use tale_domain::ranking::Rankable;

/// A story as shown on a search result card, with its tag names in display order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoryCard {
	pub story_id: Uuid,
	pub owner_id: i64,
	pub name: String,
	pub summary: Option<String>,
	pub status: String,
	pub r#type: String,
	pub words_per_week: Option<i32>,
	pub chapters: Option<i32>,
	pub pages: Option<i32>,
	pub cover_art_path: Option<String>,
	pub cover_color: String,
	pub cover_text_color: String,
	pub cover_font_family: String,
	pub sort_order: i32,
	pub tags: Vec<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl Rankable for StoryCard {
	type TieBreak = (i32, Uuid);

	fn name(&self) -> &str {
		&self.name
	}

	fn summary(&self) -> Option<&str> {
		self.summary.as_deref()
	}

	fn tie_break(&self) -> Self::TieBreak {
		(self.sort_order, self.story_id)
	}
}

/// A published story joined with the public part of its owner.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PublicStoryRow {
	pub story_id: Uuid,
	pub name: String,
	pub summary: Option<String>,
	pub owner_id: i64,
	pub owner_name: String,
	pub status: String,
	pub r#type: String,
	pub cover_color: String,
	pub cover_text_color: String,
	pub cover_font_family: String,
	pub pages: Option<i32>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewStory {
	pub story_id: Uuid,
	pub owner_id: i64,
	pub name: String,
	pub summary: Option<String>,
	pub published: bool,
	pub status: String,
	pub r#type: String,
	pub words_per_week: Option<i32>,
	pub chapters: Option<i32>,
	pub pages: Option<i32>,
	pub cover_art_path: Option<String>,
	pub sort_order: i32,
	pub updated_at: OffsetDateTime,
}
