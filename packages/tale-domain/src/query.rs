//! Normalization of caller-supplied story search criteria.
//!
//! Callers hand over loosely-shaped input (optional fields, possibly empty collections,
//! zero rate bounds). Everything downstream works with [`StoryFilter`] and [`PageWindow`],
//! where "absent" has exactly one representation.

use crate::story::{StoryStatus, StoryType};

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 100;

/// Storage-facing filter. Every field is optional and an absent field never narrows the
/// result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryFilter {
	/// Case-insensitive substring matched against name or summary.
	pub text: Option<String>,
	pub status: Option<StoryStatus>,
	pub story_type: Option<StoryType>,
	/// A story matches when at least one of its tags is listed. Never empty when present.
	pub tags: Option<Vec<String>>,
	pub min_words_per_week: Option<f64>,
	pub max_words_per_week: Option<f64>,
}
impl StoryFilter {
	pub fn free_text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	pub fn is_unfiltered(&self) -> bool {
		self == &Self::default()
	}
}

/// Raw criteria as they arrive from a caller, before normalization.
#[derive(Debug, Clone, Default)]
pub struct FilterInput<'a> {
	pub text: Option<&'a str>,
	pub status: Option<StoryStatus>,
	pub story_type: Option<StoryType>,
	pub tags: Option<&'a [String]>,
	pub min_words_per_week: Option<f64>,
	pub max_words_per_week: Option<f64>,
}

pub fn build_filter(input: FilterInput<'_>) -> StoryFilter {
	StoryFilter {
		// Whitespace is significant: only the empty string means "no text".
		text: input.text.filter(|text| !text.is_empty()).map(str::to_string),
		status: input.status,
		story_type: input.story_type,
		tags: input.tags.filter(|tags| !tags.is_empty()).map(<[String]>::to_vec),
		min_words_per_week: input.min_words_per_week.filter(|bound| rate_bound_is_set(*bound)),
		max_words_per_week: input.max_words_per_week.filter(|bound| rate_bound_is_set(*bound)),
	}
}

/// A zero bound is treated as no bound at all.
fn rate_bound_is_set(bound: f64) -> bool {
	bound != 0.0 && bound.is_finite()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
	pub limit: u32,
	pub offset: u64,
}
impl PageWindow {
	/// Clamps `limit` into `1..=max_limit` (falling back to `default_limit`) and negative
	/// offsets to zero. `max_limit` itself is capped at [`MAX_LIMIT`].
	pub fn clamped(
		limit: Option<i64>,
		offset: Option<i64>,
		default_limit: u32,
		max_limit: u32,
	) -> Self {
		let max_limit = max_limit.clamp(1, MAX_LIMIT);
		let limit = match limit {
			Some(limit) => limit.clamp(1, i64::from(max_limit)) as u32,
			None => default_limit.clamp(1, max_limit),
		};
		let offset = offset.unwrap_or(0).max(0) as u64;

		Self { limit, offset }
	}
}
impl Default for PageWindow {
	fn default() -> Self {
		Self { limit: DEFAULT_LIMIT, offset: 0 }
	}
}
