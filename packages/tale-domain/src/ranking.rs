//! Text relevance heuristic used to re-order a page of free-text search results.

use std::cmp::Ordering;

pub const EXACT_NAME_WEIGHT: u32 = 100;
pub const NAME_CONTAINS_WEIGHT: u32 = 50;
pub const SUMMARY_CONTAINS_WEIGHT: u32 = 10;
pub const NAME_WORD_WEIGHT: u32 = 25;

/// Which signals fired for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relevance {
	pub exact_name: bool,
	pub name_contains: bool,
	pub summary_contains: bool,
	pub name_word: bool,
}
impl Relevance {
	pub fn score(&self) -> u32 {
		let mut score = 0;

		if self.exact_name {
			score += EXACT_NAME_WEIGHT;
		}
		if self.name_contains {
			score += NAME_CONTAINS_WEIGHT;
		}
		if self.summary_contains {
			score += SUMMARY_CONTAINS_WEIGHT;
		}
		if self.name_word {
			score += NAME_WORD_WEIGHT;
		}

		score
	}
}

/// A lower-cased free-text query, ready to score candidates against.
#[derive(Debug, Clone)]
pub struct RelevanceQuery {
	needle: String,
}
impl RelevanceQuery {
	/// Returns `None` for the empty string, which never triggers ranking.
	pub fn new(raw: &str) -> Option<Self> {
		if raw.is_empty() {
			return None;
		}

		Some(Self { needle: raw.to_lowercase() })
	}

	pub fn needle(&self) -> &str {
		&self.needle
	}

	pub fn evaluate(&self, name: &str, summary: Option<&str>) -> Relevance {
		let name = name.to_lowercase();
		let summary = summary.unwrap_or_default().to_lowercase();
		let needle = self.needle.as_str();

		Relevance {
			exact_name: name == needle,
			name_contains: name.contains(needle),
			summary_contains: summary.contains(needle),
			name_word: name.split_whitespace().any(|word| word == needle),
		}
	}

	pub fn score(&self, name: &str, summary: Option<&str>) -> u32 {
		self.evaluate(name, summary).score()
	}
}

/// Convenience wrapper around [`RelevanceQuery::score`]; the empty query scores zero.
pub fn relevance_score(name: &str, summary: Option<&str>, query: &str) -> u32 {
	RelevanceQuery::new(query).map(|query| query.score(name, summary)).unwrap_or(0)
}

/// Anything that can be placed in a relevance-ranked page.
pub trait Rankable {
	/// Secondary ordering for equal scores, ascending.
	type TieBreak: Ord;

	fn name(&self) -> &str;

	fn summary(&self) -> Option<&str>;

	fn tie_break(&self) -> Self::TieBreak;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
	pub item: T,
	pub score: u32,
}

/// Scores every item and orders the page by descending score, breaking ties with
/// [`Rankable::tie_break`].
///
/// Only the items passed in are reordered. Callers that paginate before ranking will never
/// promote a strong match from a later page.
pub fn rank_page<T>(items: Vec<T>, query: &RelevanceQuery) -> Vec<Scored<T>>
where
	T: Rankable,
{
	let mut scored: Vec<(Scored<T>, T::TieBreak)> = items
		.into_iter()
		.map(|item| {
			let score = query.score(item.name(), item.summary());
			let tie_break = item.tie_break();

			(Scored { item, score }, tie_break)
		})
		.collect();

	scored.sort_by(|(a, a_key), (b, b_key)| cmp_scored(a.score, a_key, b.score, b_key));

	scored.into_iter().map(|(scored, _)| scored).collect()
}

fn cmp_scored<K>(a_score: u32, a_key: &K, b_score: u32, b_key: &K) -> Ordering
where
	K: Ord,
{
	b_score.cmp(&a_score).then_with(|| a_key.cmp(b_key))
}
