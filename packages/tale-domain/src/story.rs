use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} value {value:?}.")]
pub struct UnknownVariant {
	pub kind: &'static str,
	pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
	Completed,
	Ongoing,
	Hiatus,
}
impl StoryStatus {
	pub const ALL: [Self; 3] = [Self::Completed, Self::Ongoing, Self::Hiatus];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Completed => "COMPLETED",
			Self::Ongoing => "ONGOING",
			Self::Hiatus => "HIATUS",
		}
	}
}
impl fmt::Display for StoryStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for StoryStatus {
	type Err = UnknownVariant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|status| status.as_str() == s)
			.ok_or_else(|| UnknownVariant { kind: "story status", value: s.to_string() })
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryType {
	Fanfiction,
	Original,
}
impl StoryType {
	pub const ALL: [Self; 2] = [Self::Fanfiction, Self::Original];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Fanfiction => "FANFICTION",
			Self::Original => "ORIGINAL",
		}
	}
}
impl fmt::Display for StoryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for StoryType {
	type Err = UnknownVariant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|story_type| story_type.as_str() == s)
			.ok_or_else(|| UnknownVariant { kind: "story type", value: s.to_string() })
	}
}

/// Orderings offered by the public catalogue listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseSort {
	#[default]
	Recent,
	Popular,
	Title,
}
