pub mod assets;
pub mod browse;
pub mod rfc3339;
pub mod search;

mod error;

pub use browse::{
	BrowseRequest, BrowseResponse, DEFAULT_PAGE_SIZE, Pagination, PublicStory, StoryOwner,
	StoryResponse,
};
pub use error::{Error, Result};
pub use search::{SearchStoriesRequest, SearchStoriesResponse, StoryResult};

use tale_config::Config;
use tale_storage::db::Db;

/// Read side of the story catalogue. Construct once and share; every operation is a
/// stateless read.
pub struct TaleService {
	pub cfg: Config,
	pub db: Db,
}
impl TaleService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
