use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	pub assets: Assets,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Page size used when a search request omits `limit`.
	#[serde(default = "default_search_limit")]
	pub default_limit: u32,
	/// Upper clamp for `limit`. Never above 100.
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_limit: default_search_limit(), max_limit: default_max_limit() }
	}
}

#[derive(Debug, Deserialize)]
pub struct Assets {
	/// Base URL that story cover art paths are resolved against.
	pub public_base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_search_limit() -> u32 {
	50
}

fn default_max_limit() -> u32 {
	100
}
