use std::sync::Arc;

use tale_service::TaleService;
use tale_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TaleService>,
}
impl AppState {
	pub async fn new(config: tale_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(TaleService::new(config, db)))
	}

	pub fn from_service(service: TaleService) -> Self {
		Self { service: Arc::new(service) }
	}
}
