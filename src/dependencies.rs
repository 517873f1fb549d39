use std::sync::OnceLock;

use sqlx::SqlitePool;

use crate::{config::Config, database, services::response::ServiceError};

pub fn config() -> Result<&'static Config, ServiceError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}

pub async fn connection_pool() -> Result<&'static SqlitePool, ServiceError> {
	static POOL: OnceLock<SqlitePool> = OnceLock::new();

	let p = match POOL.get() {
		None => {
			let url: &String = &config()?.database_url;
			let pool = database::connect(url).await?;
			POOL.get_or_init(|| pool)
		}
		Some(pool) => pool,
	};
	Ok(p)
}
