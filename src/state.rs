use sqlx::SqlitePool;

use crate::{database::DatabaseExecutor, services::handlers::Executor};

#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
}

impl AppState {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// A fresh unit of work for one request.
	pub fn executor(&self) -> Executor {
		DatabaseExecutor::new(self.pool.clone()).into()
	}
}
