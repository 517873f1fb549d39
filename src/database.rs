use std::str::FromStr;
use std::{mem, sync::Arc};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{sqlite::SqlitePool, Sqlite, Transaction};

use tokio::sync::Mutex;

use crate::services::response::ServiceError;

/// Unit of work over the pool. Every repository call made between `begin`
/// and `commit` runs in the same transaction; dropping the executor with an
/// open transaction rolls it back.
pub struct DatabaseExecutor {
	pool: SqlitePool,
	transaction: Option<Transaction<'static, Sqlite>>,
}

impl DatabaseExecutor {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool, transaction: None }
	}
	pub fn transaction(&mut self) -> Result<&mut Transaction<'static, Sqlite>, ServiceError> {
		match self.transaction.as_mut() {
			Some(trx) => Ok(trx),
			None => {
				tracing::error!("Transaction Has Not Begun!");
				Err(ServiceError::TransactionError)
			}
		}
	}
	pub fn connection(&self) -> &SqlitePool {
		&self.pool
	}

	pub(crate) async fn begin(&mut self) -> Result<(), ServiceError> {
		match self.transaction.as_mut() {
			None => {
				self.transaction = Some(
					self.pool
						.begin()
						.await
						.map_err(|err| ServiceError::DatabaseConnectionError(Box::new(err)))?,
				);
				Ok(())
			}
			Some(_trx) => {
				tracing::error!("Transaction Begun Already!");
				Err(ServiceError::TransactionError)
			}
		}
	}

	pub(crate) async fn commit(&mut self) -> Result<(), ServiceError> {
		let trx = mem::take(&mut self.transaction).ok_or(ServiceError::TransactionError)?;
		trx.commit().await.map_err(|err| {
			tracing::error!("Error occurred during commit operation : {:?}", err);
			ServiceError::DatabaseConnectionError(Box::new(err))
		})
	}
	pub(crate) async fn rollback(&mut self) -> Result<(), ServiceError> {
		let trx = mem::take(&mut self.transaction).ok_or(ServiceError::TransactionError)?;
		trx.rollback()
			.await
			.map_err(|err| ServiceError::DatabaseConnectionError(Box::new(err)))
	}
}

impl From<DatabaseExecutor> for Arc<Mutex<DatabaseExecutor>> {
	fn from(value: DatabaseExecutor) -> Self {
		Arc::new(Mutex::new(value))
	}
}

/// Opens a pool for `url` and brings the schema up to date.
///
/// An in-memory database lives only as long as its connection, so such URLs
/// get a single connection that is never recycled.
pub async fn connect(url: &str) -> Result<SqlitePool, ServiceError> {
	let options = SqliteConnectOptions::from_str(url)
		.map_err(|err| ServiceError::DatabaseConnectionError(Box::new(err)))?
		.create_if_missing(true);

	let pool_options = if is_in_memory(url) {
		SqlitePoolOptions::new()
			.max_connections(1)
			.min_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
	} else {
		SqlitePoolOptions::new().max_connections(30)
	};

	let pool = pool_options
		.connect_with(options)
		.await
		.map_err(|err| ServiceError::DatabaseConnectionError(Box::new(err)))?;

	sqlx::migrate!("./migrations")
		.run(&pool)
		.await
		.map_err(|err| ServiceError::DatabaseConnectionError(Box::new(err)))?;

	Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
	url.contains(":memory:") || url.contains("mode=memory")
}
