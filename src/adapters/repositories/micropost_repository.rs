use chrono::{DateTime, Utc};

use crate::{
	domain::{
		feed::{FeedItem, FeedScope, PageNumber},
		micropost::entity::{Micropost, MicropostContent},
	},
	services::response::ServiceError,
};

use super::Repository;

const FEED_SELECT: &str = "SELECT m.id, m.user_id, u.name AS user_name, m.content, m.created_at \
	FROM microposts m JOIN users u ON u.id = m.user_id";

impl Repository<Micropost> {
	pub async fn add(
		&self,
		user_id: i64,
		content: &MicropostContent,
	) -> Result<Micropost, ServiceError> {
		self.add_at(user_id, content, Utc::now()).await
	}

	pub(crate) async fn add_at(
		&self,
		user_id: i64,
		content: &MicropostContent,
		created_at: DateTime<Utc>,
	) -> Result<Micropost, ServiceError> {
		let mut executor = self.executor.lock().await;
		let micropost = sqlx::query_as::<_, Micropost>(
			"INSERT INTO microposts (user_id, content, created_at) VALUES (?, ?, ?) RETURNING id, user_id, content, created_at",
		)
		.bind(user_id)
		.bind(content.as_str())
		.bind(created_at)
		.fetch_one(&mut **executor.transaction()?)
		.await?;
		Ok(micropost)
	}

	pub async fn get(
		&self,
		id: i64,
	) -> Result<Option<Micropost>, ServiceError> {
		let mut executor = self.executor.lock().await;
		let micropost = sqlx::query_as::<_, Micropost>("SELECT id, user_id, content, created_at FROM microposts WHERE id = ?")
			.bind(id)
			.fetch_optional(&mut **executor.transaction()?)
			.await?;
		Ok(micropost)
	}

	/// Returns whether a row was removed.
	pub async fn delete(
		&self,
		id: i64,
	) -> Result<bool, ServiceError> {
		let mut executor = self.executor.lock().await;
		let result = sqlx::query("DELETE FROM microposts WHERE id = ?")
			.bind(id)
			.execute(&mut **executor.transaction()?)
			.await?;
		Ok(result.rows_affected() > 0)
	}

	pub async fn count(
		&self,
		scope: FeedScope,
	) -> Result<i64, ServiceError> {
		let mut executor = self.executor.lock().await;
		let trx = executor.transaction()?;
		let count = match scope {
			FeedScope::Global => sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM microposts").fetch_one(&mut **trx).await?,
			FeedScope::User(user_id) => {
				sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM microposts WHERE user_id = ?")
					.bind(user_id)
					.fetch_one(&mut **trx)
					.await?
			}
		};
		Ok(count)
	}

	/// Newest first; `id` breaks ties between equal timestamps so pages never
	/// overlap.
	pub async fn page(
		&self,
		scope: FeedScope,
		page: PageNumber,
		page_size: u32,
	) -> Result<Vec<FeedItem>, ServiceError> {
		let mut executor = self.executor.lock().await;
		let trx = executor.transaction()?;
		let items = match scope {
			FeedScope::Global => {
				sqlx::query_as::<_, FeedItem>(&format!("{FEED_SELECT} ORDER BY m.created_at DESC, m.id DESC LIMIT ? OFFSET ?"))
					.bind(page_size as i64)
					.bind(page.offset(page_size))
					.fetch_all(&mut **trx)
					.await?
			}
			FeedScope::User(user_id) => {
				sqlx::query_as::<_, FeedItem>(&format!(
					"{FEED_SELECT} WHERE m.user_id = ? ORDER BY m.created_at DESC, m.id DESC LIMIT ? OFFSET ?"
				))
				.bind(user_id)
				.bind(page_size as i64)
				.bind(page.offset(page_size))
				.fetch_all(&mut **trx)
				.await?
			}
		};
		Ok(items)
	}
}
