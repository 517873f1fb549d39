use chrono::Utc;
use uuid::Uuid;

use crate::{
	domain::user::entity::{Session, User},
	services::response::ServiceError,
};

use super::Repository;

impl Repository<Session> {
	pub async fn add(
		&self,
		user_id: i64,
	) -> Result<Session, ServiceError> {
		let mut executor = self.executor.lock().await;
		let session = sqlx::query_as::<_, Session>("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?) RETURNING token, user_id, created_at")
			.bind(Uuid::new_v4().to_string())
			.bind(user_id)
			.bind(Utc::now())
			.fetch_one(&mut **executor.transaction()?)
			.await?;
		Ok(session)
	}

	pub async fn find_user(
		&self,
		token: &str,
	) -> Result<Option<User>, ServiceError> {
		let mut executor = self.executor.lock().await;
		let user = sqlx::query_as::<_, User>(
			"SELECT u.id, u.name, u.email, u.created_at FROM sessions s JOIN users u ON u.id = s.user_id WHERE s.token = ?",
		)
		.bind(token)
		.fetch_optional(&mut **executor.transaction()?)
		.await?;
		Ok(user)
	}

	pub async fn delete(
		&self,
		token: &str,
	) -> Result<(), ServiceError> {
		let mut executor = self.executor.lock().await;
		sqlx::query("DELETE FROM sessions WHERE token = ?")
			.bind(token)
			.execute(&mut **executor.transaction()?)
			.await?;
		Ok(())
	}
}
