use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Clone, PartialEq, Eq, Debug, FromRow)]
pub struct User {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub created_at: DateTime<Utc>,
}

/// Directed edge: `follower_id` follows `followed_id`.
#[derive(Clone, PartialEq, Eq, Debug, FromRow)]
pub struct Relationship {
	pub follower_id: i64,
	pub followed_id: i64,
	pub created_at: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Eq, Debug, FromRow)]
pub struct Session {
	pub token: String,
	pub user_id: i64,
	pub created_at: DateTime<Utc>,
}
