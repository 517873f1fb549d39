use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::services::response::ServiceError;

#[derive(Clone, PartialEq, Eq, Debug, FromRow)]
pub struct Micropost {
	pub id: i64,
	pub user_id: i64,
	pub content: String,
	pub created_at: DateTime<Utc>,
}

/// Content that passed validation. Only a non-blank check applies.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MicropostContent(String);

impl MicropostContent {
	pub fn parse(raw: &str) -> Result<Self, ServiceError> {
		if raw.trim().is_empty() {
			return Err(ServiceError::validation("Content can't be blank"));
		}
		Ok(Self(raw.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
