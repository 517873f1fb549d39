use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUser {
	#[serde(default)]
	#[validate(custom(function = "not_blank"), length(max = 50, message = "is too long (maximum is 50 characters)"))]
	pub name: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank"), email(message = "is invalid"))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 6, message = "is too short (minimum is 6 characters)"))]
	pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignIn {
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowUser {
	pub followed_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UnfollowUser {
	pub followed_id: i64,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		let mut error = ValidationError::new("blank");
		error.message = Some("can't be blank".into());
		return Err(error);
	}
	Ok(())
}
