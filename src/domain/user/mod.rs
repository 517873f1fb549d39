pub mod commands;
pub mod entity;
pub mod password;

use validator::Validate;

use crate::services::response::ServiceError;

use self::commands::CreateUser;

/// Sign-up input after validation; the email is trimmed and lowercased and
/// the password is kept only as a digest.
#[derive(Debug, PartialEq, Eq)]
pub struct NewUser {
	pub name: String,
	pub email: String,
	pub password_digest: String,
}

impl NewUser {
	pub fn parse(cmd: CreateUser) -> Result<Self, ServiceError> {
		let cmd = CreateUser {
			name: cmd.name.trim().to_string(),
			email: normalize_email(&cmd.email),
			password: cmd.password,
		};
		cmd.validate()?;

		Ok(Self {
			password_digest: password::hash(&cmd.password)?,
			name: cmd.name,
			email: cmd.email,
		})
	}
}

pub fn normalize_email(raw: &str) -> String {
	raw.trim().to_lowercase()
}
