//! Argon2id password digests in PHC string format.
use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};

use crate::services::response::ServiceError;

pub fn hash(password: &str) -> Result<String, ServiceError> {
	let salt = SaltString::generate(&mut OsRng);
	let digest = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|err| ServiceError::PasswordHashError(err.to_string()))?;
	Ok(digest.to_string())
}

pub fn verify(
	password: &str,
	digest: &str,
) -> Result<bool, ServiceError> {
	let parsed = PasswordHash::new(digest).map_err(|err| ServiceError::PasswordHashError(err.to_string()))?;
	match Argon2::default().verify_password(password.as_bytes(), &parsed) {
		Ok(()) => Ok(true),
		Err(argon2::password_hash::Error::Password) => Ok(false),
		Err(err) => Err(ServiceError::PasswordHashError(err.to_string())),
	}
}
