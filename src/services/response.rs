use std::fmt::Display;

use axum::{
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
};

pub type AnyError = dyn std::error::Error + Send + Sync;

#[derive(Debug)]
pub enum ServiceError {
	/// Messages meant for the user, e.g. "Content can't be blank".
	ValidationError(Vec<String>),
	Unauthenticated,
	Forbidden,
	EntityNotFound,
	BadRequest,
	ConfigError(String),
	DatabaseConnectionError(Box<AnyError>),
	DatabaseError(Box<AnyError>),
	TransactionError,
	PasswordHashError(String),
	HttpError(Box<AnyError>),
}

impl ServiceError {
	pub fn validation(message: impl Into<String>) -> Self {
		ServiceError::ValidationError(vec![message.into()])
	}

	pub fn status_code(&self) -> StatusCode {
		match self {
			// Forms re-render with their errors.
			ServiceError::ValidationError(_) => StatusCode::OK,
			ServiceError::Unauthenticated => StatusCode::SEE_OTHER,
			ServiceError::Forbidden => StatusCode::FORBIDDEN,
			ServiceError::EntityNotFound => StatusCode::NOT_FOUND,
			ServiceError::BadRequest => StatusCode::BAD_REQUEST,
			ServiceError::ConfigError(_)
			| ServiceError::DatabaseConnectionError(_)
			| ServiceError::DatabaseError(_)
			| ServiceError::TransactionError
			| ServiceError::PasswordHashError(_)
			| ServiceError::HttpError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ServiceError::ValidationError(messages) => write!(f, "ValidationError: {}", messages.join(", ")),
			ServiceError::Unauthenticated => write!(f, "Unauthenticated"),
			ServiceError::Forbidden => write!(f, "Forbidden"),
			ServiceError::EntityNotFound => write!(f, "EntityNotFound"),
			ServiceError::BadRequest => write!(f, "BadRequest"),
			ServiceError::ConfigError(res) => write!(f, "ConfigError: {}", res),
			ServiceError::DatabaseConnectionError(res) => write!(f, "DatabaseConnectionError: {}", res),
			ServiceError::DatabaseError(res) => write!(f, "DatabaseError: {}", res),
			ServiceError::TransactionError => write!(f, "TransactionError"),
			ServiceError::PasswordHashError(res) => write!(f, "PasswordHashError: {}", res),
			ServiceError::HttpError(res) => write!(f, "HttpError: {}", res),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
	fn from(value: sqlx::Error) -> Self {
		match value {
			sqlx::Error::RowNotFound => ServiceError::EntityNotFound,
			err => ServiceError::DatabaseError(Box::new(err)),
		}
	}
}

/// Each failed rule becomes a sentence such as "Email is invalid"; the
/// messages are sorted so a form lists them in a stable order.
impl From<validator::ValidationErrors> for ServiceError {
	fn from(value: validator::ValidationErrors) -> Self {
		let mut messages: Vec<String> = value
			.field_errors()
			.into_iter()
			.flat_map(|(field, errors)| errors.iter().map(move |error| full_message(&field, error)))
			.collect();
		messages.sort();
		ServiceError::ValidationError(messages)
	}
}

fn full_message(
	field: &str,
	error: &validator::ValidationError,
) -> String {
	let mut chars = field.chars();
	let field: String = match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	};
	match &error.message {
		Some(message) => format!("{field} {message}"),
		None => format!("{field} is invalid"),
	}
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		match self {
			ServiceError::Unauthenticated => {
				tracing::warn!("Anonymous request to a protected endpoint");
				Redirect::to("/signin").into_response()
			}
			ServiceError::Forbidden | ServiceError::EntityNotFound | ServiceError::BadRequest | ServiceError::ValidationError(_) => {
				tracing::warn!("Request rejected: {}", self);
				(status, Html(error_page(status, &self.to_string()))).into_response()
			}
			err => {
				tracing::error!("Internal error while serving request: {}", err);
				(status, Html(error_page(status, "Something went wrong"))).into_response()
			}
		}
	}
}

fn error_page(
	status: StatusCode,
	detail: &str,
) -> String {
	format!(
		"<!DOCTYPE html><html><head><title>{code}</title></head><body><h1>{code} {reason}</h1><p>{detail}</p></body></html>",
		code = status.as_u16(),
		reason = status.canonical_reason().unwrap_or_default(),
		detail = crate::views::escape(detail),
	)
}
