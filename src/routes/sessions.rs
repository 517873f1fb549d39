use axum::{
	extract::State,
	http::{header::SET_COOKIE, HeaderMap},
	response::{Html, IntoResponse, Redirect, Response},
	Form,
};
use axum_macros::debug_handler;

use crate::{
	common::middleware_current_user::{expired_session_cookie, session_cookie, session_token},
	domain::user::commands::SignIn,
	services::{handlers::SessionHandler, response::ServiceError},
	state::AppState,
	views::sessions,
};

pub async fn new() -> Html<String> {
	sessions::sign_in("", None)
}

#[debug_handler]
pub async fn create(
	State(state): State<AppState>,
	Form(cmd): Form<SignIn>,
) -> Result<Response, ServiceError> {
	let email = cmd.email.clone();

	match SessionHandler::sign_in(cmd, state.executor()).await {
		Ok((_user, session)) => Ok(([(SET_COOKIE, session_cookie(&session.token))], Redirect::to("/")).into_response()),
		Err(ServiceError::ValidationError(errors)) => {
			let message = errors.join(", ");
			Ok(sessions::sign_in(&email, Some(&message)).into_response())
		}
		Err(err) => Err(err),
	}
}

#[debug_handler]
pub async fn destroy(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Response, ServiceError> {
	if let Some(token) = session_token(&headers) {
		SessionHandler::sign_out(&token, state.executor()).await?;
	}
	Ok(([(SET_COOKIE, expired_session_cookie())], Redirect::to("/")).into_response())
}
