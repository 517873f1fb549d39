use axum::extract::State;
use axum::headers::{Cookie, HeaderMapExt};
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::entity::User;
use crate::services::{handlers::SessionHandler, response::ServiceError};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "remember_token";

/// The signed-in user, if any. Inserted into every request by [`set_current_user`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
	pub fn get(&self) -> Option<&User> {
		self.0.as_ref()
	}

	pub fn require(&self) -> Result<&User, ServiceError> {
		self.0.as_ref().ok_or(ServiceError::Unauthenticated)
	}
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
	headers.typed_get::<Cookie>()?.get(SESSION_COOKIE).map(String::from)
}

pub fn session_cookie(token: &str) -> String {
	format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
	format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub async fn set_current_user<B>(
	State(state): State<AppState>,
	mut request: Request<B>,
	next: Next<B>,
) -> Result<Response, ServiceError> {
	let user = match session_token(request.headers()) {
		Some(token) => SessionHandler::current_user(&token, state.executor()).await?,
		None => None,
	};
	if user.is_none() && request.headers().contains_key("cookie") {
		tracing::debug!("Request carried no valid session");
	}

	request.extensions_mut().insert(CurrentUser(user));
	Ok(next.run(request).await)
}
