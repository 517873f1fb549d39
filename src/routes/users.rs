use axum::{
	extract::{Path, Query, State},
	http::header::SET_COOKIE,
	response::{Html, IntoResponse, Redirect, Response},
	Extension, Form,
};
use axum_macros::debug_handler;
use chrono::Utc;

use crate::{
	common::middleware_current_user::{session_cookie, CurrentUser},
	domain::{feed::PageNumber, user::commands::CreateUser},
	services::{
		handlers::UserHandler,
		response::ServiceError,
	},
	state::AppState,
	views::users::{self, SignUpForm},
};

use super::home::FeedQuery;

#[debug_handler]
pub async fn show(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Path(id): Path<i64>,
	Query(query): Query<FeedQuery>,
) -> Result<Html<String>, ServiceError> {
	let page = PageNumber::from_query(query.page)?;
	let profile = UserHandler::profile(id, current_user.get(), page, state.executor()).await?;
	Ok(users::profile(current_user.get(), &profile, Utc::now()))
}

pub async fn new() -> Html<String> {
	users::sign_up(&SignUpForm::default())
}

#[debug_handler]
pub async fn create(
	State(state): State<AppState>,
	Form(cmd): Form<CreateUser>,
) -> Result<Response, ServiceError> {
	let (name, email) = (cmd.name.clone(), cmd.email.clone());

	match UserHandler::sign_up(cmd, state.executor()).await {
		Ok((user, session)) => Ok((
			[(SET_COOKIE, session_cookie(&session.token))],
			Redirect::to(&format!("/users/{}", user.id)),
		)
			.into_response()),
		Err(ServiceError::ValidationError(errors)) => Ok(users::sign_up(&SignUpForm { name, email, errors }).into_response()),
		Err(err) => Err(err),
	}
}
