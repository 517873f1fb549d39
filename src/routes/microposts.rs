use axum::{
	extract::{Path, State},
	response::{IntoResponse, Redirect, Response},
	Extension, Form,
};
use axum_macros::debug_handler;
use chrono::Utc;

use crate::{
	common::middleware_current_user::CurrentUser,
	domain::{
		feed::{FeedScope, PageNumber},
		micropost::commands::{CreateMicropost, DeleteMicropost},
	},
	services::{
		handlers::{FeedHandler, MicropostHandler},
		response::ServiceError,
	},
	state::AppState,
	views::home::{self, MicropostForm},
};

/// Blank content re-renders the home page with the errors inline instead of
/// failing the request.
#[debug_handler]
pub async fn create(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Form(cmd): Form<CreateMicropost>,
) -> Result<Response, ServiceError> {
	let author = current_user.require()?;
	let content = cmd.content.clone();

	match MicropostHandler::create(cmd, author, state.executor()).await {
		Ok(_micropost) => Ok(Redirect::to("/").into_response()),
		Err(ServiceError::ValidationError(errors)) => {
			let feed = FeedHandler::load(FeedScope::Global, PageNumber::FIRST, state.executor()).await?;
			let form = MicropostForm { content, errors };
			Ok(home::render(Some(author), &feed, &form, Utc::now()).into_response())
		}
		Err(err) => Err(err),
	}
}

#[debug_handler]
pub async fn destroy(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Path(id): Path<i64>,
) -> Result<Redirect, ServiceError> {
	let viewer = current_user.require()?;
	MicropostHandler::delete(DeleteMicropost { id }, viewer, state.executor()).await?;
	Ok(Redirect::to("/"))
}
