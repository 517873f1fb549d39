use axum::{
	extract::{Path, State},
	response::Redirect,
	Extension, Form,
};
use axum_macros::debug_handler;

use crate::{
	common::middleware_current_user::CurrentUser,
	domain::user::commands::{FollowUser, UnfollowUser},
	services::{handlers::RelationshipHandler, response::ServiceError},
	state::AppState,
};

#[debug_handler]
pub async fn create(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Form(cmd): Form<FollowUser>,
) -> Result<Redirect, ServiceError> {
	let follower = current_user.require()?;
	let followed = RelationshipHandler::follow(cmd, follower, state.executor()).await?;
	Ok(Redirect::to(&format!("/users/{}", followed.id)))
}

#[debug_handler]
pub async fn destroy(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Path(followed_id): Path<i64>,
) -> Result<Redirect, ServiceError> {
	let follower = current_user.require()?;
	let followed = RelationshipHandler::unfollow(UnfollowUser { followed_id }, follower, state.executor()).await?;
	Ok(Redirect::to(&format!("/users/{}", followed.id)))
}
