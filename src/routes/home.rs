use axum::{
	extract::{Query, State},
	response::Html,
	Extension,
};
use axum_macros::debug_handler;
use chrono::Utc;
use serde::Deserialize;

use crate::{
	common::middleware_current_user::CurrentUser,
	domain::feed::{FeedScope, PageNumber},
	services::{handlers::FeedHandler, response::ServiceError},
	state::AppState,
	views::home::{self, MicropostForm},
};

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
	pub page: Option<u32>,
}

#[debug_handler]
pub async fn index(
	State(state): State<AppState>,
	Extension(current_user): Extension<CurrentUser>,
	Query(query): Query<FeedQuery>,
) -> Result<Html<String>, ServiceError> {
	let page = PageNumber::from_query(query.page)?;
	let feed = FeedHandler::load(FeedScope::Global, page, state.executor()).await?;
	Ok(home::render(current_user.get(), &feed, &MicropostForm::default(), Utc::now()))
}
