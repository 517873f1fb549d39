mod home;
mod microposts;
mod relationships;
mod sessions;
mod users;

use axum::{
	middleware,
	routing::{delete, get, post},
	Router,
};

use crate::{common::middleware_current_user::set_current_user, state::AppState};

pub fn create_routes(state: AppState) -> Router {
	Router::new()
		.route("/", get(home::index))
		.route("/microposts", post(microposts::create))
		.route("/microposts/:id", delete(microposts::destroy))
		.route("/signup", get(users::new))
		.route("/users", post(users::create))
		.route("/users/:id", get(users::show))
		.route("/signin", get(sessions::new))
		.route("/sessions", post(sessions::create))
		.route("/signout", delete(sessions::destroy))
		.route("/relationships", post(relationships::create))
		.route("/relationships/:followed_id", delete(relationships::destroy))
		.layer(middleware::from_fn_with_state(state.clone(), set_current_user))
		.with_state(state)
}
