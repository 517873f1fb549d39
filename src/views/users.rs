use axum::response::Html;
use chrono::{DateTime, Utc};

use crate::{domain::user::entity::User, services::handlers::Profile};

use super::{error_messages, escape, feed, layout};

#[derive(Debug, Default)]
pub struct SignUpForm {
	pub name: String,
	pub email: String,
	pub errors: Vec<String>,
}

pub fn profile(
	viewer: Option<&User>,
	profile: &Profile,
	now: DateTime<Utc>,
) -> Html<String> {
	let user = &profile.user;
	let follow_control = match profile.viewer_follows {
		Some(true) => format!(r#"<div id="follow_form"><a class="btn" href="/relationships/{}" data-method="delete">Unfollow</a></div>"#, user.id),
		Some(false) => format!(
			r#"<div id="follow_form"><form action="/relationships" method="post"><input type="hidden" name="followed_id" value="{}"><input class="btn btn-primary" type="submit" value="Follow"></form></div>"#,
			user.id
		),
		None => String::new(),
	};

	let body = format!(
		r#"<aside><section><h1>{name}</h1></section>
<section class="stats"><a href="/users/{id}"><strong id="following">{following}</strong> following</a> <a href="/users/{id}"><strong id="followers">{followers}</strong> followers</a></section></aside>
<div class="feed">{follow_control}<h3>Microposts</h3>{caption}{items}</div>"#,
		name = escape(&user.name),
		id = user.id,
		following = profile.following_count,
		followers = profile.followers_count,
		caption = feed::caption(&profile.feed),
		items = feed::render(&profile.feed, viewer, now),
	);
	layout(&user.name, viewer, &body)
}

pub fn sign_up(form: &SignUpForm) -> Html<String> {
	let body = format!(
		r#"<h1>Sign up</h1>
<form action="/users" method="post">{errors}<label for="user_name">Name</label><input id="user_name" name="name" type="text" value="{name}"><label for="user_email">Email</label><input id="user_email" name="email" type="email" value="{email}"><label for="user_password">Password</label><input id="user_password" name="password" type="password"><input class="btn btn-large btn-primary" type="submit" value="Create my account"></form>"#,
		errors = error_messages(&form.errors),
		name = escape(&form.name),
		email = escape(&form.email),
	);
	layout("Sign up", None, &body)
}
