use axum::response::Html;
use chrono::{DateTime, Utc};

use crate::domain::{feed::FeedPage, user::entity::User};

use super::{error_messages, escape, feed, layout};

/// What the micropost form shows: the previous input and its errors.
#[derive(Debug, Default)]
pub struct MicropostForm {
	pub content: String,
	pub errors: Vec<String>,
}

pub fn render(
	viewer: Option<&User>,
	page: &FeedPage,
	form: &MicropostForm,
	now: DateTime<Utc>,
) -> Html<String> {
	let aside = match viewer {
		Some(user) => format!(
			r#"<aside><section class="user_info"><h1>{name}</h1><span><a href="/users/{id}">view my profile</a></span></section>
<section class="micropost_form"><form action="/microposts" method="post">{errors}<div class="field"><textarea id="micropost_content" name="content" placeholder="Compose new micropost...">{content}</textarea></div><input type="submit" value="Post"></form></section></aside>"#,
			name = escape(&user.name),
			id = user.id,
			errors = error_messages(&form.errors),
			content = escape(&form.content),
		),
		None => r#"<div class="center hero-unit"><h1>Welcome to the Micropost App</h1><a class="btn btn-large btn-primary" href="/signup">Sign up now!</a></div>"#.to_string(),
	};

	let body = format!(
		r#"{aside}
<div class="feed"><h3>Micropost Feed</h3>{caption}{items}</div>"#,
		caption = feed::caption(page),
		items = feed::render(page, viewer, now),
	);
	layout("Home", viewer, &body)
}
