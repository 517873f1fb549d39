//! Server-rendered HTML pages.
//!
//! Every piece of user-supplied text goes through [`escape`] before it is
//! interpolated into markup.
pub mod feed;
pub mod home;
pub mod sessions;
pub mod users;

use axum::response::Html;
use chrono::{DateTime, Utc};

use crate::domain::user::entity::User;

pub fn escape(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for ch in raw.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}
	escaped
}

// Links carrying `data-method` are sent with that HTTP method instead of GET.
const DATA_METHOD_SCRIPT: &str = r#"<script>
document.addEventListener('click', function (event) {
  var link = event.target.closest('a[data-method]');
  if (!link) { return; }
  event.preventDefault();
  var question = link.getAttribute('data-confirm');
  if (question && !window.confirm(question)) { return; }
  fetch(link.href, { method: link.getAttribute('data-method').toUpperCase(), credentials: 'same-origin' })
    .then(function (response) { window.location = response.url; });
});
</script>"#;

pub fn layout(
	title: &str,
	viewer: Option<&User>,
	body: &str,
) -> Html<String> {
	let nav = match viewer {
		Some(user) => format!(
			r#"<li><a href="/">Home</a></li><li><a href="/users/{id}">Profile</a></li><li><a href="/signout" data-method="delete">Sign out</a></li>"#,
			id = user.id
		),
		None => r#"<li><a href="/">Home</a></li><li><a href="/signup">Sign up</a></li><li><a href="/signin">Sign in</a></li>"#.to_string(),
	};

	Html(format!(
		r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} | Micropost App</title>
</head>
<body>
<header><a id="logo" href="/">micropost app</a><nav><ul>{nav}</ul></nav></header>
<div class="container">
{body}
</div>
{DATA_METHOD_SCRIPT}
</body>
</html>"#,
		title = escape(title),
	))
}

/// The `#error_explanation` block shown above a form that failed validation.
pub fn error_messages(errors: &[String]) -> String {
	if errors.is_empty() {
		return String::new();
	}
	let items: String = errors.iter().map(|error| format!("<li>* {}</li>", escape(error))).collect();
	format!(
		r#"<div id="error_explanation"><div class="alert alert-error">The form contains {}.</div><ul>{items}</ul></div>"#,
		crate::domain::feed::pluralize(errors.len() as i64, "error")
	)
}

pub fn time_ago_in_words(
	from: DateTime<Utc>,
	to: DateTime<Utc>,
) -> String {
	let minutes = (to - from).num_seconds().max(0) as f64 / 60.0;
	let minutes = minutes.round() as i64;
	match minutes {
		0 => "less than a minute".to_string(),
		1 => "1 minute".to_string(),
		2..=44 => format!("{minutes} minutes"),
		45..=89 => "about 1 hour".to_string(),
		90..=1439 => format!("about {} hours", (minutes as f64 / 60.0).round() as i64),
		1440..=2519 => "1 day".to_string(),
		2520..=43199 => format!("{} days", (minutes as f64 / 1440.0).round() as i64),
		43200..=86399 => "about 1 month".to_string(),
		86400..=525599 => format!("{} months", (minutes as f64 / 43200.0).round() as i64),
		_ => {
			let years = minutes / 525600;
			if years <= 1 {
				"about 1 year".to_string()
			} else {
				format!("over {years} years")
			}
		}
	}
}
