use axum::response::Html;

use super::{escape, layout};

pub fn sign_in(
	email: &str,
	error: Option<&str>,
) -> Html<String> {
	let flash = error
		.map(|error| format!(r#"<div class="alert alert-error">{}</div>"#, escape(error)))
		.unwrap_or_default();
	let body = format!(
		r#"<h1>Sign in</h1>{flash}
<form action="/sessions" method="post"><label for="session_email">Email</label><input id="session_email" name="email" type="email" value="{email}"><label for="session_password">Password</label><input id="session_password" name="password" type="password"><input class="btn btn-large btn-primary" type="submit" value="Sign in"></form>
<p>New user? <a href="/signup">Sign up now!</a></p>"#,
		email = escape(email),
	);
	layout("Sign in", None, &body)
}
