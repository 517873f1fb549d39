//! Fixtures shared by the in-module tests.
use std::sync::OnceLock;

use axum::{
	body::Body,
	http::{header, Method, Request, StatusCode},
	Router,
};
use rand::Rng;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::{
	adapters::repositories::Repository,
	common::middleware_current_user::SESSION_COOKIE,
	database,
	domain::{
		micropost::entity::{Micropost, MicropostContent},
		user::{
			entity::{Session, User},
			password, NewUser,
		},
	},
	routes::create_routes,
	services::handlers::Executor,
	state::AppState,
};

pub async fn pool() -> SqlitePool {
	database::connect("sqlite::memory:").await.unwrap()
}

pub fn new_executor(pool: &SqlitePool) -> Executor {
	AppState::new(pool.clone()).executor()
}

/// An executor over its own fresh database.
pub async fn executor() -> Executor {
	new_executor(&pool().await)
}

fn unique_email(name: &str) -> String {
	let slug: String = name.to_lowercase().chars().filter(char::is_ascii_alphanumeric).collect();
	format!("{slug}{}@example.com", rand::thread_rng().gen::<u32>())
}

/// Every fixture user signs in with this password.
pub const TEST_PASSWORD: &str = "foobar";

fn test_password_digest() -> &'static str {
	static DIGEST: OnceLock<String> = OnceLock::new();
	DIGEST.get_or_init(|| password::hash(TEST_PASSWORD).unwrap())
}

/// Inserts a user through an executor whose transaction is already open.
pub async fn insert_user(
	executor: Executor,
	name: &str,
) -> User {
	let new_user = NewUser {
		name: name.to_string(),
		email: unique_email(name),
		password_digest: test_password_digest().to_string(),
	};
	Repository::<User>::new(executor).add(&new_user).await.unwrap()
}

pub async fn sign_up(
	pool: &SqlitePool,
	name: &str,
) -> User {
	let executor = new_executor(pool);
	executor.lock().await.begin().await.unwrap();
	let user = insert_user(executor.clone(), name).await;
	executor.lock().await.commit().await.unwrap();
	user
}

/// The `Cookie` header value of a fresh session for `user`.
pub async fn session_for(
	pool: &SqlitePool,
	user: &User,
) -> String {
	let executor = new_executor(pool);
	executor.lock().await.begin().await.unwrap();
	let session = Repository::<Session>::new(executor.clone()).add(user.id).await.unwrap();
	executor.lock().await.commit().await.unwrap();
	format!("{SESSION_COOKIE}={}", session.token)
}

pub async fn create_micropost(
	pool: &SqlitePool,
	user: &User,
	content: &str,
) -> Micropost {
	let executor = new_executor(pool);
	executor.lock().await.begin().await.unwrap();
	let micropost = Repository::<Micropost>::new(executor.clone())
		.add(user.id, &MicropostContent::parse(content).unwrap())
		.await
		.unwrap();
	executor.lock().await.commit().await.unwrap();
	micropost
}

pub async fn micropost_count(pool: &SqlitePool) -> i64 {
	sqlx::query_scalar("SELECT COUNT(*) FROM microposts").fetch_one(pool).await.unwrap()
}

/// Drives the router the way a browser session would.
pub struct TestClient {
	pub pool: SqlitePool,
	app: Router,
	cookie: Option<String>,
}

pub struct TestResponse {
	pub status: StatusCode,
	pub location: Option<String>,
	pub set_cookie: Option<String>,
	pub body: String,
}

impl TestClient {
	pub async fn new() -> Self {
		let pool = pool().await;
		Self {
			app: create_routes(AppState::new(pool.clone())),
			pool,
			cookie: None,
		}
	}

	pub async fn sign_in(
		&mut self,
		user: &User,
	) {
		self.cookie = Some(session_for(&self.pool, user).await);
	}

	pub async fn get(
		&self,
		uri: &str,
	) -> TestResponse {
		self.send(Method::GET, uri, None).await
	}

	pub async fn post_form(
		&self,
		uri: &str,
		form: &str,
	) -> TestResponse {
		self.send(Method::POST, uri, Some(form.to_string())).await
	}

	pub async fn delete(
		&self,
		uri: &str,
	) -> TestResponse {
		self.send(Method::DELETE, uri, None).await
	}

	async fn send(
		&self,
		method: Method,
		uri: &str,
		form: Option<String>,
	) -> TestResponse {
		let mut request = Request::builder().method(method).uri(uri);
		if let Some(cookie) = &self.cookie {
			request = request.header(header::COOKIE, cookie);
		}
		let body = match form {
			Some(form) => {
				request = request.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
				Body::from(form)
			}
			None => Body::empty(),
		};

		let response = self.app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
		let header_value = |name: header::HeaderName| response.headers().get(name).map(|value: &header::HeaderValue| value.to_str().unwrap().to_string());
		let location = header_value(header::LOCATION);
		let set_cookie = header_value(header::SET_COOKIE);
		let status = response.status();
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

		TestResponse {
			status,
			location,
			set_cookie,
			body: String::from_utf8(bytes.to_vec()).unwrap(),
		}
	}
}
