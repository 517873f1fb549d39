use axum::http::{HeaderValue, Method};

use micropost::{
	dependencies::{config, connection_pool},
	routes::create_routes,
	services::response::ServiceError,
	state::AppState,
};
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	trace::TraceLayer,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
	dotenv::dotenv().ok();
	let config = config()?;

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("{},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections Are Being Pooled...");
	let pool = connection_pool().await?;

	let origins: Vec<HeaderValue> = config
		.allow_origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!("Ignoring invalid CORS origin: {}", origin);
				None
			}
		})
		.collect();

	let app = create_routes(AppState::new(pool.clone()))
		.layer(
			CorsLayer::new()
				.allow_origin(AllowOrigin::list(origins))
				.allow_methods([Method::GET, Method::POST, Method::DELETE]),
		)
		.layer(TraceLayer::new_for_http());

	tracing::info!("Start Web Server on {}", config.server_ip_port);
	axum::Server::bind(&config.server_ip_port)
		.serve(app.into_make_service())
		.await
		.map_err(|err| ServiceError::HttpError(Box::new(err)))
}
