use std::net::SocketAddr;

use crate::services::response::ServiceError;

pub struct Config {
	/// Default tracing filter when `RUST_LOG` is not set
	pub log_level: String,

	/// Address the server is listening to
	pub server_ip_port: SocketAddr,
	pub database_url: String,
	pub allow_origins: Vec<String>,
}

impl Config {
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or("info".to_string());
		let server_ip_port = std::env::var("SERVER_IP_PORT").unwrap_or("0.0.0.0:3000".into());
		let database_url = std::env::var("DATABASE_URL").unwrap_or("sqlite://micropost.db".into());
		let allow_origins = std::env::var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000,http://localhost:3001".to_string());

		Ok(Config {
			log_level,
			server_ip_port: parse_socket_addr(&server_ip_port)?,
			database_url,
			allow_origins: split_origins(&allow_origins),
		})
	}
}

fn parse_socket_addr(value: &str) -> Result<SocketAddr, ServiceError> {
	value
		.parse()
		.map_err(|_| ServiceError::ConfigError(format!("SERVER_IP_PORT is not a socket address: {value}")))
}

fn split_origins(value: &str) -> Vec<String> {
	value.split(',').map(str::trim).filter(|origin| !origin.is_empty()).map(String::from).collect()
}
