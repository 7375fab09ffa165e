use {
	analytics::pagination::PaginationConfig,
	common::{logging::LoggingConfig, postgres_pool::PostgresConfig},
	config::{Config, File},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	pub logging: LoggingConfig,
	pub server: ServerConfig,
	#[serde(default)]
	pub postgres: PostgresConfig,
	#[serde(default)]
	pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	pub port: u16,
}

impl ServerConfig {
	pub fn get_addr(&self) -> String {
		format!("0.0.0.0:{}", self.port)
	}
}

impl ApiConfig {
	pub fn check(&self) -> anyhow::Result<()> {
		self.logging.check()?;
		self.postgres.check()?;
		self.pagination.check()?;
		if self.server.port == 0 {
			return Err(anyhow::anyhow!("Server port is zero"));
		}
		Ok(())
	}
}

pub static CONFIG: OnceCell<ApiConfig> = OnceCell::const_new();

pub fn load_config(config_path: &str, run_mode: &str) -> anyhow::Result<()> {
	let config = Config::builder().add_source(File::with_name(&format!("{}/{}", config_path, run_mode)).required(true)).build()?;

	let api_config: ApiConfig = config.try_deserialize()?;
	api_config.check()?;
	println!("Configuration loaded for mode: {}", run_mode);
	println!("Configuration: {:?}", api_config);
	CONFIG.set(api_config)?;
	Ok(())
}

pub fn get_config() -> anyhow::Result<&'static ApiConfig> {
	CONFIG.get().ok_or_else(|| anyhow::anyhow!("Config not loaded"))
}
