use {
	crate::{common_env::CommonEnv, consts::*},
	serde::{Deserialize, Serialize},
	sqlx::{PgPool, postgres::PgPoolOptions},
	std::time::Duration,
	tracing::info,
};

/// PostgreSQL 连接池配置（从 TOML 配置文件反序列化 缺省值取全局常量）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostgresConfig {
	#[serde(default = "default_max_connections")]
	pub max_connections: u32,
	#[serde(default = "default_min_connections")]
	pub min_connections: u32,
	#[serde(default = "default_idle_timeout_secs")]
	pub idle_timeout_secs: u64,
	#[serde(default = "default_max_lifetime_secs")]
	pub max_lifetime_secs: u64,
	#[serde(default = "default_acquire_timeout_secs")]
	pub acquire_timeout_secs: u64,
	#[serde(default)]
	pub test_before_acquire: bool,
}

fn default_max_connections() -> u32 {
	POSTGRES_MAX_CONNECTIONS
}
fn default_min_connections() -> u32 {
	POSTGRES_MIN_CONNECTIONS
}
fn default_idle_timeout_secs() -> u64 {
	POSTGRES_IDLE_TIMEOUT_SECS
}
fn default_max_lifetime_secs() -> u64 {
	POSTGRES_MAX_LIFETIME_SECS
}
fn default_acquire_timeout_secs() -> u64 {
	POSTGRES_ACQUIRE_TIMEOUT_SECS
}

impl Default for PostgresConfig {
	fn default() -> Self {
		Self {
			max_connections: POSTGRES_MAX_CONNECTIONS,
			min_connections: POSTGRES_MIN_CONNECTIONS,
			idle_timeout_secs: POSTGRES_IDLE_TIMEOUT_SECS,
			max_lifetime_secs: POSTGRES_MAX_LIFETIME_SECS,
			acquire_timeout_secs: POSTGRES_ACQUIRE_TIMEOUT_SECS,
			test_before_acquire: POSTGRES_TEST_BEFORE_ACQUIRE,
		}
	}
}

impl PostgresConfig {
	pub fn check(&self) -> anyhow::Result<()> {
		if self.max_connections == 0 {
			return Err(anyhow::anyhow!("Postgres max_connections must be greater than 0"));
		}
		if self.idle_timeout_secs == 0 {
			return Err(anyhow::anyhow!("Postgres idle_timeout_secs must be greater than 0"));
		}
		if self.max_lifetime_secs == 0 {
			return Err(anyhow::anyhow!("Postgres max_lifetime_secs must be greater than 0"));
		}
		if self.acquire_timeout_secs == 0 {
			return Err(anyhow::anyhow!("Postgres acquire_timeout_secs must be greater than 0"));
		}
		if self.max_connections < self.min_connections {
			return Err(anyhow::anyhow!("Postgres max_connections must not be less than min_connections"));
		}
		Ok(())
	}
}

/// 初始化只读连接池（从库）
pub async fn init_read_pool(env: &CommonEnv, config: &PostgresConfig) -> anyhow::Result<PgPool> {
	let database_url = format!("postgres://{}:{}@{}:{}/{}", env.postgres_read_user, env.postgres_read_password, env.postgres_read_host, env.postgres_read_port, env.postgres_read_database);

	let pool = PgPoolOptions::new()
		.max_connections(config.max_connections)
		.min_connections(config.min_connections)
		.acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
		.test_before_acquire(config.test_before_acquire)
		.idle_timeout(Duration::from_secs(config.idle_timeout_secs))
		.max_lifetime(Duration::from_secs(config.max_lifetime_secs))
		.connect(&database_url)
		.await?;

	// 测试连接
	sqlx::query("SELECT 1").execute(&pool).await?;

	info!("PostgreSQL read pool initialized: {}:{}/{} (max: {}, min: {})", env.postgres_read_host, env.postgres_read_port, env.postgres_read_database, config.max_connections, config.min_connections);
	Ok(pool)
}
