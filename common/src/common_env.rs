use {
	crate::consts::COMMON_ENV_PATH,
	config::{Config, Environment},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommonEnv {
	pub run_mode: String,

	// PostgreSQL 读配置（从库） 聚合引擎只读不写
	pub postgres_read_host: String,
	pub postgres_read_port: u16,
	pub postgres_read_user: String,
	pub postgres_read_password: String,
	pub postgres_read_database: String,
}

impl CommonEnv {
	pub fn check(&self) -> anyhow::Result<()> {
		crate::consts::validate_run_mode(&self.run_mode)?;

		if self.postgres_read_host.is_empty() {
			return Err(anyhow::anyhow!("PostgreSQL read host is empty"));
		}
		if self.postgres_read_user.is_empty() {
			return Err(anyhow::anyhow!("PostgreSQL read user is empty"));
		}
		if self.postgres_read_database.is_empty() {
			return Err(anyhow::anyhow!("PostgreSQL read database is empty"));
		}
		if self.postgres_read_port == 0 {
			return Err(anyhow::anyhow!("PostgreSQL read port is zero"));
		}
		Ok(())
	}
}

pub static COMMON_ENV: OnceCell<CommonEnv> = OnceCell::const_new();

pub fn load_common_env() -> anyhow::Result<()> {
	// 文件不存在时直接使用进程环境变量（容器部署时由编排注入）
	if let Err(e) = dotenvy::from_path(COMMON_ENV_PATH) {
		println!("Common env file {} not loaded ({}), falling back to process environment", COMMON_ENV_PATH, e);
	}

	let config = Config::builder().add_source(Environment::default()).build()?;

	let common_env: CommonEnv = config.try_deserialize()?;
	common_env.check()?;
	println!("Common env loaded, run_mode={}, postgres_read={}:{}/{}", common_env.run_mode, common_env.postgres_read_host, common_env.postgres_read_port, common_env.postgres_read_database);
	COMMON_ENV.set(common_env)?;
	Ok(())
}

pub fn get_common_env() -> anyhow::Result<&'static CommonEnv> {
	COMMON_ENV.get().ok_or_else(|| anyhow::anyhow!("Common env not loaded"))
}
