use {
	crate::{config::load_config, server::AppState},
	analytics::Analytics,
	common::common_env,
};

pub async fn init_all() -> anyhow::Result<AppState> {
	init_load()?;
	init_logging()?;
	let env = common_env::get_common_env()?;
	let config = crate::config::get_config()?;
	let store = crate::db::init_ledger_store(env, &config.postgres).await?; // 初始化只读账本
	Ok(AppState::new(Analytics::new(store), config.pagination))
}

fn init_load() -> anyhow::Result<()> {
	common_env::load_common_env()?;
	let run_mode = &common_env::get_common_env()?.run_mode;
	load_config(common::consts::API_CONFIG_PATH, run_mode)?;
	Ok(())
}

fn init_logging() -> anyhow::Result<()> {
	let config = crate::config::get_config()?;
	common::logging::init_logging(&config.logging)
}
