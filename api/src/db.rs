use {
	analytics::store::{LedgerStore, PgLedgerStore},
	common::{common_env::CommonEnv, postgres_pool::PostgresConfig},
	std::sync::Arc,
};

/// 构造只读账本 由 main 持有并注入引擎
pub async fn init_ledger_store(env: &CommonEnv, config: &PostgresConfig) -> anyhow::Result<Arc<dyn LedgerStore>> {
	let pool = common::postgres_pool::init_read_pool(env, config).await?;
	Ok(Arc::new(PgLedgerStore::new(pool)))
}
