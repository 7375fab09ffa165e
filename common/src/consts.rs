pub const COMMON_ENV_PATH: &str = "./deploy/common.env";
pub const API_CONFIG_PATH: &str = "./deploy/api";

/// 运行模式常量
pub const RUN_MODE_DEV: &str = "dev";
pub const RUN_MODE_PROD: &str = "prod";

/// 链上金额统一使用18位精度存储 对外计算前必须除以10^18
pub const TOKEN_DECIMALS: u32 = 18;

/// 前端未选择时会把 "undefined" 字符串原样传上来 等同于没有传
pub const UNDEFINED_SENTINEL: &str = "undefined";

/// 分页默认值
pub const PAGINATION_DEFAULT_LIMIT: u64 = 10;
pub const PAGINATION_MAX_LIMIT: u64 = 100;

/// PostgreSQL 连接池配置常量
pub const POSTGRES_MAX_CONNECTIONS: u32 = 32;
pub const POSTGRES_MIN_CONNECTIONS: u32 = 1;
pub const POSTGRES_IDLE_TIMEOUT_SECS: u64 = 600;
pub const POSTGRES_MAX_LIFETIME_SECS: u64 = 1800;
pub const POSTGRES_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const POSTGRES_TEST_BEFORE_ACQUIRE: bool = false;

/// 验证运行模式是否有效
pub fn validate_run_mode(run_mode: &str) -> anyhow::Result<()> {
	match run_mode {
		RUN_MODE_DEV | RUN_MODE_PROD => Ok(()),
		_ => Err(anyhow::anyhow!("Invalid RUN_MODE: {}. Must be either '{}' or '{}'", run_mode, RUN_MODE_DEV, RUN_MODE_PROD)),
	}
}

/// 判断查询参数是否真的有值（空串和 "undefined" 都视为没有传）
pub fn is_meaningful_param(value: Option<&str>) -> bool {
	match value {
		Some(v) => {
			let v = v.trim();
			!v.is_empty() && v != UNDEFINED_SENTINEL
		}
		None => false,
	}
}
