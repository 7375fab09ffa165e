/// 优雅停机时给进行中请求的收尾时间（秒）
pub const GRACEFUL_DRAIN_SECS: u64 = 5;

/// 上游会话层认证后写入的钱包地址请求头
pub const WALLET_HEADER: &str = "x-wallet-address";

/// 请求 id 请求头
pub const REQUEST_ID_HEADER: &str = "x-request-id";
