// 衍生指标聚合引擎
// 把 events/orders/disputes 三本账聚合成分页的持仓、盈亏、交易量、赔付和后台统计视图
// 只读 不保存任何跨请求状态

pub mod admin;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod events;
pub mod join;
pub mod metrics;
pub mod pagination;
pub mod portfolio;
pub mod positions;
pub mod response;
pub mod store;

pub use {
	engine::Analytics,
	error::EngineError,
	pagination::Pagination,
	response::{ApiErrorCode, ApiResponse, Page},
};
