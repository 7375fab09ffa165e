use serde::{Deserialize, Serialize};

// 所有查询参数都按字符串接收 非法值交给引擎降级处理 不在这里报 400

/// 分页参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// 用户持仓 status: open | closed | 其他为全部
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionsQuery {
	pub status: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// 订单流水 filter: yes | no | withdraw | claimed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
	pub filter: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventIdQuery {
	pub event_id: Option<String>,
}

/// 公开市场列表 sort: closingSoon | newlyAdded | price | volume
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventListParams {
	pub search: Option<String>,
	#[serde(rename = "filterCoin", alias = "filter_coin")]
	pub filter_coin: Option<String>,
	pub sort: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// 用户创建的市场 filter: open | closed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserEventsQuery {
	pub filter: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// 争议列表 status: open | closed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisputesQuery {
	pub status: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolQuery {
	pub symbol: Option<String>,
}

/// 后台持仓汇总 scope: admin | user | all, status: 数字 1 为 open 其他为 closed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPositionsQuery {
	pub scope: Option<String>,
	pub status: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// 取出非空的必填参数
pub fn required(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
