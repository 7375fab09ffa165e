//! 市场生命周期分类
//!
//! 状态机: 1 进行中 -> 3 停止下注 -> {2 已出结果 | 0 关闭无结果} -> 4 争议期结束
//! 引擎只做分类 从不修改状态
//!
//! 用户端和后台的"已关闭"集合不同 后台不包含 4 两套分类器分开维护 不要合并

use serde::{Deserialize, Serialize};

/// 市场状态 数值与账本里的 status 一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
	Closed = 0,
	Open = 1,
	ResultDeclared = 2,
	BidClosed = 3,
	DisputePeriodEnded = 4,
}

impl EventStatus {
	pub const fn as_i16(self) -> i16 {
		self as i16
	}
}

pub const USER_OPEN_STATUSES: &[i16] = &[EventStatus::Open.as_i16(), EventStatus::BidClosed.as_i16()];
pub const USER_CLOSED_STATUSES: &[i16] = &[EventStatus::Closed.as_i16(), EventStatus::ResultDeclared.as_i16(), EventStatus::DisputePeriodEnded.as_i16()];
pub const ADMIN_OPEN_STATUSES: &[i16] = &[EventStatus::Open.as_i16(), EventStatus::BidClosed.as_i16()];
pub const ADMIN_CLOSED_STATUSES: &[i16] = &[EventStatus::Closed.as_i16(), EventStatus::ResultDeclared.as_i16()];

/// 用户端持仓意图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionIntent {
	Open,
	Closed,
	/// 其他任何取值都不过滤
	All,
}

impl PositionIntent {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
			Some("open") => PositionIntent::Open,
			Some("closed") => PositionIntent::Closed,
			_ => PositionIntent::All,
		}
	}

	/// None 表示不按状态过滤
	pub fn status_set(&self) -> Option<&'static [i16]> {
		match self {
			PositionIntent::Open => Some(USER_OPEN_STATUSES),
			PositionIntent::Closed => Some(USER_CLOSED_STATUSES),
			PositionIntent::All => None,
		}
	}

	/// 订单是否可以出现在该意图的持仓里
	/// open 只看未结算的 closed 只看未结算或赢的 已经输掉的单不再展示
	pub fn order_eligible(&self, result: Option<i16>) -> bool {
		match self {
			PositionIntent::Open => result.is_none(),
			PositionIntent::Closed => matches!(result, None | Some(1)),
			PositionIntent::All => true,
		}
	}
}

/// 后台持仓视图的状态过滤 入参是数字状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminPositionIntent {
	Open,
	Closed,
	All,
}

impl AdminPositionIntent {
	/// 1 为 open 其他数字为 closed 非数字不过滤
	pub fn parse_status(raw: Option<&str>) -> Self {
		match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
			Some(1) => AdminPositionIntent::Open,
			Some(_) => AdminPositionIntent::Closed,
			None => AdminPositionIntent::All,
		}
	}

	pub fn status_set(&self) -> Option<&'static [i16]> {
		match self {
			AdminPositionIntent::Open => Some(ADMIN_OPEN_STATUSES),
			AdminPositionIntent::Closed => Some(ADMIN_CLOSED_STATUSES),
			AdminPositionIntent::All => None,
		}
	}
}
