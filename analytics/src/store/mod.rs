//! 账本存储接口
//!
//! 每个查询用显式的过滤结构描述 内存实现和 Postgres 实现必须给出完全一致的结果
//! 排序约定:
//! - users / events / disputes: created_at 降序 同时间按自增 id 降序
//! - orders: 默认 created_at 升序 同时间按自增 id 升序（后写的在后面）
//! - currencies: symbol 升序

use {
	async_trait::async_trait,
	common::model::{BidType, Currencies, DisputeStatus, Disputes, Events, Orders, Users},
	thiserror::Error,
};

pub mod memory;
pub mod postgres;

pub use {memory::MemoryLedgerStore, postgres::PgLedgerStore};

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("Store backend unavailable: {0}")]
	Unavailable(String),
}

/// 分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
	pub skip: u64,
	pub limit: u64,
}

/// 钱包匹配 一律忽略大小写
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletMatch {
	Eq(String),
	Ne(String),
	In(Vec<String>),
}

impl WalletMatch {
	pub fn matches(&self, wallet: &str) -> bool {
		match self {
			WalletMatch::Eq(w) => w.eq_ignore_ascii_case(wallet),
			WalletMatch::Ne(w) => !w.eq_ignore_ascii_case(wallet),
			WalletMatch::In(ws) => ws.iter().any(|w| w.eq_ignore_ascii_case(wallet)),
		}
	}
}

/// 订单结算结果过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMatch {
	IsNull,
	NullOr(i16),
	Eq(i16),
}

impl ResultMatch {
	pub fn matches(&self, result: Option<i16>) -> bool {
		match self {
			ResultMatch::IsNull => result.is_none(),
			ResultMatch::NullOr(v) => result.is_none() || result == Some(*v),
			ResultMatch::Eq(v) => result == Some(*v),
		}
	}
}

/// 市场标识匹配同样忽略大小写
fn event_id_in(ids: &[String], event_id: &str) -> bool {
	ids.iter().any(|id| id.eq_ignore_ascii_case(event_id))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
	pub wallet: Option<WalletMatch>,
}

impl UserFilter {
	pub fn matches(&self, user: &Users) -> bool {
		self.wallet.as_ref().is_none_or(|w| w.matches(&user.wallet_address))
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
	pub event_ids: Option<Vec<String>>,
	pub creator: Option<WalletMatch>,
	pub statuses: Option<Vec<i16>>,
	pub currency_type: Option<String>,
	/// 只要定义了目标价的市场
	pub has_price_level: bool,
}

impl EventFilter {
	pub fn matches(&self, event: &Events) -> bool {
		self.event_ids.as_ref().is_none_or(|ids| event_id_in(ids, &event.event_id))
			&& self.creator.as_ref().is_none_or(|w| w.matches(&event.user_id))
			&& self.statuses.as_ref().is_none_or(|s| s.contains(&event.status))
			&& self.currency_type.as_ref().is_none_or(|c| *c == event.currency_type)
			&& (!self.has_price_level || event.price_level.is_some())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
	pub event_ids: Option<Vec<String>>,
	pub user: Option<WalletMatch>,
	pub bid_type: Option<BidType>,
	pub result: Option<ResultMatch>,
}

impl OrderFilter {
	pub fn matches(&self, order: &Orders) -> bool {
		self.event_ids.as_ref().is_none_or(|ids| event_id_in(ids, &order.event_id))
			&& self.user.as_ref().is_none_or(|w| w.matches(&order.user_id))
			&& self.bid_type.is_none_or(|b| b == order.bid_type)
			&& self.result.as_ref().is_none_or(|r| r.matches(order.result))
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderSort {
	#[default]
	CreatedAsc,
	UpdatedDesc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeFilter {
	pub event_ids: Option<Vec<String>>,
	pub user: Option<WalletMatch>,
	pub status: Option<DisputeStatus>,
}

impl DisputeFilter {
	pub fn matches(&self, dispute: &Disputes) -> bool {
		self.event_ids.as_ref().is_none_or(|ids| event_id_in(ids, &dispute.event_id))
			&& self.user.as_ref().is_none_or(|w| w.matches(&dispute.user_id))
			&& self.status.is_none_or(|s| s == dispute.status)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyFilter {
	pub symbols: Option<Vec<String>>,
}

impl CurrencyFilter {
	pub fn matches(&self, currency: &Currencies) -> bool {
		self.symbols.as_ref().is_none_or(|s| s.iter().any(|symbol| *symbol == currency.symbol))
	}
}

/// 账本存储 由组合根构造后注入引擎 测试时换成内存实现
#[async_trait]
pub trait LedgerStore: Send + Sync {
	async fn find_users(&self, filter: &UserFilter, window: Option<Window>) -> Result<Vec<Users>, StoreError>;
	async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError>;

	async fn find_events(&self, filter: &EventFilter, window: Option<Window>) -> Result<Vec<Events>, StoreError>;
	async fn count_events(&self, filter: &EventFilter) -> Result<u64, StoreError>;

	async fn find_orders(&self, filter: &OrderFilter, sort: OrderSort, window: Option<Window>) -> Result<Vec<Orders>, StoreError>;
	async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError>;

	async fn find_disputes(&self, filter: &DisputeFilter, window: Option<Window>) -> Result<Vec<Disputes>, StoreError>;
	async fn count_disputes(&self, filter: &DisputeFilter) -> Result<u64, StoreError>;

	async fn find_currencies(&self, filter: &CurrencyFilter) -> Result<Vec<Currencies>, StoreError>;
}
