//! 测试数据构造
//!
//! 所有时间都相对固定基准 方便断言排序

use {
	analytics::{
		Analytics,
		store::{CurrencyFilter, DisputeFilter, EventFilter, LedgerStore, MemoryLedgerStore, OrderFilter, OrderSort, StoreError, UserFilter, Window},
	},
	async_trait::async_trait,
	chrono::{DateTime, Utc},
	common::model::{BidType, Currencies, DisputeStatus, Disputes, Events, Orders, Users},
	rust_decimal::Decimal,
	std::{str::FromStr, sync::Arc},
};

/// 2024-01-01 00:00:00 UTC
const BASE_TIMESTAMP: i64 = 1_704_067_200;

pub const ALICE: &str = "0xalice";
pub const BOB: &str = "0xbob";
pub const CAROL: &str = "0xcarol";
pub const ADMIN: &str = "0xadmin";

pub fn ts(secs: i64) -> DateTime<Utc> {
	DateTime::from_timestamp(BASE_TIMESTAMP + secs, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
	Decimal::from_str(s).unwrap()
}

/// n 个代币对应的链上整数金额
pub fn tokens(n: i64) -> Decimal {
	Decimal::from(n) * Decimal::from_i128_with_scale(1_000_000_000_000_000_000, 0)
}

pub fn user(id: i64, wallet: &str, created: i64) -> Users {
	Users {
		id,
		wallet_address: wallet.to_string(),
		role: "user".to_string(),
		user_name: Some(format!("user{}", id)),
		full_user_name: None,
		ens_id: None,
		email: None,
		status: Some("active".to_string()),
		profile_picture: None,
		created_at: ts(created),
		updated_at: ts(created),
	}
}

/// 默认: 目标价 100 赔率 [150, 80] 手续费 10%
pub fn event(id: i64, event_id: &str, creator: &str, currency: &str, status: i16, created: i64) -> Events {
	Events {
		id,
		event_id: event_id.to_string(),
		user_id: creator.to_string(),
		currency_type: currency.to_string(),
		price_level: Some(dec("100")),
		target_date_time: ts(created + 10_000),
		event_expire_time: ts(created + 5_000),
		status,
		odds: vec![dec("150"), dec("80")],
		platform_fees: dec("10"),
		settlement: None,
		reward: None,
		created_at: ts(created),
		updated_at: ts(created),
	}
}

pub fn order(id: i64, event_id: &str, wallet: &str, bid_type: BidType, amount: Decimal, created: i64) -> Orders {
	Orders {
		id,
		event_id: event_id.to_string(),
		user_id: wallet.to_string(),
		bid_type,
		amount,
		current_bet: None,
		amount_claimed: None,
		result: None,
		created_at: ts(created),
		updated_at: ts(created),
	}
}

pub fn dispute(id: i64, event_id: &str, wallet: &str, status: DisputeStatus, created: i64) -> Disputes {
	Disputes {
		id,
		event_id: event_id.to_string(),
		user_id: wallet.to_string(),
		category: "wrong_result".to_string(),
		email: None,
		status,
		description: Some("settlement does not match the feed".to_string()),
		evidence_url: vec!["https://example.com/evidence.png".to_string()],
		created_at: ts(created),
		updated_at: ts(created),
	}
}

pub fn currency(id: i64, symbol: &str, name: &str, price: Decimal) -> Currencies {
	Currencies { id, symbol: symbol.to_string(), name: name.to_string(), price, precision: 2, updated_at: ts(0) }
}

pub fn engine(store: &Arc<MemoryLedgerStore>) -> Analytics {
	Analytics::new(store.clone())
}

/// 空的内存账本
pub fn empty_store() -> Arc<MemoryLedgerStore> {
	Arc::new(MemoryLedgerStore::new())
}

/// 所有查询都失败的存储 用于验证失败信封
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable<T>() -> Result<T, StoreError> {
	Err(StoreError::Unavailable("connection refused by 10.0.0.7:5432".to_string()))
}

#[async_trait]
impl LedgerStore for FailingStore {
	async fn find_users(&self, _filter: &UserFilter, _window: Option<Window>) -> Result<Vec<Users>, StoreError> {
		unavailable()
	}
	async fn count_users(&self, _filter: &UserFilter) -> Result<u64, StoreError> {
		unavailable()
	}
	async fn find_events(&self, _filter: &EventFilter, _window: Option<Window>) -> Result<Vec<Events>, StoreError> {
		unavailable()
	}
	async fn count_events(&self, _filter: &EventFilter) -> Result<u64, StoreError> {
		unavailable()
	}
	async fn find_orders(&self, _filter: &OrderFilter, _sort: OrderSort, _window: Option<Window>) -> Result<Vec<Orders>, StoreError> {
		unavailable()
	}
	async fn count_orders(&self, _filter: &OrderFilter) -> Result<u64, StoreError> {
		unavailable()
	}
	async fn find_disputes(&self, _filter: &DisputeFilter, _window: Option<Window>) -> Result<Vec<Disputes>, StoreError> {
		unavailable()
	}
	async fn count_disputes(&self, _filter: &DisputeFilter) -> Result<u64, StoreError> {
		unavailable()
	}
	async fn find_currencies(&self, _filter: &CurrencyFilter) -> Result<Vec<Currencies>, StoreError> {
		unavailable()
	}
}
