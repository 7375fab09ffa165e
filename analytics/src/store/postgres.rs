use {
	super::{CurrencyFilter, DisputeFilter, EventFilter, LedgerStore, OrderFilter, OrderSort, ResultMatch, StoreError, UserFilter, WalletMatch, Window},
	async_trait::async_trait,
	common::model::{Currencies, Disputes, Events, Orders, Users},
	sqlx::{PgPool, Postgres, QueryBuilder},
};

const USER_COLUMNS: &str = "id, wallet_address, role, user_name, full_user_name, ens_id, email, status, profile_picture, created_at, updated_at";
const EVENT_COLUMNS: &str = "id, event_id, user_id, currency_type, price_level, target_date_time, event_expire_time, status, odds, platform_fees, settlement, reward, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, event_id, user_id, bid_type, amount, current_bet, amount_claimed, result, created_at, updated_at";
const DISPUTE_COLUMNS: &str = "id, event_id, user_id, category, email, status, description, evidence_url, created_at, updated_at";
const CURRENCY_COLUMNS: &str = "id, symbol, name, price, precision, updated_at";

/// Postgres 账本 读从库
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
	pool: PgPool,
}

impl PgLedgerStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

/// 按需拼接 WHERE / AND
struct Where {
	first: bool,
}

impl Where {
	fn new() -> Self {
		Self { first: true }
	}

	fn next(&mut self, qb: &mut QueryBuilder<'_, Postgres>) {
		qb.push(if self.first { " WHERE " } else { " AND " });
		self.first = false;
	}

	fn wallet(&mut self, qb: &mut QueryBuilder<'_, Postgres>, column: &str, m: &WalletMatch) {
		self.next(qb);
		match m {
			WalletMatch::Eq(w) => {
				qb.push(format!("LOWER({}) = ", column)).push_bind(w.to_lowercase());
			}
			WalletMatch::Ne(w) => {
				qb.push(format!("LOWER({}) <> ", column)).push_bind(w.to_lowercase());
			}
			WalletMatch::In(ws) => {
				qb.push(format!("LOWER({}) = ANY(", column)).push_bind(ws.iter().map(|w| w.to_lowercase()).collect::<Vec<String>>()).push(")");
			}
		}
	}

	fn event_ids(&mut self, qb: &mut QueryBuilder<'_, Postgres>, ids: &[String]) {
		self.next(qb);
		qb.push("LOWER(event_id) = ANY(").push_bind(ids.iter().map(|id| id.to_lowercase()).collect::<Vec<String>>()).push(")");
	}
}

fn push_window(qb: &mut QueryBuilder<'_, Postgres>, window: Option<Window>) {
	if let Some(w) = window {
		qb.push(" LIMIT ").push_bind(i64::try_from(w.limit).unwrap_or(i64::MAX)).push(" OFFSET ").push_bind(i64::try_from(w.skip).unwrap_or(i64::MAX));
	}
}

fn push_user_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
	let mut w = Where::new();
	if let Some(wallet) = &filter.wallet {
		w.wallet(qb, "wallet_address", wallet);
	}
}

fn push_event_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
	let mut w = Where::new();
	if let Some(ids) = &filter.event_ids {
		w.event_ids(qb, ids);
	}
	if let Some(creator) = &filter.creator {
		w.wallet(qb, "user_id", creator);
	}
	if let Some(statuses) = &filter.statuses {
		w.next(qb);
		qb.push("status = ANY(").push_bind(statuses.clone()).push(")");
	}
	if let Some(currency_type) = &filter.currency_type {
		w.next(qb);
		qb.push("currency_type = ").push_bind(currency_type.clone());
	}
	if filter.has_price_level {
		w.next(qb);
		qb.push("price_level IS NOT NULL");
	}
}

fn push_order_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &OrderFilter) {
	let mut w = Where::new();
	if let Some(ids) = &filter.event_ids {
		w.event_ids(qb, ids);
	}
	if let Some(user) = &filter.user {
		w.wallet(qb, "user_id", user);
	}
	if let Some(bid_type) = filter.bid_type {
		w.next(qb);
		qb.push("bid_type = ").push_bind(bid_type);
	}
	if let Some(result) = &filter.result {
		w.next(qb);
		match result {
			ResultMatch::IsNull => {
				qb.push("result IS NULL");
			}
			ResultMatch::NullOr(v) => {
				qb.push("(result IS NULL OR result = ").push_bind(*v).push(")");
			}
			ResultMatch::Eq(v) => {
				qb.push("result = ").push_bind(*v);
			}
		}
	}
}

fn push_dispute_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &DisputeFilter) {
	let mut w = Where::new();
	if let Some(ids) = &filter.event_ids {
		w.event_ids(qb, ids);
	}
	if let Some(user) = &filter.user {
		w.wallet(qb, "user_id", user);
	}
	if let Some(status) = filter.status {
		w.next(qb);
		qb.push("status = ").push_bind(status);
	}
}

fn to_count(count: i64) -> u64 {
	u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
	async fn find_users(&self, filter: &UserFilter, window: Option<Window>) -> Result<Vec<Users>, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
		push_user_filter(&mut qb, filter);
		qb.push(" ORDER BY created_at DESC, id DESC");
		push_window(&mut qb, window);
		Ok(qb.build_query_as::<Users>().fetch_all(&self.pool).await?)
	}

	async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM users");
		push_user_filter(&mut qb, filter);
		Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
	}

	async fn find_events(&self, filter: &EventFilter, window: Option<Window>) -> Result<Vec<Events>, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM events", EVENT_COLUMNS));
		push_event_filter(&mut qb, filter);
		qb.push(" ORDER BY created_at DESC, id DESC");
		push_window(&mut qb, window);
		Ok(qb.build_query_as::<Events>().fetch_all(&self.pool).await?)
	}

	async fn count_events(&self, filter: &EventFilter) -> Result<u64, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM events");
		push_event_filter(&mut qb, filter);
		Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
	}

	async fn find_orders(&self, filter: &OrderFilter, sort: OrderSort, window: Option<Window>) -> Result<Vec<Orders>, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM orders", ORDER_COLUMNS));
		push_order_filter(&mut qb, filter);
		match sort {
			OrderSort::CreatedAsc => qb.push(" ORDER BY created_at ASC, id ASC"),
			OrderSort::UpdatedDesc => qb.push(" ORDER BY updated_at DESC, id DESC"),
		};
		push_window(&mut qb, window);
		Ok(qb.build_query_as::<Orders>().fetch_all(&self.pool).await?)
	}

	async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM orders");
		push_order_filter(&mut qb, filter);
		Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
	}

	async fn find_disputes(&self, filter: &DisputeFilter, window: Option<Window>) -> Result<Vec<Disputes>, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM disputes", DISPUTE_COLUMNS));
		push_dispute_filter(&mut qb, filter);
		qb.push(" ORDER BY created_at DESC, id DESC");
		push_window(&mut qb, window);
		Ok(qb.build_query_as::<Disputes>().fetch_all(&self.pool).await?)
	}

	async fn count_disputes(&self, filter: &DisputeFilter) -> Result<u64, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM disputes");
		push_dispute_filter(&mut qb, filter);
		Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
	}

	async fn find_currencies(&self, filter: &CurrencyFilter) -> Result<Vec<Currencies>, StoreError> {
		let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("SELECT {} FROM currencies", CURRENCY_COLUMNS));
		if let Some(symbols) = &filter.symbols {
			qb.push(" WHERE symbol = ANY(").push_bind(symbols.clone()).push(")");
		}
		qb.push(" ORDER BY symbol ASC");
		Ok(qb.build_query_as::<Currencies>().fetch_all(&self.pool).await?)
	}
}
