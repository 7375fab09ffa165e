use {
	super::{CurrencyFilter, DisputeFilter, EventFilter, LedgerStore, OrderFilter, OrderSort, StoreError, UserFilter, Window},
	async_trait::async_trait,
	common::model::{Currencies, Disputes, Events, Orders, Users},
	tokio::sync::RwLock,
};

/// 内存账本 用于测试和本地调试 过滤语义与 Postgres 实现保持一致
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
	users: RwLock<Vec<Users>>,
	events: RwLock<Vec<Events>>,
	orders: RwLock<Vec<Orders>>,
	disputes: RwLock<Vec<Disputes>>,
	currencies: RwLock<Vec<Currencies>>,
}

fn apply_window<T>(rows: Vec<T>, window: Option<Window>) -> Vec<T> {
	match window {
		Some(w) => {
			let skip = usize::try_from(w.skip).unwrap_or(usize::MAX);
			let limit = usize::try_from(w.limit).unwrap_or(usize::MAX);
			rows.into_iter().skip(skip).take(limit).collect()
		}
		None => rows,
	}
}

impl MemoryLedgerStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn insert_user(&self, user: Users) {
		self.users.write().await.push(user);
	}

	pub async fn insert_event(&self, event: Events) {
		self.events.write().await.push(event);
	}

	pub async fn insert_order(&self, order: Orders) {
		self.orders.write().await.push(order);
	}

	pub async fn insert_dispute(&self, dispute: Disputes) {
		self.disputes.write().await.push(dispute);
	}

	pub async fn insert_currency(&self, currency: Currencies) {
		self.currencies.write().await.push(currency);
	}
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
	async fn find_users(&self, filter: &UserFilter, window: Option<Window>) -> Result<Vec<Users>, StoreError> {
		let mut rows: Vec<Users> = self.users.read().await.iter().filter(|u| filter.matches(u)).cloned().collect();
		rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
		Ok(apply_window(rows, window))
	}

	async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError> {
		Ok(self.users.read().await.iter().filter(|u| filter.matches(u)).count() as u64)
	}

	async fn find_events(&self, filter: &EventFilter, window: Option<Window>) -> Result<Vec<Events>, StoreError> {
		let mut rows: Vec<Events> = self.events.read().await.iter().filter(|e| filter.matches(e)).cloned().collect();
		rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
		Ok(apply_window(rows, window))
	}

	async fn count_events(&self, filter: &EventFilter) -> Result<u64, StoreError> {
		Ok(self.events.read().await.iter().filter(|e| filter.matches(e)).count() as u64)
	}

	async fn find_orders(&self, filter: &OrderFilter, sort: OrderSort, window: Option<Window>) -> Result<Vec<Orders>, StoreError> {
		let mut rows: Vec<Orders> = self.orders.read().await.iter().filter(|o| filter.matches(o)).cloned().collect();
		match sort {
			OrderSort::CreatedAsc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
			OrderSort::UpdatedDesc => rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id))),
		}
		Ok(apply_window(rows, window))
	}

	async fn count_orders(&self, filter: &OrderFilter) -> Result<u64, StoreError> {
		Ok(self.orders.read().await.iter().filter(|o| filter.matches(o)).count() as u64)
	}

	async fn find_disputes(&self, filter: &DisputeFilter, window: Option<Window>) -> Result<Vec<Disputes>, StoreError> {
		let mut rows: Vec<Disputes> = self.disputes.read().await.iter().filter(|d| filter.matches(d)).cloned().collect();
		rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
		Ok(apply_window(rows, window))
	}

	async fn count_disputes(&self, filter: &DisputeFilter) -> Result<u64, StoreError> {
		Ok(self.disputes.read().await.iter().filter(|d| filter.matches(d)).count() as u64)
	}

	async fn find_currencies(&self, filter: &CurrencyFilter) -> Result<Vec<Currencies>, StoreError> {
		let mut rows: Vec<Currencies> = self.currencies.read().await.iter().filter(|c| filter.matches(c)).cloned().collect();
		rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
		Ok(rows)
	}
}
