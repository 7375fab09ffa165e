//! 后台统计视图
//!
//! 用户/市场/争议的派生字段（下注数 争议数 创建市场数 奖励）从不落库 每次查询时现算
//! 钱包关联之后一律再按钱包精确过滤一次

use {
	crate::{
		classifier::AdminPositionIntent,
		engine::Analytics,
		error::EngineError,
		events::CurrencySummary,
		join::{distinct_keys, index_by, join_key, lookup_single, refilter_by_wallet, single},
		metrics,
		pagination::Pagination,
		response::{ApiResponse, MSG_FETCH_SUCCESS, MSG_FETCH_USER_SUCCESS, Page, respond, respond_page},
		store::{CurrencyFilter, DisputeFilter, EventFilter, OrderFilter, OrderSort, UserFilter, WalletMatch},
	},
	chrono::{DateTime, Utc},
	common::model::{Currencies, DisputeStatus, Disputes, Events, Users},
	rust_decimal::Decimal,
	serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
	#[serde(flatten)]
	pub user: Users,
	pub no_of_bets: u64,
	pub no_of_disputes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreator {
	#[serde(flatten)]
	pub user: Users,
	pub no_of_events: u64,
	pub rewards: Decimal,
}

/// 后台持仓视图的范围 相对于管理员钱包
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminScope {
	/// 管理员自己创建的市场
	Admin,
	/// 非管理员创建的市场
	User,
	All,
}

impl AdminScope {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
			Some("admin") => AdminScope::Admin,
			Some("user") => AdminScope::User,
			_ => AdminScope::All,
		}
	}

	fn creator_match(&self, admin_wallet: &str) -> Option<WalletMatch> {
		match self {
			AdminScope::Admin => Some(WalletMatch::Eq(admin_wallet.to_string())),
			AdminScope::User => Some(WalletMatch::Ne(admin_wallet.to_string())),
			AdminScope::All => None,
		}
	}
}

/// 平台范围的市场汇总 与单个用户无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPositionRow {
	#[serde(flatten)]
	pub event: Events,
	pub total_amount: Decimal,
	pub transaction_count: u64,
	pub no_bet_yet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeRow {
	#[serde(flatten)]
	pub dispute: Disputes,
	pub target_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisputeStatusFilter {
	Open,
	Closed,
	All,
}

impl DisputeStatusFilter {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
			Some("open") => DisputeStatusFilter::Open,
			Some("closed") => DisputeStatusFilter::Closed,
			_ => DisputeStatusFilter::All,
		}
	}

	fn status(&self) -> Option<DisputeStatus> {
		match self {
			DisputeStatusFilter::Open => Some(DisputeStatus::Open),
			DisputeStatusFilter::Closed => Some(DisputeStatus::Closed),
			DisputeStatusFilter::All => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTotals {
	pub total_users: u64,
	pub total_event_creators: u64,
	pub total_events: u64,
	pub total_transactions: u64,
	pub total_disputes: u64,
	pub total_volume: Decimal,
}

impl Analytics {
	/// 用户列表 附带下注数和争议数
	pub async fn user_roster_page(&self, pagination: Pagination) -> Result<Page<UserActivity>, EngineError> {
		let user_filter = UserFilter::default();
		let (total, users) = tokio::try_join!(self.store().count_users(&user_filter), self.store().find_users(&user_filter, Some(pagination.window())))?;
		if users.is_empty() {
			return Ok(Page::new(Vec::new(), total));
		}

		let wallets = WalletMatch::In(distinct_keys(users.iter().map(|u| u.wallet_address.as_str())));
		let order_filter = OrderFilter { user: Some(wallets.clone()), ..Default::default() };
		let dispute_filter = DisputeFilter { user: Some(wallets), ..Default::default() };
		let (orders, disputes) = tokio::try_join!(self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None), self.store().find_disputes(&dispute_filter, None))?;

		let rows = users
			.into_iter()
			.map(|user| {
				let no_of_bets = refilter_by_wallet(&orders, &user.wallet_address, |o| o.user_id.as_str()).len() as u64;
				let no_of_disputes = refilter_by_wallet(&disputes, &user.wallet_address, |d| d.user_id.as_str()).len() as u64;
				UserActivity { user, no_of_bets, no_of_disputes }
			})
			.collect();
		Ok(Page::new(rows, total))
	}

	pub async fn user_roster(&self, pagination: Pagination) -> ApiResponse<Page<UserActivity>> {
		respond_page("user_roster", self.user_roster_page(pagination).await, MSG_FETCH_USER_SUCCESS)
	}

	/// 市场创建者列表 只保留至少创建过一个市场的用户
	/// total 来自同一套关联结果 而不是用户表总数
	pub async fn event_creator_page(&self, pagination: Pagination) -> Result<Page<EventCreator>, EngineError> {
		let events = self.store().find_events(&EventFilter::default(), None).await?;
		if events.is_empty() {
			return Ok(Page::new(Vec::new(), 0));
		}

		let user_filter = UserFilter { wallet: Some(WalletMatch::In(distinct_keys(events.iter().map(|e| e.user_id.as_str())))) };
		let users = self.store().find_users(&user_filter, None).await?;

		let mut creators = Vec::with_capacity(users.len());
		for user in users {
			let created = refilter_by_wallet(&events, &user.wallet_address, |e| e.user_id.as_str());
			if created.is_empty() {
				continue;
			}
			let rewards = created.iter().filter_map(|e| e.reward).try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r)).ok_or_else(|| EngineError::integrity(format!("reward sum overflow for {}", user.wallet_address)))?;
			creators.push(EventCreator { no_of_events: created.len() as u64, rewards, user });
		}

		let total = creators.len() as u64;
		Ok(Page::new(pagination.slice(creators), total))
	}

	pub async fn event_creator_roster(&self, pagination: Pagination) -> ApiResponse<Page<EventCreator>> {
		respond_page("event_creator_roster", self.event_creator_page(pagination).await, MSG_FETCH_USER_SUCCESS)
	}

	/// 后台市场持仓汇总 状态集合用后台分类器（closed 不含 4）
	pub async fn admin_positions_page(&self, scope: AdminScope, admin_wallet: &str, intent: AdminPositionIntent, pagination: Pagination) -> Result<Page<AdminPositionRow>, EngineError> {
		let event_filter = EventFilter { creator: scope.creator_match(admin_wallet), statuses: intent.status_set().map(|s| s.to_vec()), ..Default::default() };
		let (total, events) = tokio::try_join!(self.store().count_events(&event_filter), self.store().find_events(&event_filter, Some(pagination.window())))?;
		if events.is_empty() {
			return Ok(Page::new(Vec::new(), total));
		}

		let order_filter = OrderFilter { event_ids: Some(distinct_keys(events.iter().map(|e| e.event_id.as_str()))), ..Default::default() };
		let orders = self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None).await?;
		let order_index = index_by(&orders, |o| o.event_id.as_str());

		let mut rows = Vec::with_capacity(events.len());
		for event in events {
			let event_orders: Vec<_> = order_index.get(&join_key(&event.event_id)).map(|v| v.iter().map(|o| (*o).clone()).collect()).unwrap_or_default();
			let total_amount = metrics::volume_traded(&event_orders)?;
			let transaction_count = event_orders.len() as u64;
			rows.push(AdminPositionRow { total_amount, transaction_count, no_bet_yet: transaction_count == 0, event });
		}
		Ok(Page::new(rows, total))
	}

	pub async fn admin_positions(&self, scope: AdminScope, admin_wallet: &str, intent: AdminPositionIntent, pagination: Pagination) -> ApiResponse<Page<AdminPositionRow>> {
		respond_page("admin_positions", self.admin_positions_page(scope, admin_wallet, intent, pagination).await, MSG_FETCH_SUCCESS)
	}

	/// 全部争议 附带对应市场的判定时间
	pub async fn dispute_list_page(&self, pagination: Pagination) -> Result<Page<DisputeRow>, EngineError> {
		let dispute_filter = DisputeFilter::default();
		let (total, disputes) = tokio::try_join!(self.store().count_disputes(&dispute_filter), self.store().find_disputes(&dispute_filter, Some(pagination.window())))?;
		if disputes.is_empty() {
			return Ok(Page::new(Vec::new(), total));
		}

		let event_filter = EventFilter { event_ids: Some(distinct_keys(disputes.iter().map(|d| d.event_id.as_str()))), ..Default::default() };
		let events = self.store().find_events(&event_filter, None).await?;
		let event_index = index_by(&events, |e| e.event_id.as_str());

		let mut rows = Vec::with_capacity(disputes.len());
		for dispute in disputes {
			let target_date_time = lookup_single(&event_index, "event", &dispute.event_id)?.map(|e| e.target_date_time);
			rows.push(DisputeRow { target_date_time, dispute });
		}
		Ok(Page::new(rows, total))
	}

	pub async fn dispute_list(&self, pagination: Pagination) -> ApiResponse<Page<DisputeRow>> {
		respond_page("dispute_list", self.dispute_list_page(pagination).await, MSG_FETCH_SUCCESS)
	}

	/// 用户自己发起的争议
	pub async fn user_disputes_page(&self, wallet: &str, status: DisputeStatusFilter, pagination: Pagination) -> Result<Page<Disputes>, EngineError> {
		let filter = DisputeFilter { user: Some(WalletMatch::Eq(wallet.to_string())), status: status.status(), ..Default::default() };
		let (total, disputes) = tokio::try_join!(self.store().count_disputes(&filter), self.store().find_disputes(&filter, Some(pagination.window())))?;
		Ok(Page::new(disputes, total))
	}

	pub async fn user_disputes(&self, wallet: &str, status: DisputeStatusFilter, pagination: Pagination) -> ApiResponse<Page<Disputes>> {
		respond_page("user_disputes", self.user_disputes_page(wallet, status, pagination).await, MSG_FETCH_SUCCESS)
	}

	/// 平台汇总 空账本全部为 0
	pub async fn platform_totals_data(&self) -> Result<PlatformTotals, EngineError> {
		let user_filter = UserFilter::default();
		let dispute_filter = DisputeFilter::default();
		let event_filter = EventFilter::default();
		let order_filter = OrderFilter::default();
		let (total_users, total_disputes, events, orders) = tokio::try_join!(
			self.store().count_users(&user_filter),
			self.store().count_disputes(&dispute_filter),
			self.store().find_events(&event_filter, None),
			self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None)
		)?;

		let total_event_creators = distinct_keys(events.iter().map(|e| e.user_id.as_str())).len() as u64;
		Ok(PlatformTotals {
			total_users,
			total_event_creators,
			total_events: events.len() as u64,
			total_transactions: (events.len() + orders.len()) as u64,
			total_disputes,
			total_volume: metrics::volume_traded(&orders)?,
		})
	}

	pub async fn platform_totals(&self) -> ApiResponse<PlatformTotals> {
		respond("platform_totals", self.platform_totals_data().await.map(Some), MSG_FETCH_SUCCESS)
	}

	/// 全部币种（行情页）
	pub async fn currencies(&self) -> ApiResponse<Vec<Currencies>> {
		let result = self.store().find_currencies(&CurrencyFilter::default()).await.map(|rows| if rows.is_empty() { None } else { Some(rows) }).map_err(EngineError::from);
		respond("currencies", result, MSG_FETCH_SUCCESS)
	}

	pub async fn currency_price_data(&self, symbol: &str) -> Result<Option<CurrencySummary>, EngineError> {
		let filter = CurrencyFilter { symbols: Some(vec![symbol.to_string()]) };
		let currencies = self.store().find_currencies(&filter).await?;
		Ok(single(currencies.iter(), "currency", symbol)?.map(CurrencySummary::from))
	}

	pub async fn currency_price(&self, symbol: &str) -> ApiResponse<CurrencySummary> {
		respond("currency_price", self.currency_price_data(symbol).await, MSG_FETCH_SUCCESS)
	}
}
