//! 用户持仓与订单流水
//!
//! 持仓按 bid_type 拆成 true/false 两条独立管道 同一用户可以同时持有一个市场的两边
//! 每条管道: 订单关联市场 -> 状态/结果过滤 -> 每个市场只留最新一条 -> 摊平市场字段

use {
	crate::{
		classifier::PositionIntent,
		engine::Analytics,
		error::EngineError,
		join::{distinct_keys, index_by, join_key, latest_per_key, lookup_single, refilter_by_wallet, single},
		pagination::Pagination,
		response::{ApiResponse, MSG_FETCH_SUCCESS, Page, respond, respond_page},
		store::{EventFilter, OrderFilter, OrderSort, ResultMatch, UserFilter, WalletMatch},
	},
	chrono::{DateTime, Utc},
	common::model::{BidType, Orders, Users},
	rust_decimal::Decimal,
	serde::{Deserialize, Serialize},
};

/// 持仓行: 最新订单 + 摊平后的市场字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRow {
	#[serde(flatten)]
	pub order: Orders,
	pub event_status: i16,
	pub target_date_time: DateTime<Utc>,
	pub price_level: Option<Decimal>,
	pub currency_type: String,
}

/// 订单流水的类型筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFilter {
	Yes,
	No,
	Withdraw,
	Claimed,
	All,
}

impl ActivityFilter {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
			Some("yes") => ActivityFilter::Yes,
			Some("no") => ActivityFilter::No,
			Some("withdraw") => ActivityFilter::Withdraw,
			Some("claimed") => ActivityFilter::Claimed,
			_ => ActivityFilter::All,
		}
	}

	pub fn bid_type(&self) -> Option<BidType> {
		match self {
			ActivityFilter::Yes => Some(BidType::True),
			ActivityFilter::No => Some(BidType::False),
			ActivityFilter::Withdraw => Some(BidType::Withdraw),
			ActivityFilter::Claimed => Some(BidType::Claimed),
			ActivityFilter::All => None,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRow {
	#[serde(flatten)]
	pub order: Orders,
	pub user: Option<Users>,
	pub target_date_time: Option<DateTime<Utc>>,
	pub price_level: Option<Decimal>,
	pub currency_type: Option<String>,
}

fn result_match(intent: PositionIntent) -> Option<ResultMatch> {
	match intent {
		PositionIntent::Open => Some(ResultMatch::IsNull),
		PositionIntent::Closed => Some(ResultMatch::NullOr(1)),
		PositionIntent::All => None,
	}
}

impl Analytics {
	/// 单边持仓管道
	async fn position_pipeline(&self, wallet: &str, intent: PositionIntent, bid_type: BidType) -> Result<Vec<PositionRow>, EngineError> {
		let order_filter = OrderFilter { user: Some(WalletMatch::Eq(wallet.to_string())), bid_type: Some(bid_type), result: result_match(intent), ..Default::default() };
		let orders = self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None).await?;
		if orders.is_empty() {
			return Ok(Vec::new());
		}

		let event_filter = EventFilter { event_ids: Some(distinct_keys(orders.iter().map(|o| o.event_id.as_str()))), statuses: intent.status_set().map(|s| s.to_vec()), ..Default::default() };
		let events = self.store().find_events(&event_filter, None).await?;
		let event_index = index_by(&events, |e| e.event_id.as_str());

		let mut matched = Vec::with_capacity(orders.len());
		for order in orders {
			if !intent.order_eligible(order.result) {
				continue;
			}
			// 市场不在状态集合里 这笔订单不产生任何行
			let Some(event) = lookup_single(&event_index, "event", &order.event_id)? else {
				continue;
			};
			matched.push(PositionRow {
				event_status: event.status,
				target_date_time: event.target_date_time,
				price_level: event.price_level,
				currency_type: event.currency_type.clone(),
				order,
			});
		}

		Ok(latest_per_key(matched, |row| join_key(&row.order.event_id)))
	}

	/// 用户持仓 两条管道并发执行 合并后按创建时间倒序分页
	pub async fn position_page(&self, wallet: &str, intent: PositionIntent, pagination: Pagination) -> Result<Page<PositionRow>, EngineError> {
		let (mut rows, no_rows) = tokio::try_join!(self.position_pipeline(wallet, intent, BidType::True), self.position_pipeline(wallet, intent, BidType::False))?;
		rows.extend(no_rows);
		rows.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at).then(b.order.id.cmp(&a.order.id)));

		let total = rows.len() as u64;
		Ok(Page::new(pagination.slice(rows), total))
	}

	pub async fn positions(&self, wallet: &str, intent: PositionIntent, pagination: Pagination) -> ApiResponse<Page<PositionRow>> {
		respond_page("positions", self.position_page(wallet, intent, pagination).await, MSG_FETCH_SUCCESS)
	}

	async fn latest_bet(&self, wallet: &str, event_id: &str, bid_type: BidType) -> Result<Option<Orders>, EngineError> {
		let filter = OrderFilter { event_ids: Some(vec![event_id.to_string()]), user: Some(WalletMatch::Eq(wallet.to_string())), bid_type: Some(bid_type), ..Default::default() };
		let mut orders = self.store().find_orders(&filter, OrderSort::CreatedAsc, None).await?;
		Ok(orders.pop())
	}

	/// 用户在某个市场上 yes 和 no 各自最新的一笔下注
	pub async fn event_bets(&self, wallet: &str, event_id: &str) -> ApiResponse<Vec<Orders>> {
		let result = tokio::try_join!(self.latest_bet(wallet, event_id, BidType::True), self.latest_bet(wallet, event_id, BidType::False)).map(|(yes, no)| {
			let bets: Vec<Orders> = yes.into_iter().chain(no).collect();
			if bets.is_empty() { None } else { Some(bets) }
		});
		respond("event_bets", result, MSG_FETCH_SUCCESS)
	}

	/// 订单流水 按更新时间倒序 wallet 为空时查全平台
	pub async fn activity_page(&self, wallet: Option<&str>, filter: ActivityFilter, pagination: Pagination) -> Result<Page<ActivityRow>, EngineError> {
		let order_filter = OrderFilter { user: wallet.map(|w| WalletMatch::Eq(w.to_string())), bid_type: filter.bid_type(), ..Default::default() };
		let (total, orders) = tokio::try_join!(self.store().count_orders(&order_filter), self.store().find_orders(&order_filter, OrderSort::UpdatedDesc, Some(pagination.window())))?;
		if orders.is_empty() {
			return Ok(Page::new(Vec::new(), total));
		}

		let user_filter = UserFilter { wallet: Some(WalletMatch::In(distinct_keys(orders.iter().map(|o| o.user_id.as_str())))) };
		let event_filter = EventFilter { event_ids: Some(distinct_keys(orders.iter().map(|o| o.event_id.as_str()))), ..Default::default() };
		let (users, events) = tokio::try_join!(self.store().find_users(&user_filter, None), self.store().find_events(&event_filter, None))?;
		let event_index = index_by(&events, |e| e.event_id.as_str());

		let mut rows = Vec::with_capacity(orders.len());
		for order in orders {
			let user = single(refilter_by_wallet(&users, &order.user_id, |u| u.wallet_address.as_str()), "user", &order.user_id)?.cloned();
			let event = lookup_single(&event_index, "event", &order.event_id)?;
			rows.push(ActivityRow {
				user,
				target_date_time: event.map(|e| e.target_date_time),
				price_level: event.and_then(|e| e.price_level),
				currency_type: event.map(|e| e.currency_type.clone()),
				order,
			});
		}
		Ok(Page::new(rows, total))
	}

	pub async fn order_activity(&self, wallet: Option<&str>, filter: ActivityFilter, pagination: Pagination) -> ApiResponse<Page<ActivityRow>> {
		respond_page("order_activity", self.activity_page(wallet, filter, pagination).await, MSG_FETCH_SUCCESS)
	}

	/// 市场上的订单笔数 没有订单返回 0
	pub async fn total_bet_on_event(&self, event_id: &str) -> ApiResponse<u64> {
		let filter = OrderFilter { event_ids: Some(vec![event_id.to_string()]), ..Default::default() };
		let result = self.store().count_orders(&filter).await.map(Some).map_err(EngineError::from);
		respond("total_bet_on_event", result, MSG_FETCH_SUCCESS)
	}
}
