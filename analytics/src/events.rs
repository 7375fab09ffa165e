use {
	crate::{
		classifier::EventStatus,
		engine::Analytics,
		error::EngineError,
		join::{distinct_keys, index_by, join_key, single},
		metrics::{self, PriceDelta},
		pagination::Pagination,
		response::{ApiResponse, MSG_FETCH_EVENTS_SUCCESS, MSG_FETCH_SUCCESS, Page, respond, respond_page},
		store::{CurrencyFilter, DisputeFilter, EventFilter, OrderFilter, OrderSort, WalletMatch},
	},
	chrono::{DateTime, Utc},
	common::{
		consts::is_meaningful_param,
		model::{Currencies, Events},
	},
	rust_decimal::Decimal,
	serde::{Deserialize, Serialize},
	std::collections::HashSet,
};

/// 公开市场列表的排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSort {
	/// 截止时间升序
	ClosingSoon,
	/// 创建时间倒序
	NewlyAdded,
	/// 目标价倒序 只包含有目标价的市场
	Price,
	/// 成交量倒序
	Volume,
	Default,
}

impl EventSort {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(str::trim) {
			Some("closingSoon") => EventSort::ClosingSoon,
			Some("newlyAdded") => EventSort::NewlyAdded,
			Some("price") => EventSort::Price,
			Some("volume") => EventSort::Volume,
			_ => EventSort::Default,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
	pub search: Option<String>,
	pub filter_coin: Option<String>,
	pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySummary {
	pub symbol: String,
	pub name: String,
	pub price: Decimal,
	pub precision: i32,
}

impl From<&Currencies> for CurrencySummary {
	fn from(c: &Currencies) -> Self {
		Self { symbol: c.symbol.clone(), name: c.name.clone(), price: c.price, precision: c.precision }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListing {
	#[serde(flatten)]
	pub event: Events,
	pub currency: CurrencySummary,
	pub current_price: Decimal,
	pub total_volume: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetails {
	#[serde(flatten)]
	pub event: Events,
	pub currency: CurrencySummary,
	#[serde(flatten)]
	pub delta: PriceDelta,
	pub total_no_of_bet: u64,
	pub no_bet_yet: bool,
}

/// 用户自己创建的市场的状态筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedEventFilter {
	Open,
	Closed,
	All,
}

impl CreatedEventFilter {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
			Some("open") => CreatedEventFilter::Open,
			Some("closed") => CreatedEventFilter::Closed,
			_ => CreatedEventFilter::All,
		}
	}

	fn statuses(&self) -> Option<Vec<i16>> {
		match self {
			CreatedEventFilter::Open => Some(vec![EventStatus::Open.as_i16()]),
			CreatedEventFilter::Closed => Some(vec![EventStatus::Closed.as_i16()]),
			CreatedEventFilter::All => None,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEventRow {
	#[serde(flatten)]
	pub event: Events,
	pub no_of_bets: u64,
	pub volume: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStake {
	pub amount: Decimal,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeEligibleEvent {
	#[serde(flatten)]
	pub event: Events,
	pub orders: Vec<OrderStake>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Analytics {
	/// 公开市场列表 只包含进行中的市场
	/// 成交量要在关联订单后才能算 所以先全量聚合再排序分页
	pub async fn event_list_page(&self, query: &EventListQuery, pagination: Pagination) -> Result<Page<EventListing>, EngineError> {
		let sort = EventSort::parse(query.sort.as_deref());
		let event_filter = EventFilter {
			statuses: Some(vec![EventStatus::Open.as_i16()]),
			currency_type: if is_meaningful_param(query.filter_coin.as_deref()) { query.filter_coin.as_deref().map(|c| c.trim().to_string()) } else { None },
			has_price_level: sort == EventSort::Price,
			..Default::default()
		};
		let events = self.store().find_events(&event_filter, None).await?;
		if events.is_empty() {
			return Ok(Page::new(Vec::new(), 0));
		}

		let currency_filter = CurrencyFilter { symbols: Some(events.iter().map(|e| e.currency_type.clone()).collect::<HashSet<String>>().into_iter().collect()) };
		let order_filter = OrderFilter { event_ids: Some(distinct_keys(events.iter().map(|e| e.event_id.as_str()))), ..Default::default() };
		let (currencies, orders) = tokio::try_join!(self.store().find_currencies(&currency_filter), self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None))?;
		let order_index = index_by(&orders, |o| o.event_id.as_str());

		let search = if is_meaningful_param(query.search.as_deref()) { query.search.as_deref().map(str::trim) } else { None };
		let mut rows = Vec::with_capacity(events.len());
		for event in events {
			// 没有对应币种的市场不展示
			let Some(currency) = single(currencies.iter().filter(|c| c.symbol == event.currency_type), "currency", &event.currency_type)? else {
				continue;
			};
			if let Some(term) = search
				&& !contains_ignore_case(&currency.name, term)
				&& !contains_ignore_case(&currency.symbol, term)
			{
				continue;
			}
			let event_orders = order_index.get(&join_key(&event.event_id)).map(|v| v.as_slice()).unwrap_or(&[]);
			let total_volume = metrics::event_volume(event_orders.iter().copied())?;
			rows.push(EventListing { currency: CurrencySummary::from(currency), current_price: currency.price, total_volume, event });
		}

		// 存储层已经按创建时间倒序 稳定排序保证同值时仍是新的在前
		match sort {
			EventSort::ClosingSoon => rows.sort_by(|a, b| a.event.event_expire_time.cmp(&b.event.event_expire_time)),
			EventSort::Price => rows.sort_by(|a, b| b.event.price_level.cmp(&a.event.price_level)),
			EventSort::Volume => rows.sort_by(|a, b| b.total_volume.cmp(&a.total_volume)),
			EventSort::NewlyAdded | EventSort::Default => {}
		}

		let total = rows.len() as u64;
		Ok(Page::new(pagination.slice(rows), total))
	}

	pub async fn list_events(&self, query: &EventListQuery, pagination: Pagination) -> ApiResponse<Page<EventListing>> {
		respond_page("list_events", self.event_list_page(query, pagination).await, MSG_FETCH_EVENTS_SUCCESS)
	}

	/// 市场详情 附带当前价与目标价的偏离
	pub async fn event_details_data(&self, event_id: &str) -> Result<Option<EventDetails>, EngineError> {
		let event_filter = EventFilter { event_ids: Some(vec![event_id.to_string()]), ..Default::default() };
		let events = self.store().find_events(&event_filter, None).await?;
		let Some(event) = single(events.iter(), "event", event_id)? else {
			return Ok(None);
		};

		let currency_filter = CurrencyFilter { symbols: Some(vec![event.currency_type.clone()]) };
		let order_filter = OrderFilter { event_ids: Some(vec![event.event_id.clone()]), ..Default::default() };
		let (currencies, total_no_of_bet) = tokio::try_join!(self.store().find_currencies(&currency_filter), self.store().count_orders(&order_filter))?;
		let currency = single(currencies.iter(), "currency", &event.currency_type)?.ok_or_else(|| EngineError::integrity(format!("event {} references unknown currency {}", event.event_id, event.currency_type)))?;

		let delta = metrics::price_delta(currency.price, event.price_level)?;
		Ok(Some(EventDetails { event: event.clone(), currency: CurrencySummary::from(currency), delta, total_no_of_bet, no_bet_yet: total_no_of_bet == 0 }))
	}

	pub async fn event_details(&self, event_id: &str) -> ApiResponse<EventDetails> {
		respond("event_details", self.event_details_data(event_id).await, MSG_FETCH_SUCCESS)
	}

	/// 用户创建的市场 带下注笔数和下注总额
	pub async fn user_events_page(&self, wallet: &str, filter: CreatedEventFilter, pagination: Pagination) -> Result<Page<CreatedEventRow>, EngineError> {
		let event_filter = EventFilter { creator: Some(WalletMatch::Eq(wallet.to_string())), statuses: filter.statuses(), ..Default::default() };
		let (total, events) = tokio::try_join!(self.store().count_events(&event_filter), self.store().find_events(&event_filter, Some(pagination.window())))?;
		if events.is_empty() {
			return Ok(Page::new(Vec::new(), total));
		}

		let order_filter = OrderFilter { event_ids: Some(distinct_keys(events.iter().map(|e| e.event_id.as_str()))), ..Default::default() };
		let orders = self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None).await?;

		let mut rows = Vec::with_capacity(events.len());
		for event in events {
			// 按市场标识重新过滤一次（忽略大小写）
			let event_orders: Vec<_> = orders.iter().filter(|o| o.event_id.eq_ignore_ascii_case(&event.event_id)).cloned().collect();
			let volume = metrics::volume_traded(&event_orders)?;
			rows.push(CreatedEventRow { no_of_bets: event_orders.len() as u64, volume, event });
		}
		Ok(Page::new(rows, total))
	}

	pub async fn user_events(&self, wallet: &str, filter: CreatedEventFilter, pagination: Pagination) -> ApiResponse<Page<CreatedEventRow>> {
		respond_page("user_events", self.user_events_page(wallet, filter, pagination).await, MSG_FETCH_EVENTS_SUCCESS)
	}

	/// 可以发起争议的市场: 用户创建的 已出结果 有人下注 且该用户还没对它发起过争议
	pub async fn dispute_eligible_data(&self, wallet: &str) -> Result<Vec<DisputeEligibleEvent>, EngineError> {
		let event_filter = EventFilter { creator: Some(WalletMatch::Eq(wallet.to_string())), statuses: Some(vec![EventStatus::ResultDeclared.as_i16()]), ..Default::default() };
		let events = self.store().find_events(&event_filter, None).await?;
		if events.is_empty() {
			return Ok(Vec::new());
		}

		let event_ids = distinct_keys(events.iter().map(|e| e.event_id.as_str()));
		let order_filter = OrderFilter { event_ids: Some(event_ids.clone()), ..Default::default() };
		let dispute_filter = DisputeFilter { event_ids: Some(event_ids), user: Some(WalletMatch::Eq(wallet.to_string())), ..Default::default() };
		let (orders, disputes) = tokio::try_join!(self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None), self.store().find_disputes(&dispute_filter, None))?;
		let order_index = index_by(&orders, |o| o.event_id.as_str());
		let dispute_index = index_by(&disputes, |d| d.event_id.as_str());

		let mut rows = Vec::new();
		for event in events {
			let key = join_key(&event.event_id);
			let stakes: Vec<OrderStake> = order_index
				.get(&key)
				.map(|orders| orders.iter().filter(|o| !o.user_id.is_empty()).map(|o| OrderStake { amount: o.amount, updated_at: o.updated_at }).collect())
				.unwrap_or_default();
			if stakes.is_empty() {
				continue;
			}
			// 争议按 (市场, 市场创建者) 判重
			let already_disputed = dispute_index.get(&key).is_some_and(|ds| ds.iter().any(|d| d.user_id.eq_ignore_ascii_case(&event.user_id)));
			if already_disputed {
				continue;
			}
			rows.push(DisputeEligibleEvent { event, orders: stakes });
		}
		Ok(rows)
	}

	pub async fn dispute_eligible_events(&self, wallet: &str) -> ApiResponse<Vec<DisputeEligibleEvent>> {
		let result = self.dispute_eligible_data(wallet).await.map(|rows| if rows.is_empty() { None } else { Some(rows) });
		respond("dispute_eligible_events", result, MSG_FETCH_SUCCESS)
	}
}
