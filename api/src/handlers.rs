use {
	crate::{
		api_types::{ActivityQuery, DisputesQuery, EventIdQuery, EventListParams, PositionsQuery, SymbolQuery, UserEventsQuery, required},
		server::{AppState, ClientInfo},
	},
	analytics::{
		ApiErrorCode, ApiResponse, Page,
		admin::DisputeStatusFilter,
		classifier::PositionIntent,
		events::{CreatedEventFilter, CurrencySummary, DisputeEligibleEvent, EventDetails, EventListQuery, EventListing, CreatedEventRow},
		metrics::{NetPosition, Payout},
		positions::{ActivityFilter, ActivityRow, PositionRow},
	},
	axum::{
		Extension, Json,
		extract::{Query, State},
	},
	common::model::{Currencies, Disputes, Orders},
	rust_decimal::Decimal,
};

/// 用户态接口必须带钱包地址
fn require_wallet<'a>(client_info: &'a ClientInfo, route: &str) -> Option<&'a str> {
	let wallet = client_info.wallet.as_deref();
	if wallet.is_none() {
		tracing::warn!("request_id={} - Missing wallet address for {}", client_info.request_id, route);
	}
	wallet
}

fn missing_param<T>(client_info: &ClientInfo, name: &str) -> Json<ApiResponse<T>> {
	tracing::warn!("request_id={} - Missing required parameter {}", client_info.request_id, name);
	Json(ApiResponse::failure(ApiErrorCode::InvalidParameter))
}

fn unauthorized<T>() -> Json<ApiResponse<T>> {
	Json(ApiResponse::failure(ApiErrorCode::Unauthorized))
}

/// 公开市场列表
pub async fn handle_events(State(state): State<AppState>, Query(params): Query<EventListParams>) -> Json<ApiResponse<Page<EventListing>>> {
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	let query = EventListQuery { search: params.search, filter_coin: params.filter_coin, sort: params.sort };
	Json(state.analytics.list_events(&query, pagination).await)
}

pub async fn handle_event_details(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<EventIdQuery>) -> Json<ApiResponse<EventDetails>> {
	let Some(event_id) = required(&params.event_id) else {
		return missing_param(&client_info, "event_id");
	};
	Json(state.analytics.event_details(event_id).await)
}

pub async fn handle_event_total_bets(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<EventIdQuery>) -> Json<ApiResponse<u64>> {
	let Some(event_id) = required(&params.event_id) else {
		return missing_param(&client_info, "event_id");
	};
	Json(state.analytics.total_bet_on_event(event_id).await)
}

pub async fn handle_currencies(State(state): State<AppState>) -> Json<ApiResponse<Vec<Currencies>>> {
	Json(state.analytics.currencies().await)
}

pub async fn handle_currency_price(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<SymbolQuery>) -> Json<ApiResponse<CurrencySummary>> {
	let Some(symbol) = required(&params.symbol) else {
		return missing_param(&client_info, "symbol");
	};
	Json(state.analytics.currency_price(symbol).await)
}

/// 用户持仓（open/closed）
pub async fn handle_positions(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<PositionsQuery>) -> Json<ApiResponse<Page<PositionRow>>> {
	let Some(wallet) = require_wallet(&client_info, "positions") else {
		return unauthorized();
	};
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.positions(wallet, PositionIntent::parse(params.status.as_deref()), pagination).await)
}

/// 订单流水 没有钱包时返回全平台流水
pub async fn handle_activity(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<ActivityQuery>) -> Json<ApiResponse<Page<ActivityRow>>> {
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.order_activity(client_info.wallet.as_deref(), ActivityFilter::parse(params.filter.as_deref()), pagination).await)
}

pub async fn handle_event_bets(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<EventIdQuery>) -> Json<ApiResponse<Vec<Orders>>> {
	let Some(wallet) = require_wallet(&client_info, "event_bets") else {
		return unauthorized();
	};
	let Some(event_id) = required(&params.event_id) else {
		return missing_param(&client_info, "event_id");
	};
	Json(state.analytics.event_bets(wallet, event_id).await)
}

pub async fn handle_user_events(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<UserEventsQuery>) -> Json<ApiResponse<Page<CreatedEventRow>>> {
	let Some(wallet) = require_wallet(&client_info, "user_events") else {
		return unauthorized();
	};
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.user_events(wallet, CreatedEventFilter::parse(params.filter.as_deref()), pagination).await)
}

pub async fn handle_total_traded(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>) -> Json<ApiResponse<u64>> {
	let Some(wallet) = require_wallet(&client_info, "total_traded") else {
		return unauthorized();
	};
	Json(state.analytics.total_traded(wallet).await)
}

pub async fn handle_volume_traded(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>) -> Json<ApiResponse<Decimal>> {
	let Some(wallet) = require_wallet(&client_info, "volume_traded") else {
		return unauthorized();
	};
	Json(state.analytics.volume_traded(wallet).await)
}

pub async fn handle_net_position(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>) -> Json<ApiResponse<NetPosition>> {
	let Some(wallet) = require_wallet(&client_info, "net_position") else {
		return unauthorized();
	};
	Json(state.analytics.net_position(wallet).await)
}

pub async fn handle_payout(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<EventIdQuery>) -> Json<ApiResponse<Payout>> {
	let Some(wallet) = require_wallet(&client_info, "payout") else {
		return unauthorized();
	};
	let Some(event_id) = required(&params.event_id) else {
		return missing_param(&client_info, "event_id");
	};
	Json(state.analytics.payout(wallet, event_id).await)
}

pub async fn handle_user_disputes(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<DisputesQuery>) -> Json<ApiResponse<Page<Disputes>>> {
	let Some(wallet) = require_wallet(&client_info, "disputes") else {
		return unauthorized();
	};
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.user_disputes(wallet, DisputeStatusFilter::parse(params.status.as_deref()), pagination).await)
}

pub async fn handle_dispute_eligible_events(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>) -> Json<ApiResponse<Vec<DisputeEligibleEvent>>> {
	let Some(wallet) = require_wallet(&client_info, "dispute_eligible_events") else {
		return unauthorized();
	};
	Json(state.analytics.dispute_eligible_events(wallet).await)
}
