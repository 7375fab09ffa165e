// 后台接口 管理员鉴权由上游中间件完成 这里只消费钱包地址

use {
	crate::{
		api_types::{AdminPositionsQuery, PageQuery},
		server::{AppState, ClientInfo},
	},
	analytics::{
		ApiErrorCode, ApiResponse, Page,
		admin::{AdminPositionRow, AdminScope, DisputeRow, EventCreator, PlatformTotals, UserActivity},
		classifier::AdminPositionIntent,
	},
	axum::{
		Extension, Json,
		extract::{Query, State},
	},
};

pub async fn handle_admin_users(State(state): State<AppState>, Query(params): Query<PageQuery>) -> Json<ApiResponse<Page<UserActivity>>> {
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.user_roster(pagination).await)
}

pub async fn handle_admin_event_creators(State(state): State<AppState>, Query(params): Query<PageQuery>) -> Json<ApiResponse<Page<EventCreator>>> {
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.event_creator_roster(pagination).await)
}

/// scope 为 admin/user 时需要管理员钱包
pub async fn handle_admin_positions(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<AdminPositionsQuery>) -> Json<ApiResponse<Page<AdminPositionRow>>> {
	let scope = AdminScope::parse(params.scope.as_deref());
	let admin_wallet = client_info.wallet.as_deref().unwrap_or_default();
	if scope != AdminScope::All && admin_wallet.is_empty() {
		tracing::warn!("request_id={} - Missing admin wallet for scoped admin positions", client_info.request_id);
		return Json(ApiResponse::failure(ApiErrorCode::Unauthorized));
	}
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.admin_positions(scope, admin_wallet, AdminPositionIntent::parse_status(params.status.as_deref()), pagination).await)
}

pub async fn handle_admin_disputes(State(state): State<AppState>, Query(params): Query<PageQuery>) -> Json<ApiResponse<Page<DisputeRow>>> {
	let pagination = state.pagination.normalize(params.page.as_deref(), params.limit.as_deref());
	Json(state.analytics.dispute_list(pagination).await)
}

pub async fn handle_admin_totals(State(state): State<AppState>) -> Json<ApiResponse<PlatformTotals>> {
	Json(state.analytics.platform_totals().await)
}
