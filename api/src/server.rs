use {
	crate::{
		admin_handlers::{handle_admin_disputes, handle_admin_event_creators, handle_admin_positions, handle_admin_totals, handle_admin_users},
		consts::{REQUEST_ID_HEADER, WALLET_HEADER},
		handlers::{
			handle_activity, handle_currencies, handle_currency_price, handle_dispute_eligible_events, handle_event_bets, handle_event_details, handle_event_total_bets, handle_events, handle_net_position,
			handle_payout, handle_positions, handle_total_traded, handle_user_disputes, handle_user_events, handle_volume_traded,
		},
	},
	analytics::{Analytics, pagination::PaginationConfig},
	axum::{
		Router,
		extract::Request,
		http::HeaderName,
		middleware::{self, Next},
		response::Response,
		routing::get,
	},
	std::time::Duration,
	tower_http::{
		compression::CompressionLayer,
		cors::{Any, CorsLayer},
		request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	},
	uuid::Uuid,
};

#[derive(Clone, Debug)]
pub struct AppState {
	pub analytics: Analytics,
	pub pagination: PaginationConfig,
}

impl AppState {
	pub fn new(analytics: Analytics, pagination: PaginationConfig) -> Self {
		Self { analytics, pagination }
	}
}

#[derive(Clone, Debug)]
pub struct ClientInfo {
	pub request_id: String,
	/// 上游会话层认证后的钱包地址 已转小写
	pub wallet: Option<String>,
}

//中间件 只负责提取 不做认证
async fn extract_client_info(mut request: Request, next: Next) -> Response {
	let request_id = request.headers().get(REQUEST_ID_HEADER).and_then(|header| header.to_str().ok()).map(|header| header.to_string()).unwrap_or_else(|| Uuid::new_v4().to_string());
	let wallet = request.headers().get(WALLET_HEADER).and_then(|header| header.to_str().ok()).map(|value| value.trim().to_lowercase()).filter(|value| !value.is_empty());
	request.extensions_mut().insert(ClientInfo { request_id, wallet });
	next.run(request).await
}

pub fn app(state: AppState) -> Router {
	let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
	let admin_router = Router::new()
		.route("/users", get(handle_admin_users))
		.route("/event_creators", get(handle_admin_event_creators))
		.route("/positions", get(handle_admin_positions))
		.route("/disputes", get(handle_admin_disputes))
		.route("/totals", get(handle_admin_totals));

	let sub_router = Router::new()
		.route("/hi", get(handle_hi))
		.route("/events", get(handle_events))
		.route("/event_details", get(handle_event_details))
		.route("/event_total_bets", get(handle_event_total_bets))
		.route("/currencies", get(handle_currencies))
		.route("/currency_price", get(handle_currency_price))
		.route("/positions", get(handle_positions))
		.route("/activity", get(handle_activity))
		.route("/event_bets", get(handle_event_bets))
		.route("/user_events", get(handle_user_events))
		.route("/total_traded", get(handle_total_traded))
		.route("/volume_traded", get(handle_volume_traded))
		.route("/net_position", get(handle_net_position))
		.route("/payout", get(handle_payout))
		.route("/disputes", get(handle_user_disputes))
		.route("/dispute_eligible_events", get(handle_dispute_eligible_events))
		.nest("/admin", admin_router)
		.layer(PropagateRequestIdLayer::new(x_request_id.clone())) //将请求id从请求头中传递到响应头中
		.layer(CompressionLayer::new())
		.layer(middleware::from_fn(extract_client_info))
		.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid)) //生成请求id 并放到请求头中
		.layer(CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_credentials(false).allow_headers(Any).expose_headers(Any).max_age(Duration::from_secs(60) * 10))
		.with_state(state);

	Router::new().nest("/api", sub_router) //不匹配的路径在中间件之前直接 404
}

async fn handle_hi() -> &'static str {
	"You will succeed."
}
