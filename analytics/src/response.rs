use {
	crate::error::EngineError,
	serde::{Deserialize, Serialize},
	tracing::error,
};

pub const MSG_FETCH_SUCCESS: &str = "Fetch data successfully";
pub const MSG_FETCH_EVENTS_SUCCESS: &str = "Fetch events successfully";
pub const MSG_FETCH_USER_SUCCESS: &str = "Fetch user data successfully";
pub const MSG_DATA_NOT_FOUND: &str = "Data not found";

/// 错误码 同时就是信封里的 status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
	/// 参数错误
	InvalidParameter = 400,
	/// 缺少已认证的钱包地址
	Unauthorized = 401,
	/// 关联数据缺失或不一致
	DataIntegrity = 422,
	/// 存储层异常
	InternalError = 500,
}

impl ApiErrorCode {
	pub fn message(&self) -> &'static str {
		match self {
			ApiErrorCode::InvalidParameter => "Invalid parameter",
			ApiErrorCode::Unauthorized => "Unauthorized",
			ApiErrorCode::DataIntegrity => "Data integrity error",
			ApiErrorCode::InternalError => "Internal Server Error.",
		}
	}

	pub fn as_u16(&self) -> u16 {
		*self as u16
	}
}

/// 统一响应信封
/// 三种结果: 成功有数据 / 成功无数据（error=false data=null） / 失败（error=true）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	pub error: bool,
	pub data: Option<T>,
	pub status: u16,
	pub message: String,
}

impl<T> ApiResponse<T> {
	pub fn success(data: T, message: &str) -> Self {
		Self { error: false, data: Some(data), status: 200, message: message.to_string() }
	}

	/// 查询成功但没有数据
	pub fn empty() -> Self {
		Self { error: false, data: None, status: 200, message: MSG_DATA_NOT_FOUND.to_string() }
	}

	pub fn failure(code: ApiErrorCode) -> Self {
		Self { error: true, data: None, status: code.as_u16(), message: code.message().to_string() }
	}

	pub fn is_empty(&self) -> bool {
		!self.error && self.data.is_none()
	}
}

/// 分页结果 total 是过滤后的总数 与 skip/limit 无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
	pub data: Vec<T>,
	pub total: u64,
}

impl<T> Page<T> {
	pub fn new(data: Vec<T>, total: u64) -> Self {
		Self { data, total }
	}
}

/// 引擎边界: 记录错误细节 对外只返回通用信封
pub fn respond<T>(operation: &str, result: Result<Option<T>, EngineError>, message: &str) -> ApiResponse<T> {
	match result {
		Ok(Some(data)) => ApiResponse::success(data, message),
		Ok(None) => ApiResponse::empty(),
		Err(EngineError::DataIntegrity(detail)) => {
			error!("operation={} - Data integrity violation: {}", operation, detail);
			ApiResponse::failure(ApiErrorCode::DataIntegrity)
		}
		Err(EngineError::Store(e)) => {
			error!("operation={} - Failed to query ledger store: {}", operation, e);
			ApiResponse::failure(ApiErrorCode::InternalError)
		}
	}
}

/// 过滤后没有任何匹配（total 为 0）时按"无数据"返回
/// 翻过最后一页只是当前页为空 仍然带 total 返回成功
pub fn respond_page<T>(operation: &str, result: Result<Page<T>, EngineError>, message: &str) -> ApiResponse<Page<T>> {
	respond(operation, result.map(|page| if page.total == 0 { None } else { Some(page) }), message)
}
