use {crate::store::StoreError, thiserror::Error};

/// 引擎内部错误 只在引擎边界内流动 对外一律转成 ApiResponse
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("store error: {0}")]
	Store(#[from] StoreError),

	/// 关联数据缺失或不一致 比如赔付找不到对应市场 目标价为0 单值关联命中多条
	#[error("data integrity error: {0}")]
	DataIntegrity(String),
}

impl EngineError {
	pub fn integrity(msg: impl Into<String>) -> Self {
		EngineError::DataIntegrity(msg.into())
	}
}
