use {
	crate::store::LedgerStore,
	std::{fmt, sync::Arc},
};

/// 聚合引擎入口
/// 只持有注入进来的存储句柄 各类查询分散在 positions/events/portfolio/admin 模块的 impl 块里
#[derive(Clone)]
pub struct Analytics {
	store: Arc<dyn LedgerStore>,
}

impl fmt::Debug for Analytics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Analytics").finish_non_exhaustive()
	}
}

impl Analytics {
	pub fn new(store: Arc<dyn LedgerStore>) -> Self {
		Self { store }
	}

	pub(crate) fn store(&self) -> &dyn LedgerStore {
		self.store.as_ref()
	}
}
