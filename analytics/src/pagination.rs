use {
	crate::store::Window,
	common::consts::{PAGINATION_DEFAULT_LIMIT, PAGINATION_MAX_LIMIT},
	serde::{Deserialize, Serialize},
};

/// 归一化后的分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	pub page: u64,
	pub limit: u64,
	pub skip: u64,
}

/// 分页上下限 由配置文件提供
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
	pub default_limit: u64,
	pub max_limit: u64,
}

impl Default for PaginationConfig {
	fn default() -> Self {
		Self { default_limit: PAGINATION_DEFAULT_LIMIT, max_limit: PAGINATION_MAX_LIMIT }
	}
}

impl PaginationConfig {
	pub fn check(&self) -> anyhow::Result<()> {
		if self.max_limit == 0 {
			return Err(anyhow::anyhow!("Pagination max_limit must be greater than 0"));
		}
		if self.default_limit == 0 || self.default_limit > self.max_limit {
			return Err(anyhow::anyhow!("Pagination default_limit must be in [1, {}]", self.max_limit));
		}
		Ok(())
	}

	pub fn normalize(&self, page: Option<&str>, limit: Option<&str>) -> Pagination {
		Pagination::normalize_with(page, limit, self.default_limit, self.max_limit)
	}
}

/// 把原始字符串解析成整数 小数向零取整 非数字返回 None
fn parse_number(raw: Option<&str>) -> Option<i64> {
	let raw = raw?.trim();
	if let Ok(v) = raw.parse::<i64>() {
		return Some(v);
	}
	match raw.parse::<f64>() {
		Ok(v) if v.is_finite() => Some(v.trunc() as i64),
		_ => None,
	}
}

impl Pagination {
	pub fn normalize(page: Option<&str>, limit: Option<&str>) -> Self {
		Self::normalize_with(page, limit, PAGINATION_DEFAULT_LIMIT, PAGINATION_MAX_LIMIT)
	}

	/// 非法输入退回默认值 从不报错
	/// skip 必须用截断后的 limit 计算 否则下游再截断时翻页会错位
	pub fn normalize_with(page: Option<&str>, limit: Option<&str>, default_limit: u64, max_limit: u64) -> Self {
		let max_limit = max_limit.max(1);
		let default_limit = default_limit.clamp(1, max_limit);

		let page = match parse_number(page) {
			Some(p) if p > 0 => p as u64,
			_ => 1,
		};
		let limit = match parse_number(limit) {
			Some(l) if l > 0 => (l as u64).min(max_limit),
			_ => default_limit,
		};
		let skip = (page - 1).saturating_mul(limit);
		Self { page, limit, skip }
	}

	pub fn window(&self) -> Window {
		Window { skip: self.skip, limit: self.limit }
	}

	/// 内存分页 用于必须先全量聚合再排序的查询
	pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
		let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
		let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
		rows.into_iter().skip(skip).take(limit).collect()
	}
}
