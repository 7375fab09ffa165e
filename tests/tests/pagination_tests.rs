//! 分页归一化测试
//!
//! 覆盖非法输入降级、limit 截断以及 skip 必须基于截断后的 limit

use analytics::pagination::{Pagination, PaginationConfig};

/// 非正数或非数字的 page 一律回到第 1 页
#[test]
fn test_page_floors_to_one() {
	for raw in [Some("0"), Some("-3"), Some("abc"), Some(""), None] {
		let p = Pagination::normalize(raw, Some("10"));
		assert_eq!(p.page, 1, "page input {:?}", raw);
		assert_eq!(p.skip, 0, "page input {:?}", raw);
	}
}

/// limit 非正数或非法时使用默认值
#[test]
fn test_invalid_limit_falls_back_to_default() {
	for raw in [Some("0"), Some("-1"), Some("ten"), None] {
		let p = Pagination::normalize(Some("1"), raw);
		assert_eq!(p.limit, 10, "limit input {:?}", raw);
	}
}

/// limit 超过上限时截断到上限
#[test]
fn test_limit_clamps_to_max() {
	let p = Pagination::normalize(Some("1"), Some("5000"));
	assert_eq!(p.limit, 100);
}

/// skip 用截断后的 limit 计算: 第 2 页 limit 1000 -> skip 100 而不是 1000
#[test]
fn test_skip_uses_clamped_limit() {
	let p = Pagination::normalize_with(Some("2"), Some("1000"), 10, 100);
	assert_eq!(p, Pagination { page: 2, limit: 100, skip: 100 });
}

#[test]
fn test_custom_defaults() {
	let p = Pagination::normalize_with(Some("3"), Some("oops"), 20, 50);
	assert_eq!(p, Pagination { page: 3, limit: 20, skip: 40 });

	// 默认值超过上限时也被截断
	let p = Pagination::normalize_with(None, None, 500, 50);
	assert_eq!(p.limit, 50);
}

/// 小数输入向零取整
#[test]
fn test_fractional_input_truncates() {
	let p = Pagination::normalize(Some("2.9"), Some("15.7"));
	assert_eq!(p, Pagination { page: 2, limit: 15, skip: 15 });
}

#[test]
fn test_huge_page_does_not_overflow() {
	let p = Pagination::normalize(Some("9223372036854775807"), Some("100"));
	assert_eq!(p.skip, u64::MAX);
	assert!(p.slice(vec![1, 2, 3]).is_empty());
}

#[test]
fn test_slice_and_window() {
	let p = Pagination::normalize(Some("2"), Some("2"));
	assert_eq!(p.slice(vec![1, 2, 3, 4, 5]), vec![3, 4]);
	let w = p.window();
	assert_eq!((w.skip, w.limit), (2, 2));
}

/// 配置文件里的上下限
#[test]
fn test_pagination_config() {
	let config = PaginationConfig { default_limit: 25, max_limit: 40 };
	assert!(config.check().is_ok());
	assert_eq!(config.normalize(None, Some("100")).limit, 40);
	assert_eq!(config.normalize(None, None).limit, 25);

	assert!(PaginationConfig { default_limit: 0, max_limit: 40 }.check().is_err());
	assert!(PaginationConfig { default_limit: 50, max_limit: 40 }.check().is_err());
	assert_eq!(PaginationConfig::default(), PaginationConfig { default_limit: 10, max_limit: 100 });
}
