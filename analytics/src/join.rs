//! 跨集合关联与去重
//!
//! 没有外键 关联键是文本 所以所有关联都按忽略大小写比较 并在关联后重新过滤一次

use {
	crate::error::EngineError,
	std::{collections::HashMap, hash::Hash},
};

/// 关联键统一转小写
pub fn join_key(value: &str) -> String {
	value.to_ascii_lowercase()
}

/// 至多命中一条的关联取值
/// 零条返回 None 多条说明数据有问题 直接报错而不是默默取第一条
pub fn single<'a, T>(matches: impl IntoIterator<Item = &'a T>, what: &str, key: &str) -> Result<Option<&'a T>, EngineError> {
	let mut iter = matches.into_iter();
	let first = iter.next();
	if first.is_some() && iter.next().is_some() {
		return Err(EngineError::integrity(format!("expected at most one {} for key {}, found several", what, key)));
	}
	Ok(first)
}

/// 按关联键建多值索引 保留原有顺序
pub fn index_by<'a, T, F>(rows: &'a [T], key: F) -> HashMap<String, Vec<&'a T>>
where
	F: Fn(&T) -> &str,
{
	let mut index: HashMap<String, Vec<&'a T>> = HashMap::with_capacity(rows.len());
	for row in rows {
		index.entry(join_key(key(row))).or_default().push(row);
	}
	index
}

/// 从多值索引里取单值
pub fn lookup_single<'a, T>(index: &HashMap<String, Vec<&'a T>>, what: &str, key: &str) -> Result<Option<&'a T>, EngineError> {
	match index.get(&join_key(key)) {
		Some(rows) => single(rows.iter().copied(), what, key),
		None => Ok(None),
	}
}

/// 关联后再按钱包精确过滤一次（忽略大小写）
/// 文本键关联容易多匹配 这一步不能省
pub fn refilter_by_wallet<'a, T, F>(rows: impl IntoIterator<Item = &'a T>, wallet: &str, wallet_of: F) -> Vec<&'a T>
where
	T: 'a,
	F: Fn(&T) -> &str,
{
	rows.into_iter().filter(|row| wallet_of(*row).eq_ignore_ascii_case(wallet)).collect()
}

/// 每个分组只保留最后一条
/// 输入必须已经按创建时间升序（同时间按写入顺序） 后出现的覆盖先出现的
/// 输出顺序为各分组第一次出现的顺序
pub fn latest_per_key<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
	K: Eq + Hash,
	F: Fn(&T) -> K,
{
	let mut slots: HashMap<K, usize> = HashMap::new();
	let mut latest: Vec<T> = Vec::new();
	for row in rows {
		let k = key(&row);
		match slots.get(&k) {
			Some(&i) => latest[i] = row,
			None => {
				slots.insert(k, latest.len());
				latest.push(row);
			}
		}
	}
	latest
}

/// 去重后的集合（小写） 保持首次出现的顺序
pub fn distinct_keys<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	let mut seen = std::collections::HashSet::new();
	let mut keys = Vec::new();
	for v in values {
		let k = join_key(v);
		if seen.insert(k.clone()) {
			keys.push(k);
		}
	}
	keys
}
