//! 无状态金额计算
//!
//! 所有链上金额先除以 10^18 再参与公式 每次调用各自累加 不共享任何状态

use {
	crate::{error::EngineError, join::join_key},
	common::{
		consts::TOKEN_DECIMALS,
		model::{BidType, Events, Orders},
	},
	rust_decimal::Decimal,
	serde::{Deserialize, Serialize},
	std::collections::HashSet,
};

/// 10^18
pub fn token_scale() -> Decimal {
	Decimal::from_i128_with_scale(10i128.pow(TOKEN_DECIMALS), 0)
}

/// 链上整数金额 -> 代币数量
pub fn scale_down(raw: Decimal) -> Result<Decimal, EngineError> {
	raw.checked_div(token_scale()).ok_or_else(|| EngineError::integrity(format!("failed to scale amount {}", raw)))
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, EngineError> {
	values.into_iter().try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v).ok_or_else(|| EngineError::integrity("amount sum overflow")))
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, EngineError> {
	a.checked_mul(b).ok_or_else(|| EngineError::integrity(format!("multiplication overflow: {} * {}", a, b)))
}

fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal, EngineError> {
	a.checked_sub(b).ok_or_else(|| EngineError::integrity(format!("subtraction overflow: {} - {}", a, b)))
}

fn percent_of(value: Decimal, percent: Decimal) -> Result<Decimal, EngineError> {
	checked_mul(value, percent)?.checked_div(Decimal::ONE_HUNDRED).ok_or_else(|| EngineError::integrity("percentage overflow"))
}

/// 交易量 = Σamount / 10^18 没有订单时为 0
pub fn volume_traded(orders: &[Orders]) -> Result<Decimal, EngineError> {
	scale_down(checked_sum(orders.iter().map(|o| o.amount))?)
}

/// 参与过的不同市场数 同一市场多笔订单只算一次
pub fn unique_events(orders: &[Orders]) -> u64 {
	orders.iter().map(|o| join_key(&o.event_id)).collect::<HashSet<String>>().len() as u64
}

/// 单个市场的成交量 撤回的订单不计入
/// 优先用 current_bet 没有时退回 amount
pub fn event_volume<'a>(orders: impl IntoIterator<Item = &'a Orders>) -> Result<Decimal, EngineError> {
	let raw = checked_sum(orders.into_iter().filter(|o| o.bid_type != BidType::Withdraw).map(|o| o.current_bet.unwrap_or(o.amount)))?;
	scale_down(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
	pub total_profit: Decimal,
	pub net_position: Decimal,
}

/// 已领奖的订单: total_profit = Σamount_claimed - Σamount
/// 输掉且不是撤单的订单: net_position = total_profit - Σamount
/// 三个求和各自先缩放再组合 两边都为空时结果为 0
pub fn net_position(orders: &[Orders]) -> Result<NetPosition, EngineError> {
	let won: Vec<&Orders> = orders.iter().filter(|o| o.amount_claimed.is_some()).collect();
	let lost: Vec<&Orders> = orders.iter().filter(|o| o.result == Some(0) && o.bid_type != BidType::Withdraw).collect();

	let claimed = scale_down(checked_sum(won.iter().filter_map(|o| o.amount_claimed))?)?;
	let staked_won = scale_down(checked_sum(won.iter().map(|o| o.amount))?)?;
	let staked_lost = scale_down(checked_sum(lost.iter().map(|o| o.amount))?)?;

	let total_profit = checked_sub(claimed, staked_won)?;
	let net_position = checked_sub(total_profit, staked_lost)?;
	Ok(NetPosition { total_profit, net_position })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
	pub odds: Decimal,
	pub gross_payout: Decimal,
	pub reward: Decimal,
	pub net_payout: Decimal,
}

/// 赔付计算
/// settlement 为 "Yes" 取 odds[0] 否则取 odds[1]
/// gross = amount * odds/100 / 10^18, reward = gross - amount/10^18, net = gross - reward * fees/100
pub fn payout(order: &Orders, event: &Events) -> Result<Payout, EngineError> {
	let side = if event.settlement.as_deref() == Some("Yes") { 0 } else { 1 };
	let odds = *event.odds.get(side).ok_or_else(|| EngineError::integrity(format!("event {} has no odds at index {}", event.event_id, side)))?;

	let stake = scale_down(order.amount)?;
	let gross_payout = percent_of(stake, odds)?;
	let reward = checked_sub(gross_payout, stake)?;
	let net_payout = checked_sub(gross_payout, percent_of(reward, event.platform_fees)?)?;
	Ok(Payout { odds, gross_payout, reward, net_payout })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSign {
	Positive,
	Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDelta {
	pub price_difference: Decimal,
	pub sign: PriceSign,
	pub percentage_difference: Decimal,
}

/// 当前价与目标价的偏离 目标价缺失或为 0 视为数据错误
pub fn price_delta(current_price: Decimal, price_level: Option<Decimal>) -> Result<PriceDelta, EngineError> {
	let price_level = match price_level {
		Some(p) if !p.is_zero() => p,
		Some(_) => return Err(EngineError::integrity("price level is zero")),
		None => return Err(EngineError::integrity("price level is missing")),
	};
	let price_difference = checked_sub(current_price, price_level)?.abs();
	let sign = if current_price >= price_level { PriceSign::Positive } else { PriceSign::Negative };
	let percentage_difference = checked_mul(price_difference.checked_div(price_level).ok_or_else(|| EngineError::integrity("price ratio overflow"))?, Decimal::ONE_HUNDRED)?;
	Ok(PriceDelta { price_difference, sign, percentage_difference })
}
