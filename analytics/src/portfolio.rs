use {
	crate::{
		engine::Analytics,
		error::EngineError,
		join::single,
		metrics::{self, NetPosition, Payout},
		response::{ApiResponse, MSG_FETCH_SUCCESS, respond},
		store::{EventFilter, OrderFilter, OrderSort, ResultMatch, WalletMatch},
	},
	common::model::Orders,
	rust_decimal::Decimal,
};

impl Analytics {
	async fn user_orders(&self, wallet: &str) -> Result<Vec<Orders>, EngineError> {
		let filter = OrderFilter { user: Some(WalletMatch::Eq(wallet.to_string())), ..Default::default() };
		Ok(self.store().find_orders(&filter, OrderSort::CreatedAsc, None).await?)
	}

	/// 参与过的不同市场数 没有订单时为 0
	pub async fn total_traded(&self, wallet: &str) -> ApiResponse<u64> {
		let result = self.user_orders(wallet).await.map(|orders| Some(metrics::unique_events(&orders)));
		respond("total_traded", result, MSG_FETCH_SUCCESS)
	}

	pub async fn volume_traded(&self, wallet: &str) -> ApiResponse<Decimal> {
		let result = self.user_orders(wallet).await.and_then(|orders| metrics::volume_traded(&orders).map(Some));
		respond("volume_traded", result, MSG_FETCH_SUCCESS)
	}

	/// 净盈亏 两边都没有订单时返回 0 而不是"无数据"
	pub async fn net_position(&self, wallet: &str) -> ApiResponse<NetPosition> {
		let result = self.user_orders(wallet).await.and_then(|orders| metrics::net_position(&orders).map(Some));
		respond("net_position", result, MSG_FETCH_SUCCESS)
	}

	/// 赔付 没有赢单时返回无数据 赢单找不到市场属于数据错误
	pub async fn payout_data(&self, wallet: &str, event_id: &str) -> Result<Option<Payout>, EngineError> {
		let order_filter = OrderFilter { event_ids: Some(vec![event_id.to_string()]), user: Some(WalletMatch::Eq(wallet.to_string())), result: Some(ResultMatch::Eq(1)), ..Default::default() };
		let event_filter = EventFilter { event_ids: Some(vec![event_id.to_string()]), ..Default::default() };
		let (orders, events) = tokio::try_join!(self.store().find_orders(&order_filter, OrderSort::CreatedAsc, None), self.store().find_events(&event_filter, None))?;

		// 取最早的一笔赢单 即原始下注
		let Some(order) = orders.first() else {
			return Ok(None);
		};
		let event = single(events.iter(), "event", event_id)?.ok_or_else(|| EngineError::integrity(format!("winning order {} references missing event {}", order.id, event_id)))?;
		metrics::payout(order, event).map(Some)
	}

	pub async fn payout(&self, wallet: &str, event_id: &str) -> ApiResponse<Payout> {
		respond("payout", self.payout_data(wallet, event_id).await, MSG_FETCH_SUCCESS)
	}
}
