//! 后台统计视图测试

use {
	analytics::{
		Pagination,
		admin::{AdminScope, DisputeStatusFilter},
		classifier::AdminPositionIntent,
		store::MemoryLedgerStore,
	},
	common::model::{BidType, DisputeStatus},
	rust_decimal::Decimal,
	std::sync::Arc,
	tests::fixtures::*,
};

fn first_page() -> Pagination {
	Pagination::normalize(None, None)
}

// ============================================================================
// 用户 / 创建者
// ============================================================================

/// 下注数和争议数按钱包精确匹配 total 是用户总数
#[tokio::test]
async fn test_user_roster_counts() {
	let store = empty_store();
	store.insert_user(user(1, ALICE, 0)).await;
	store.insert_user(user(2, BOB, 100)).await;
	store.insert_user(user(3, CAROL, 200)).await;
	store.insert_order(order(1, "evt-1", ALICE, BidType::True, tokens(1), 100)).await;
	store.insert_order(order(2, "evt-2", "0xALICE", BidType::False, tokens(1), 200)).await;
	store.insert_order(order(3, "evt-1", CAROL, BidType::True, tokens(1), 300)).await;
	store.insert_dispute(dispute(1, "evt-1", ALICE, DisputeStatus::Open, 400)).await;

	let page = engine(&store).user_roster(Pagination::normalize(Some("1"), Some("2"))).await.data.unwrap();
	assert_eq!(page.total, 3);
	assert_eq!(page.data.len(), 2);
	// 新用户在前
	assert_eq!(page.data[0].user.wallet_address, CAROL);
	assert_eq!(page.data[0].no_of_bets, 1);
	assert_eq!(page.data[1].user.wallet_address, BOB);
	assert_eq!(page.data[1].no_of_bets, 0);

	let second = engine(&store).user_roster(Pagination::normalize(Some("2"), Some("2"))).await.data.unwrap();
	assert_eq!(second.data[0].user.wallet_address, ALICE);
	assert_eq!(second.data[0].no_of_bets, 2);
	assert_eq!(second.data[0].no_of_disputes, 1);
}

/// 只保留创建过市场的用户 奖励按原始值累加
#[tokio::test]
async fn test_event_creator_roster() {
	let store = empty_store();
	store.insert_user(user(1, ALICE, 0)).await;
	store.insert_user(user(2, BOB, 100)).await;
	store.insert_user(user(3, CAROL, 200)).await;
	let mut rewarded = event(1, "evt-1", BOB, "BTC", 4, 0);
	rewarded.reward = Some(dec("5"));
	store.insert_event(rewarded).await;
	store.insert_event(event(2, "evt-2", BOB, "BTC", 1, 100)).await;
	let mut carol_event = event(3, "evt-3", CAROL, "ETH", 2, 200);
	carol_event.reward = Some(dec("3"));
	store.insert_event(carol_event).await;
	// 创建者没有用户记录 不出现
	store.insert_event(event(4, "evt-4", ADMIN, "ETH", 1, 300)).await;

	let page = engine(&store).event_creator_roster(first_page()).await.data.unwrap();
	assert_eq!(page.total, 2);
	assert_eq!(page.data[0].user.wallet_address, CAROL);
	assert_eq!(page.data[0].no_of_events, 1);
	assert_eq!(page.data[0].rewards, dec("3"));
	assert_eq!(page.data[1].user.wallet_address, BOB);
	assert_eq!(page.data[1].no_of_events, 2);
	assert_eq!(page.data[1].rewards, dec("5"));
}

// ============================================================================
// 后台持仓汇总
// ============================================================================

async fn admin_positions_store() -> Arc<MemoryLedgerStore> {
	let store = empty_store();
	for (id, status) in [(1, 1), (2, 3), (3, 0), (4, 2), (5, 4)] {
		store.insert_event(event(id, &format!("evt-admin-{}", status), ADMIN, "BTC", status, id * 100)).await;
	}
	store.insert_event(event(6, "evt-user-2", BOB, "BTC", 2, 600)).await;
	store.insert_order(order(1, "evt-admin-2", ALICE, BidType::True, tokens(6), 700)).await;
	store.insert_order(order(2, "evt-admin-2", CAROL, BidType::False, tokens(4), 800)).await;
	store
}

/// 后台的 closed 是 {0,2} 不含 4
#[tokio::test]
async fn test_admin_positions_closed_excludes_dispute_period_ended() {
	let store = admin_positions_store().await;
	let analytics = engine(&store);

	let closed = analytics.admin_positions(AdminScope::All, ADMIN, AdminPositionIntent::parse_status(Some("0")), first_page()).await.data.unwrap();
	let mut statuses: Vec<i16> = closed.data.iter().map(|r| r.event.status).collect();
	statuses.sort();
	assert_eq!(statuses, vec![0, 2, 2]);
	assert_eq!(closed.total, 3);

	let open = analytics.admin_positions(AdminScope::All, ADMIN, AdminPositionIntent::parse_status(Some("1")), first_page()).await.data.unwrap();
	assert_eq!(open.total, 2);

	let everything = analytics.admin_positions(AdminScope::All, ADMIN, AdminPositionIntent::parse_status(Some("all")), first_page()).await.data.unwrap();
	assert_eq!(everything.total, 6);
}

#[tokio::test]
async fn test_admin_positions_scope_and_totals() {
	let store = admin_positions_store().await;
	let analytics = engine(&store);

	let mine = analytics.admin_positions(AdminScope::Admin, ADMIN, AdminPositionIntent::Closed, first_page()).await.data.unwrap();
	assert_eq!(mine.total, 2);
	let declared = mine.data.iter().find(|r| r.event.event_id == "evt-admin-2").unwrap();
	assert_eq!(declared.total_amount, dec("10"));
	assert_eq!(declared.transaction_count, 2);
	assert!(!declared.no_bet_yet);
	let closed = mine.data.iter().find(|r| r.event.event_id == "evt-admin-0").unwrap();
	assert_eq!(closed.total_amount, Decimal::ZERO);
	assert!(closed.no_bet_yet);

	let others = analytics.admin_positions(AdminScope::parse(Some("user")), ADMIN, AdminPositionIntent::Closed, first_page()).await.data.unwrap();
	assert_eq!(others.total, 1);
	assert_eq!(others.data[0].event.user_id, BOB);
}

// ============================================================================
// 争议
// ============================================================================

#[tokio::test]
async fn test_dispute_list_joins_target_time() {
	let store = empty_store();
	store.insert_event(event(1, "evt-1", BOB, "BTC", 2, 0)).await;
	store.insert_dispute(dispute(1, "evt-1", ALICE, DisputeStatus::Open, 100)).await;
	store.insert_dispute(dispute(2, "evt-gone", CAROL, DisputeStatus::Closed, 200)).await;

	let page = engine(&store).dispute_list(first_page()).await.data.unwrap();
	assert_eq!(page.total, 2);
	assert_eq!(page.data[0].dispute.id, 2);
	assert!(page.data[0].target_date_time.is_none());
	assert_eq!(page.data[1].target_date_time, Some(ts(10_000)));
}

/// event_id 重复时关联结果不唯一
#[tokio::test]
async fn test_dispute_list_duplicate_event_is_integrity_failure() {
	let store = empty_store();
	store.insert_event(event(1, "evt-1", BOB, "BTC", 2, 0)).await;
	store.insert_event(event(2, "EVT-1", CAROL, "BTC", 2, 10)).await;
	store.insert_dispute(dispute(1, "evt-1", ALICE, DisputeStatus::Open, 100)).await;

	let resp = engine(&store).dispute_list(first_page()).await;
	assert!(resp.error);
	assert_eq!(resp.status, 422);
	assert_eq!(resp.message, "Data integrity error");
}

#[tokio::test]
async fn test_user_disputes_status_filter() {
	let store = empty_store();
	store.insert_dispute(dispute(1, "evt-1", ALICE, DisputeStatus::Open, 100)).await;
	store.insert_dispute(dispute(2, "evt-2", ALICE, DisputeStatus::Closed, 200)).await;
	store.insert_dispute(dispute(3, "evt-3", BOB, DisputeStatus::Open, 300)).await;

	let analytics = engine(&store);
	let open = analytics.user_disputes(ALICE, DisputeStatusFilter::parse(Some("open")), first_page()).await.data.unwrap();
	assert_eq!(open.total, 1);
	assert_eq!(open.data[0].id, 1);

	let all = analytics.user_disputes(ALICE, DisputeStatusFilter::All, first_page()).await.data.unwrap();
	assert_eq!(all.total, 2);
	assert_eq!(all.data[0].id, 2);

	assert!(analytics.user_disputes(CAROL, DisputeStatusFilter::All, first_page()).await.is_empty());
}

// ============================================================================
// 平台汇总 / 币种
// ============================================================================

#[tokio::test]
async fn test_platform_totals() {
	let store = empty_store();
	store.insert_user(user(1, ALICE, 0)).await;
	store.insert_user(user(2, BOB, 100)).await;
	store.insert_event(event(1, "evt-1", BOB, "BTC", 1, 0)).await;
	store.insert_event(event(2, "evt-2", "0xBOB", "BTC", 2, 100)).await;
	store.insert_event(event(3, "evt-3", CAROL, "ETH", 1, 200)).await;
	store.insert_order(order(1, "evt-1", ALICE, BidType::True, tokens(3), 100)).await;
	store.insert_order(order(2, "evt-3", ALICE, BidType::False, tokens(4), 200)).await;
	store.insert_dispute(dispute(1, "evt-2", ALICE, DisputeStatus::Open, 300)).await;

	let totals = engine(&store).platform_totals().await.data.unwrap();
	assert_eq!(totals.total_users, 2);
	assert_eq!(totals.total_event_creators, 2);
	assert_eq!(totals.total_events, 3);
	assert_eq!(totals.total_transactions, 5);
	assert_eq!(totals.total_disputes, 1);
	assert_eq!(totals.total_volume, dec("7"));
}

/// 空账本是成功的全 0 而不是无数据
#[tokio::test]
async fn test_platform_totals_empty_ledger() {
	let store = empty_store();
	let resp = engine(&store).platform_totals().await;
	assert!(!resp.error);
	let totals = resp.data.unwrap();
	assert_eq!(totals.total_users, 0);
	assert_eq!(totals.total_transactions, 0);
	assert_eq!(totals.total_volume, Decimal::ZERO);
}

#[tokio::test]
async fn test_currencies_and_price() {
	let store = empty_store();
	let analytics = engine(&store);
	assert!(analytics.currencies().await.is_empty());

	store.insert_currency(currency(1, "ETH", "Ethereum", dec("3000"))).await;
	store.insert_currency(currency(2, "BTC", "Bitcoin", dec("60000"))).await;
	let all = analytics.currencies().await.data.unwrap();
	let symbols: Vec<&str> = all.iter().map(|c| c.symbol.as_str()).collect();
	assert_eq!(symbols, vec!["BTC", "ETH"]);

	let btc = analytics.currency_price("BTC").await.data.unwrap();
	assert_eq!(btc.price, dec("60000"));
	assert!(analytics.currency_price("SOL").await.is_empty());
}

/// 翻过最后一页仍返回 total 只有没有任何匹配时才是无数据
#[tokio::test]
async fn test_admin_page_past_end_keeps_total() {
	let store = empty_store();
	store.insert_user(user(1, ALICE, 0)).await;
	store.insert_user(user(2, BOB, 100)).await;
	store.insert_event(event(1, "evt-1", BOB, "BTC", 2, 0)).await;
	store.insert_dispute(dispute(1, "evt-1", ALICE, DisputeStatus::Open, 100)).await;

	let analytics = engine(&store);
	let past_end = Pagination::normalize(Some("9"), None);

	let roster = analytics.user_roster(past_end).await;
	assert!(!roster.is_empty());
	let roster = roster.data.unwrap();
	assert!(roster.data.is_empty());
	assert_eq!(roster.total, 2);

	let creators = analytics.event_creator_roster(past_end).await.data.unwrap();
	assert!(creators.data.is_empty());
	assert_eq!(creators.total, 1);

	let positions = analytics.admin_positions(AdminScope::All, ADMIN, AdminPositionIntent::All, past_end).await.data.unwrap();
	assert_eq!(positions.total, 1);

	let disputes = analytics.dispute_list(past_end).await.data.unwrap();
	assert!(disputes.data.is_empty());
	assert_eq!(disputes.total, 1);

	// 没有任何匹配时仍是无数据
	assert!(analytics.user_disputes(CAROL, DisputeStatusFilter::All, past_end).await.is_empty());
}
