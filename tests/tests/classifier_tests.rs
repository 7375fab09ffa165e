//! 生命周期分类测试

use analytics::classifier::{ADMIN_CLOSED_STATUSES, AdminPositionIntent, EventStatus, PositionIntent, USER_CLOSED_STATUSES, USER_OPEN_STATUSES};

#[test]
fn test_user_status_sets() {
	assert_eq!(PositionIntent::Open.status_set(), Some(&[1i16, 3][..]));
	assert_eq!(PositionIntent::Closed.status_set(), Some(&[0i16, 2, 4][..]));
	assert_eq!(PositionIntent::All.status_set(), None);
}

/// open 与 closed 的状态集合不能重叠
#[test]
fn test_user_status_sets_are_disjoint() {
	for s in USER_OPEN_STATUSES {
		assert!(!USER_CLOSED_STATUSES.contains(s), "status {} in both sets", s);
	}
}

/// 后台 closed 不含 4 而用户端包含 4 这个差异必须保留
#[test]
fn test_admin_closed_set_excludes_dispute_period_ended() {
	assert_eq!(AdminPositionIntent::Closed.status_set(), Some(&[0i16, 2][..]));
	assert!(!ADMIN_CLOSED_STATUSES.contains(&4));
	assert!(USER_CLOSED_STATUSES.contains(&4));
	assert_eq!(AdminPositionIntent::Open.status_set(), PositionIntent::Open.status_set());
}

#[test]
fn test_intent_parse_is_permissive() {
	assert_eq!(PositionIntent::parse(Some("open")), PositionIntent::Open);
	assert_eq!(PositionIntent::parse(Some(" CLOSED ")), PositionIntent::Closed);
	assert_eq!(PositionIntent::parse(Some("pending")), PositionIntent::All);
	assert_eq!(PositionIntent::parse(None), PositionIntent::All);
}

#[test]
fn test_admin_status_parse() {
	assert_eq!(AdminPositionIntent::parse_status(Some("1")), AdminPositionIntent::Open);
	assert_eq!(AdminPositionIntent::parse_status(Some("0")), AdminPositionIntent::Closed);
	assert_eq!(AdminPositionIntent::parse_status(Some("2")), AdminPositionIntent::Closed);
	assert_eq!(AdminPositionIntent::parse_status(Some("NaN")), AdminPositionIntent::All);
	assert_eq!(AdminPositionIntent::parse_status(None), AdminPositionIntent::All);
}

/// open 只要未结算 closed 要未结算或赢 不限意图时都可以
#[test]
fn test_order_eligible() {
	assert!(PositionIntent::Open.order_eligible(None));
	assert!(!PositionIntent::Open.order_eligible(Some(1)));
	assert!(!PositionIntent::Open.order_eligible(Some(0)));

	assert!(PositionIntent::Closed.order_eligible(None));
	assert!(PositionIntent::Closed.order_eligible(Some(1)));
	assert!(!PositionIntent::Closed.order_eligible(Some(0)));

	assert!(PositionIntent::All.order_eligible(Some(0)));
	assert!(PositionIntent::All.order_eligible(None));
}

/// 状态数值与账本一致 分类集合由它们组成
#[test]
fn test_event_status_values() {
	assert_eq!(EventStatus::Closed.as_i16(), 0);
	assert_eq!(EventStatus::Open.as_i16(), 1);
	assert_eq!(EventStatus::ResultDeclared.as_i16(), 2);
	assert_eq!(EventStatus::BidClosed.as_i16(), 3);
	assert_eq!(EventStatus::DisputePeriodEnded.as_i16(), 4);
	assert!(USER_CLOSED_STATUSES.contains(&EventStatus::DisputePeriodEnded.as_i16()));
	assert!(!ADMIN_CLOSED_STATUSES.contains(&EventStatus::DisputePeriodEnded.as_i16()));
}
