use {
	chrono::Utc,
	rust_decimal::Decimal,
	serde::{Deserialize, Serialize},
	sqlx::prelude::FromRow,
};

/// https://docs.rs/sqlx/latest/sqlx/postgres/types/index.html 注意类型转换
/// 金额字段全部是链上原始整数（18位精度） NUMERIC(78,0)
/// 钱包地址入库前已经转小写 但查询时两边仍然都要转小写比较

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Users {
	pub id: i64,
	pub wallet_address: String, //唯一键
	pub role: String,
	pub user_name: Option<String>,
	pub full_user_name: Option<String>,
	pub ens_id: Option<String>,
	pub email: Option<String>,
	pub status: Option<String>,
	pub profile_picture: Option<String>,
	pub created_at: chrono::DateTime<Utc>,
	pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Events {
	pub id: i64,
	pub event_id: String,                           //市场唯一标识
	pub user_id: String,                            //创建者钱包
	pub currency_type: String,                      //币种symbol 对应 currencies.symbol
	pub price_level: Option<Decimal>,               //目标价格
	pub target_date_time: chrono::DateTime<Utc>,    //结果判定时间
	pub event_expire_time: chrono::DateTime<Utc>,   //下注截止时间
	pub status: i16,                                //0关闭 1进行中 2已出结果 3停止下注 4争议期结束
	pub odds: Vec<Decimal>,                         //[yes赔率, no赔率] 百分比
	pub platform_fees: Decimal,                     //平台手续费 百分比
	pub settlement: Option<String>,                 //"Yes" | "No"
	pub reward: Option<Decimal>,                    //创建者奖励
	pub created_at: chrono::DateTime<Utc>,
	pub updated_at: chrono::DateTime<Utc>,
}

/// 订单方向或动作
/// 撤单和领奖都是追加一条新订单 不修改原订单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bid_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BidType {
	/// 押 yes
	True,
	/// 押 no
	False,
	/// 撤回下注
	Withdraw,
	/// 领取奖励
	Claimed,
}

//用户订单
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Orders {
	pub id: i64,                           //自增序号 同一时间创建的订单按它决定先后
	pub event_id: String,                  //市场标识 没有外键约束
	pub user_id: String,                   //下注者钱包
	pub bid_type: BidType,
	pub amount: Decimal,                   //下注金额
	pub current_bet: Option<Decimal>,      //当前仍在市场中的金额
	pub amount_claimed: Option<Decimal>,   //结算领奖后才有
	pub result: Option<i16>,               //None未结算 0输 1赢
	pub created_at: chrono::DateTime<Utc>,
	pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "dispute_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisputeStatus {
	Open,
	Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Disputes {
	pub id: i64,
	pub event_id: String,
	pub user_id: String,
	pub category: String,
	pub email: Option<String>,
	pub status: DisputeStatus,
	pub description: Option<String>,
	pub evidence_url: Vec<String>,
	pub created_at: chrono::DateTime<Utc>,
	pub updated_at: chrono::DateTime<Utc>,
}

/// 币价参考表 由外部价格源刷新
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Currencies {
	pub id: i64,
	pub symbol: String,
	pub name: String,
	pub price: Decimal,
	pub precision: i32,
	pub updated_at: chrono::DateTime<Utc>,
}
