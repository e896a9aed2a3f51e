/// Auto-renewal warning shown above the plan card. The wording matters for
/// the target audience: the renewal is opt-out, not opt-in.
pub const RENEWAL_WARNING: &str = "\
此訂閱為自動續費。每個月會自動從您的帳戶扣款。若您不想繼續使用，請務必手動取消訂閱。";

/// Step-by-step cancellation guide.
pub const CANCEL_GUIDE: [&str; 4] = [
    "點擊畫面右下角的「我的帳戶」",
    "選擇「訂閱管理」",
    "點擊紅色的「取消訂閱」按鈕",
    "看到「已取消」畫面即代表成功",
];

#[derive(Debug, Clone)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub is_recurring: bool,
}

impl SubscriptionPlan {
    /// The one plan currently on offer.
    pub fn gold() -> Self {
        Self {
            id: "gold".to_string(),
            name: "黃金樂齡方案".to_string(),
            price: "$150 / 月".to_string(),
            features: vec![
                "無限次查看配對對象".to_string(),
                "每天可發送 10 次打招呼".to_string(),
                "專屬社團優先報名".to_string(),
                "去除所有廣告".to_string(),
            ],
            is_recurring: true,
        }
    }
}
