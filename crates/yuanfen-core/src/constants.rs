//! Application-wide constants
//!
//! Centralized location for magic values and fixed copy that are used
//! across multiple modules. User-facing strings are Traditional Chinese.

/// Profile id reserved for the signed-in user; it never enters the roster.
pub const CURRENT_USER_ID: &str = "current-user";

/// Budget for the limited voice call, in seconds.
pub const CALL_DURATION_SECS: u64 = 5 * 60; // 5 minutes

/// Minimum number of interests a new profile must pick.
pub const MIN_INTERESTS: usize = 3;

// Support desk defaults
pub const SUPPORT_GREETING: &str = "您好！我是銀髮緣的客服小幫手。請問有什麼我可以幫您的嗎？您可以問我如何使用App，或者如何參加活動。";

pub const SUPPORT_SYSTEM_INSTRUCTION: &str = "\
你是「銀髮緣」App 的智能客服助手。你的服務對象是年長者。
請遵循以下原則：
1. 說話語氣要非常親切、有禮貌、耐心，像對待家裡的長輩一樣。
2. 答案要簡潔明瞭，避免使用複雜的科技術語。
3. 如果使用者遇到問題，請一步一步引導他們。
4. 永遠保持鼓勵的態度。";

// Fixed copy substituted when the AI collaborator fails; the conversation
// always continues.
pub const FALLBACK_SUPPORT_EMPTY: &str = "抱歉，我現在無法回答，請稍後再試。";
pub const FALLBACK_SUPPORT_BUSY: &str = "系統暫時繁忙，請檢查您的網路連線。";
pub const FALLBACK_VOICE_INTENT: &str = "無法辨識語音";
pub const FALLBACK_VOICE_REPLY: &str = "抱歉，我聽不太清楚，請您再試一次。";

/// Canned acknowledgement sent back by the chat partner simulation.
pub const PARTNER_REPLY: &str = "謝謝你的訊息！我很開心。";

/// Anti-fraud banner shown at the top of every conversation.
pub const SAFETY_WARNING: &str =
    "防詐騙提醒：若對方傳送不明連結、要求轉帳匯款或投資，請務必提高警覺！";

/// Suggested openers for an empty conversation.
pub const RECOMMENDED_STARTERS: [&str; 3] = [
    "你好！很高興認識你。",
    "看你的照片覺得很親切，想跟你打聲招呼！",
    "最近天氣不錯，有沒有去哪裡走走呢？",
];

/// Interest tags offered during onboarding.
pub const INTEREST_TAGS: [&str; 15] = [
    "爬山", "園藝", "烹飪", "攝影", "音樂", "茶道",
    "下棋", "太極", "旅遊", "閱讀", "跳舞", "書法",
    "美食", "養生", "寵物",
];
