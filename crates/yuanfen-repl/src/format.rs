use chrono::TimeZone;

use yuanfen_core::models::{ChatBubble, ChatMessage, Club, Profile, Role, Sender};

use crate::{CYAN, DIM, GREEN, RED, RESET, WHITE_BOLD, YELLOW};

pub(crate) fn system(msg: &str) -> String {
    format!("{DIM}{msg}{RESET}")
}

pub(crate) fn error(msg: &str) -> String {
    format!("{RED}{msg}{RESET}")
}

pub(crate) fn heading(msg: &str) -> String {
    format!("{WHITE_BOLD}{msg}{RESET}")
}

pub(crate) fn splash() -> Vec<String> {
    vec![
        format!("{CYAN}──────────────────────────────{RESET}"),
        format!("{WHITE_BOLD}  銀髮緣 · 樂齡交友{RESET}"),
        format!("{DIM}  找個能一起喝茶聊天的朋友{RESET}"),
        format!("{CYAN}──────────────────────────────{RESET}"),
    ]
}

/// Candidate card for the match list.
pub(crate) fn profile_card(profile: &Profile, index: usize) -> Vec<String> {
    let interests = profile
        .interests
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        format!(
            "{WHITE_BOLD}{index}. {}，{}歲{RESET}  {DIM}{} · 距離您 {} 公里{RESET}",
            profile.name, profile.age, profile.location, profile.distance_km
        ),
        format!("   {}", profile.bio),
        format!("   {GREEN}{interests}{RESET}"),
    ]
}

/// One row of the chat list: name, recency, last-message preview.
pub(crate) fn chat_list_line(profile: &Profile, index: usize) -> String {
    let when = profile
        .last_message_time
        .map(relative_time)
        .unwrap_or_default();
    let preview = profile.last_message.as_deref().unwrap_or("尚未開始聊天");
    format!(
        "{WHITE_BOLD}{index}. {}{RESET} {DIM}{when}{RESET}\n   {preview}",
        profile.name
    )
}

pub(crate) fn chat_bubble_line(bubble: &ChatBubble, partner_name: &str) -> String {
    match bubble.sender {
        Sender::Me => {
            let receipt = if bubble.read {
                format!(" {DIM}已讀{RESET}")
            } else {
                String::new()
            };
            format!("{GREEN}我:{RESET} {}{receipt}", bubble.text)
        }
        Sender::Partner => format!("{CYAN}{partner_name}:{RESET} {}", bubble.text),
    }
}

pub(crate) fn support_line(msg: &ChatMessage) -> String {
    match msg.role {
        Role::User => format!("{GREEN}我:{RESET} {}", msg.text),
        Role::Model | Role::System => format!("{CYAN}客服:{RESET} {}", msg.text),
    }
}

pub(crate) fn club_card(club: &Club, index: usize) -> Vec<String> {
    vec![
        format!(
            "{WHITE_BOLD}{index}. {}{RESET}  {YELLOW}[{}]{RESET} {DIM}{} 位成員{RESET}",
            club.name, club.category, club.member_count
        ),
        format!("   {}", club.description),
    ]
}

/// Compact age of a timestamp, for list rows.
pub(crate) fn relative_time(ts: u64) -> String {
    let now = chrono::Local::now().timestamp().max(0) as u64;
    let delta = now.saturating_sub(ts);
    if delta < 60 {
        "剛剛".to_string()
    } else if delta < 3600 {
        format!("{} 分鐘前", delta / 60)
    } else if delta < 86400 {
        format!("{} 小時前", delta / 3600)
    } else {
        chrono::Local
            .timestamp_opt(ts as i64, 0)
            .single()
            .map(|dt| dt.format("%m/%d").to_string())
            .unwrap_or_default()
    }
}
