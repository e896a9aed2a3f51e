use uuid::Uuid;

use crate::constants::{CALL_DURATION_SECS, SUPPORT_GREETING};

fn generate_message_id() -> String {
    format!("msg-{}", Uuid::new_v4())
}

/// Who authored a support-conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
    System,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: u64,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            id: generate_message_id(),
            role,
            text: text.into(),
            timestamp,
        }
    }
}

/// Conversation with the AI support desk. Seeded with a fixed greeting so the
/// screen is never empty.
#[derive(Debug, Clone)]
pub struct SupportLog {
    messages: Vec<ChatMessage>,
}

impl SupportLog {
    pub fn new(at: u64) -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::System, SUPPORT_GREETING, at)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>, at: u64) {
        self.messages.push(ChatMessage::new(role, text, at));
    }
}

/// Side of a one-to-one conversation bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Me,
    Partner,
}

#[derive(Debug, Clone)]
pub struct ChatBubble {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Read receipt; only meaningful for outgoing bubbles.
    pub read: bool,
}

/// Transcript of the currently open conversation. A fresh log is created
/// every time a chat screen opens; transcripts are not retained.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    bubbles: Vec<ChatBubble>,
}

impl ChatLog {
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn bubbles(&self) -> &[ChatBubble] {
        &self.bubbles
    }

    /// Append an outgoing bubble, unread until the partner reacts.
    pub fn push_outgoing(&mut self, text: &str) {
        self.bubbles.push(ChatBubble {
            id: generate_message_id(),
            text: text.to_string(),
            sender: Sender::Me,
            read: false,
        });
    }

    pub fn push_incoming(&mut self, text: &str) {
        self.bubbles.push(ChatBubble {
            id: generate_message_id(),
            text: text.to_string(),
            sender: Sender::Partner,
            read: false,
        });
    }

    /// Mark every outgoing bubble as read.
    pub fn mark_outgoing_read(&mut self) {
        for bubble in self.bubbles.iter_mut() {
            if bubble.sender == Sender::Me {
                bubble.read = true;
            }
        }
    }
}

/// Countdown for the limited voice call. Starts at the full budget and only
/// ever counts down; the call ends when the budget reaches zero.
#[derive(Debug, Clone, Copy)]
pub struct CallCountdown {
    remaining: u64,
}

impl CallCountdown {
    pub fn start() -> Self {
        Self {
            remaining: CALL_DURATION_SECS,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advance one second. Returns true if the call just expired.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// "m:ss" as shown on the call screen.
    pub fn format(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_log_starts_with_greeting() {
        let log = SupportLog::new(100);
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].role, Role::System);
        assert_eq!(log.messages()[0].text, SUPPORT_GREETING);
    }

    #[test]
    fn test_chat_log_read_receipts() {
        let mut log = ChatLog::default();
        assert!(log.is_empty());

        log.push_outgoing("你好");
        log.push_outgoing("在嗎？");
        assert!(log.bubbles().iter().all(|b| !b.read));

        log.mark_outgoing_read();
        log.push_incoming("在的！");

        assert_eq!(log.bubbles().len(), 3);
        assert!(log.bubbles()[0].read);
        assert!(log.bubbles()[1].read);
        // Incoming bubbles are not affected by read receipts
        assert!(!log.bubbles()[2].read);
        assert_eq!(log.bubbles()[2].sender, Sender::Partner);
    }

    #[test]
    fn test_call_countdown_format_and_expiry() {
        let mut call = CallCountdown::start();
        assert_eq!(call.format(), "5:00");
        assert!(!call.is_expired());

        assert!(!call.tick());
        assert_eq!(call.format(), "4:59");

        for _ in 0..(CALL_DURATION_SECS - 2) {
            assert!(!call.tick());
        }
        // Last second: tick reports expiry exactly once
        assert!(call.tick());
        assert!(call.is_expired());
        assert_eq!(call.format(), "0:00");
        assert!(!call.tick());
    }
}
