use crate::constants::CURRENT_USER_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Which gender(s) the user wants to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Male,
    Female,
    Both,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub location: String,
    /// Distance from the current user; 0 for the user's own profile.
    pub distance_km: f32,
    pub bio: String,
    pub interests: Vec<String>,
    pub image_url: String,
    pub gender: Option<Gender>,
    pub preference: Option<Preference>,
    /// Preview of the most recent message, shown in the chat list.
    /// The only fields that change after creation.
    pub last_message: Option<String>,
    pub last_message_time: Option<u64>,
}

impl Profile {
    pub fn is_current_user(&self) -> bool {
        self.id == CURRENT_USER_ID
    }

    /// Record the newest message for the chat-list preview.
    pub fn touch_last_message(&mut self, text: &str, at: u64) {
        self.last_message = Some(text.to_string());
        self.last_message_time = Some(at);
    }

    /// Timestamp used for chat-list ordering; profiles that never exchanged
    /// a message sort last.
    pub fn recency(&self) -> u64 {
        self.last_message_time.unwrap_or(0)
    }
}
