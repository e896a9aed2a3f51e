use yuanfen_core::ai::Assistant;
use yuanfen_core::models::Profile;
use yuanfen_core::nav::Screen;
use yuanfen_core::{Phase, Session};

use crate::{CYAN, DIM, GREEN, RESET};

/// Everything the line client carries between commands.
pub(crate) struct ReplState {
    pub(crate) session: Session,
    pub(crate) assistant: Assistant,
    /// Voice transcription waiting in the input box; `say` without an
    /// argument sends it.
    pub(crate) pending_input: Option<String>,
    /// Match-list interest filter (None = 全部).
    pub(crate) interest_filter: Option<String>,
}

impl ReplState {
    pub(crate) fn new(session: Session, assistant: Assistant) -> Self {
        Self {
            session,
            assistant,
            pending_input: None,
            interest_filter: None,
        }
    }

    /// Phase- and screen-aware prompt label.
    pub(crate) fn prompt(&self) -> String {
        match self.session.phase() {
            Phase::Splash => format!("{DIM}...{RESET} "),
            Phase::Onboarding => format!("{CYAN}建立檔案{RESET}> "),
            Phase::Verification => format!("{CYAN}實名認證{RESET}> "),
            Phase::Ready => match self.session.nav().current() {
                Screen::Chat { partner_id } => {
                    let name = self
                        .session
                        .roster
                        .get(partner_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| partner_id.clone());
                    format!("{GREEN}聊天({name}){RESET}> ")
                }
                screen => format!("{CYAN}{}{RESET}> ", screen.name()),
            },
        }
    }
}

/// Find a profile by 1-based index or by (partial) name, the way list
/// commands accept either form.
pub(crate) fn match_profile<'a>(profiles: &'a [Profile], arg: &str) -> Option<&'a Profile> {
    if arg.is_empty() {
        return None;
    }
    if let Ok(idx) = arg.parse::<usize>() {
        return profiles.get(idx.saturating_sub(1));
    }
    let lower = arg.to_lowercase();
    profiles
        .iter()
        .find(|p| p.name.to_lowercase() == lower)
        .or_else(|| {
            profiles
                .iter()
                .find(|p| p.name.to_lowercase().contains(&lower))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: name.to_string(),
            age: 65,
            location: String::new(),
            distance_km: 0.0,
            bio: String::new(),
            interests: Vec::new(),
            image_url: String::new(),
            gender: None,
            preference: None,
            last_message: None,
            last_message_time: None,
        }
    }

    #[test]
    fn test_match_profile_by_index_and_name() {
        let profiles = vec![profile("1", "王大明"), profile("2", "林美惠")];

        assert_eq!(match_profile(&profiles, "2").unwrap().id, "2");
        assert_eq!(match_profile(&profiles, "王大明").unwrap().id, "1");
        // Partial name matches too
        assert_eq!(match_profile(&profiles, "美惠").unwrap().id, "2");
        assert!(match_profile(&profiles, "9").is_none());
        assert!(match_profile(&profiles, "陌生人").is_none());
    }
}
