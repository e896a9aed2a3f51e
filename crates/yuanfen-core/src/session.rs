//! Application state owner.
//!
//! One `Session` holds all mutable state and applies every transition
//! synchronously inside `dispatch`. Front ends render from the session and
//! feed it `Command`s; they never mutate state themselves.

use crate::constants::PARTNER_REPLY;
use crate::events::{Command, CoreEvent};
use crate::models::{CallCountdown, ChatLog, Club, FieldError, Profile, ProfileForm, SupportLog, VerificationFlow};
use crate::nav::Navigator;
use crate::store::Roster;

/// Get current Unix timestamp in seconds
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Startup gate: splash, first-run profile creation, then the identity check.
/// Roster and navigation commands only apply once the session is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Splash,
    Onboarding,
    Verification,
    Ready,
}

pub struct Session {
    phase: Phase,
    current_user: Option<Profile>,
    /// Onboarding draft; consumed by `submit_onboarding`.
    pub form: ProfileForm,
    pub verification: VerificationFlow,
    pub roster: Roster,
    clubs: Vec<Club>,
    pub support: SupportLog,
    chat_log: ChatLog,
    call: Option<CallCountdown>,
    nav: Navigator,
}

impl Session {
    pub fn new(candidates: Vec<Profile>, clubs: Vec<Club>) -> Self {
        Self {
            phase: Phase::Splash,
            current_user: None,
            form: ProfileForm::default(),
            verification: VerificationFlow::new(),
            roster: Roster::seed(candidates),
            clubs,
            support: SupportLog::new(now_secs()),
            chat_log: ChatLog::default(),
            call: None,
            nav: Navigator::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_user(&self) -> Option<&Profile> {
        self.current_user.as_ref()
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    pub fn nav(&self) -> &Navigator {
        &self.nav
    }

    /// Transcript of the open conversation; reset every time a chat opens.
    pub fn chat_log(&self) -> &ChatLog {
        &self.chat_log
    }

    pub fn call(&self) -> Option<&CallCountdown> {
        self.call.as_ref()
    }

    // --- Startup sequence ---

    /// The splash screen finished; move on to profile creation.
    pub fn finish_splash(&mut self) {
        if self.phase != Phase::Splash {
            tracing::debug!(phase = ?self.phase, "finish_splash out of order, ignoring");
            return;
        }
        self.phase = Phase::Onboarding;
    }

    /// Commit the onboarding form. On success the identity check begins.
    pub fn submit_onboarding(&mut self) -> Result<(), Vec<FieldError>> {
        if self.phase != Phase::Onboarding {
            tracing::debug!(phase = ?self.phase, "submit_onboarding out of order, ignoring");
            return Ok(());
        }
        let profile = self.form.build()?;
        tracing::info!(name = %profile.name, "profile created");
        self.current_user = Some(profile);
        self.phase = Phase::Verification;
        Ok(())
    }

    /// The identity review approved; the app proper starts on the home screen.
    pub fn finish_verification(&mut self) -> bool {
        if self.phase != Phase::Verification || !self.verification.is_verified() {
            tracing::debug!(phase = ?self.phase, "finish_verification out of order, ignoring");
            return false;
        }
        self.phase = Phase::Ready;
        true
    }

    // --- Command dispatch ---

    pub fn dispatch(&mut self, command: Command) -> Vec<CoreEvent> {
        if self.phase != Phase::Ready {
            tracing::debug!(?command, phase = ?self.phase, "command before startup finished, ignoring");
            return Vec::new();
        }
        match command {
            Command::Navigate(target) => {
                let screen = self.nav.go(target).clone();
                vec![CoreEvent::ScreenChanged(screen)]
            }
            Command::Back => {
                if self.nav.back() {
                    vec![CoreEvent::ScreenChanged(self.nav.current().clone())]
                } else {
                    Vec::new()
                }
            }
            Command::Pass { profile_id } => {
                if self.roster.pass(&profile_id) {
                    vec![CoreEvent::ProfilePassed { profile_id }]
                } else {
                    Vec::new()
                }
            }
            Command::Greet { profile_id } => self.greet(profile_id),
            Command::Restore { profile_id } => {
                if self.roster.restore(&profile_id) {
                    vec![CoreEvent::ProfileRestored { profile_id }]
                } else {
                    Vec::new()
                }
            }
            Command::SendMessage { text } => self.send_message(&text),
        }
    }

    fn greet(&mut self, profile_id: String) -> Vec<CoreEvent> {
        if !self.roster.start_chat(&profile_id) {
            return Vec::new();
        }
        // Fresh transcript per open; any ongoing call belongs to the old one
        self.chat_log = ChatLog::default();
        self.call = None;
        let screen = self.nav.open_chat(&profile_id).clone();
        vec![
            CoreEvent::ChatOpened {
                partner_id: profile_id,
            },
            CoreEvent::ScreenChanged(screen),
        ]
    }

    fn send_message(&mut self, text: &str) -> Vec<CoreEvent> {
        let Some(partner_id) = self.nav.active_partner().map(str::to_string) else {
            tracing::debug!("send_message outside the chat screen, ignoring");
            return Vec::new();
        };
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let now = now_secs();
        self.chat_log.push_outgoing(text);
        self.roster.update_last_message(&partner_id, text, now);

        // The partner simulation reads, then answers; the front end owns
        // pacing, the state applies both effects in order.
        self.chat_log.mark_outgoing_read();
        self.chat_log.push_incoming(PARTNER_REPLY);
        self.roster.update_last_message(&partner_id, PARTNER_REPLY, now);

        vec![
            CoreEvent::MessageSent {
                partner_id: partner_id.clone(),
                text: text.to_string(),
            },
            CoreEvent::PartnerReplied {
                partner_id,
                text: PARTNER_REPLY.to_string(),
            },
        ]
    }

    // --- Limited voice call ---

    /// Start the 5-minute call. Only meaningful on the chat screen.
    pub fn start_call(&mut self) -> Option<&CallCountdown> {
        if self.nav.active_partner().is_none() {
            tracing::debug!("start_call outside the chat screen, ignoring");
            return None;
        }
        self.call = Some(CallCountdown::start());
        self.call.as_ref()
    }

    pub fn end_call(&mut self) {
        self.call = None;
    }

    /// Advance the call by one second. Returns true when time just ran out;
    /// the call is hung up automatically in that case.
    pub fn tick_call(&mut self) -> bool {
        let Some(call) = self.call.as_mut() else {
            return false;
        };
        if call.tick() {
            self.call = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Preference};
    use crate::nav::{NavTarget, Screen};

    fn candidate(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("朋友{id}"),
            age: 70,
            location: "新北市".to_string(),
            distance_km: 5.0,
            bio: String::new(),
            interests: vec!["攝影".to_string()],
            image_url: String::new(),
            gender: None,
            preference: None,
            last_message: None,
            last_message_time: None,
        }
    }

    fn ready_session() -> Session {
        let mut session = Session::new(vec![candidate("a"), candidate("b"), candidate("c")], Vec::new());
        session.finish_splash();
        session.form = ProfileForm {
            name: "林美惠".to_string(),
            age: Some(65),
            location: "新北市".to_string(),
            bio: "喜歡攝影。".to_string(),
            gender: Some(Gender::Female),
            preference: Some(Preference::Both),
            interests: vec!["攝影".to_string(), "園藝".to_string(), "旅遊".to_string()],
            image_url: None,
        };
        session.submit_onboarding().unwrap();
        session.verification.attach_id_photo("id.jpg");
        session.verification.advance();
        session.verification.attach_selfie("selfie.jpg");
        session.verification.advance();
        session.verification.complete_review();
        assert!(session.finish_verification());
        session
    }

    #[test]
    fn test_startup_sequence_ends_on_home() {
        let session = ready_session();
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(*session.nav().current(), Screen::Home);
        assert_eq!(session.current_user().unwrap().name, "林美惠");
    }

    #[test]
    fn test_commands_before_ready_are_ignored() {
        let mut session = Session::new(vec![candidate("a")], Vec::new());
        let events = session.dispatch(Command::Pass {
            profile_id: "a".to_string(),
        });
        assert!(events.is_empty());
        assert_eq!(session.roster.available().len(), 1);
    }

    #[test]
    fn test_onboarding_rejects_incomplete_form() {
        let mut session = Session::new(Vec::new(), Vec::new());
        session.finish_splash();
        let errors = session.submit_onboarding().unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(session.phase(), Phase::Onboarding);
    }

    #[test]
    fn test_verification_gate_holds_until_reviewed() {
        let mut session = ready_session();
        // Already ready: calling again is a no-op
        assert!(!session.finish_verification());
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn test_greet_opens_chat_and_moves_profile() {
        let mut session = ready_session();
        let events = session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        assert_eq!(
            events[0],
            CoreEvent::ChatOpened {
                partner_id: "a".to_string()
            }
        );
        assert_eq!(session.nav().active_partner(), Some("a"));
        assert_eq!(session.roster.active_chats()[0].id, "a");
        assert!(session.chat_log().is_empty());
    }

    #[test]
    fn test_message_flow_updates_roster_order() {
        let mut session = ready_session();
        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        let events = session.dispatch(Command::SendMessage {
            text: "你好".to_string(),
        });
        assert!(matches!(events[0], CoreEvent::MessageSent { .. }));
        assert!(matches!(events[1], CoreEvent::PartnerReplied { .. }));

        // Transcript: outgoing (read) then the canned reply
        let bubbles = session.chat_log().bubbles();
        assert_eq!(bubbles.len(), 2);
        assert!(bubbles[0].read);
        assert_eq!(bubbles[1].text, PARTNER_REPLY);

        // The chat-list preview shows the partner's reply
        let a = &session.roster.active_chats()[0];
        assert_eq!(a.last_message.as_deref(), Some(PARTNER_REPLY));

        // A later conversation moves its partner to the front
        session.dispatch(Command::Greet {
            profile_id: "b".to_string(),
        });
        session.dispatch(Command::SendMessage {
            text: "哈囉".to_string(),
        });
        let order: Vec<&str> = session
            .roster
            .active_chats()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_send_message_requires_chat_screen() {
        let mut session = ready_session();
        let events = session.dispatch(Command::SendMessage {
            text: "你好".to_string(),
        });
        assert!(events.is_empty());

        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        let events = session.dispatch(Command::SendMessage {
            text: "   ".to_string(),
        });
        assert!(events.is_empty());
        assert!(session.chat_log().is_empty());
    }

    #[test]
    fn test_reopening_a_chat_resets_the_transcript() {
        let mut session = ready_session();
        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        session.dispatch(Command::SendMessage {
            text: "你好".to_string(),
        });
        assert!(!session.chat_log().is_empty());

        session.dispatch(Command::Back);
        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        assert!(session.chat_log().is_empty());
        // Still exactly one chat entry
        assert_eq!(session.roster.active_chats().len(), 1);
    }

    #[test]
    fn test_back_from_chat_returns_to_chat_list() {
        let mut session = ready_session();
        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        let events = session.dispatch(Command::Back);
        assert_eq!(events, vec![CoreEvent::ScreenChanged(Screen::ChatList)]);

        session.dispatch(Command::Navigate(NavTarget::IgnoredList));
        let events = session.dispatch(Command::Back);
        assert_eq!(events, vec![CoreEvent::ScreenChanged(Screen::Home)]);
    }

    #[test]
    fn test_call_lives_on_the_chat_screen() {
        let mut session = ready_session();
        assert!(session.start_call().is_none());

        session.dispatch(Command::Greet {
            profile_id: "a".to_string(),
        });
        let call = session.start_call().unwrap();
        assert_eq!(call.format(), "5:00");

        assert!(!session.tick_call());
        session.end_call();
        assert!(session.call().is_none());
        assert!(!session.tick_call());
    }
}
