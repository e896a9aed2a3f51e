use crate::nav::{NavTarget, Screen};

/// A discrete user action delivered to the session. Screens never call each
/// other directly; they emit commands and the session applies the transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Navigate(NavTarget),
    Back,
    /// Pass over a candidate ("暫不考慮").
    Pass { profile_id: String },
    /// Greet a candidate and open the conversation ("打招呼").
    Greet { profile_id: String },
    /// Give an ignored candidate another chance.
    Restore { profile_id: String },
    /// Send a message in the open conversation.
    SendMessage { text: String },
}

/// State change emitted by the session for the front end to render.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    ScreenChanged(Screen),
    ChatOpened { partner_id: String },
    ProfilePassed { profile_id: String },
    ProfileRestored { profile_id: String },
    MessageSent { partner_id: String, text: String },
    PartnerReplied { partner_id: String, text: String },
}
