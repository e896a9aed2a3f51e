//! Screen navigation.
//!
//! A flat state machine: the bottom bar jumps directly to any target, and
//! `back` edges are hard-wired rather than kept on a history stack.

/// A destination reachable without a chat partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Clubs,
    ChatList,
    IgnoredList,
    Subscribe,
    Support,
    Profile,
}

/// The screen currently shown. Only the chat variant carries state: the
/// partner being talked to, so an open conversation always has a counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Clubs,
    ChatList,
    IgnoredList,
    Subscribe,
    Support,
    Profile,
    Chat { partner_id: String },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Clubs => "clubs",
            Screen::ChatList => "chat-list",
            Screen::IgnoredList => "ignored-list",
            Screen::Subscribe => "subscribe",
            Screen::Support => "support",
            Screen::Profile => "profile",
            Screen::Chat { .. } => "chat",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Screen::Home,
        }
    }

    pub fn current(&self) -> &Screen {
        &self.current
    }

    /// The partner of the open conversation, if the chat screen is showing.
    pub fn active_partner(&self) -> Option<&str> {
        match &self.current {
            Screen::Chat { partner_id } => Some(partner_id),
            _ => None,
        }
    }

    /// Jump directly to a nav-bar target.
    pub fn go(&mut self, target: NavTarget) -> &Screen {
        self.current = match target {
            NavTarget::Home => Screen::Home,
            NavTarget::Clubs => Screen::Clubs,
            NavTarget::ChatList => Screen::ChatList,
            NavTarget::IgnoredList => Screen::IgnoredList,
            NavTarget::Subscribe => Screen::Subscribe,
            NavTarget::Support => Screen::Support,
            NavTarget::Profile => Screen::Profile,
        };
        &self.current
    }

    /// Open the conversation screen for a partner.
    pub fn open_chat(&mut self, partner_id: impl Into<String>) -> &Screen {
        self.current = Screen::Chat {
            partner_id: partner_id.into(),
        };
        &self.current
    }

    /// Hard-wired back edges: the chat screen returns to the chat list, the
    /// ignored list returns to home. Everywhere else stays put.
    pub fn back(&mut self) -> bool {
        match self.current {
            Screen::Chat { .. } => {
                self.current = Screen::ChatList;
                true
            }
            Screen::IgnoredList => {
                self.current = Screen::Home;
                true
            }
            _ => {
                tracing::debug!(screen = self.current.name(), "back: no back edge, ignoring");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_home() {
        assert_eq!(*Navigator::new().current(), Screen::Home);
    }

    #[test]
    fn test_nav_bar_jumps_directly() {
        let mut nav = Navigator::new();
        assert_eq!(*nav.go(NavTarget::Clubs), Screen::Clubs);
        assert_eq!(*nav.go(NavTarget::Support), Screen::Support);
        assert_eq!(*nav.go(NavTarget::Home), Screen::Home);
    }

    #[test]
    fn test_chat_carries_its_partner() {
        let mut nav = Navigator::new();
        nav.open_chat("p1");
        assert_eq!(nav.active_partner(), Some("p1"));
        nav.go(NavTarget::ChatList);
        assert_eq!(nav.active_partner(), None);
    }

    #[test]
    fn test_back_edges_are_hard_wired() {
        let mut nav = Navigator::new();

        nav.open_chat("p1");
        assert!(nav.back());
        assert_eq!(*nav.current(), Screen::ChatList);

        nav.go(NavTarget::IgnoredList);
        assert!(nav.back());
        assert_eq!(*nav.current(), Screen::Home);

        // No generic history: back from home goes nowhere
        assert!(!nav.back());
        assert_eq!(*nav.current(), Screen::Home);

        nav.go(NavTarget::Subscribe);
        assert!(!nav.back());
        assert_eq!(*nav.current(), Screen::Subscribe);
    }
}
