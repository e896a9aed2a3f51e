//! Three-way partition of candidate profiles.
//!
//! Every known profile lives in exactly one of `available`, `ignored`, or
//! `active_chats` at any time. Transitions are user-action driven; an
//! operation on a profile that is not in its expected source list is a
//! silent no-op with a debug diagnostic.

use crate::models::Profile;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Candidates not yet acted upon, newest restorations first.
    available: Vec<Profile>,
    /// Candidates the user passed over, newest first.
    ignored: Vec<Profile>,
    /// Candidates with an open conversation, most recent traffic first.
    active_chats: Vec<Profile>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the candidate pool. The current user's own profile and duplicate
    /// ids are skipped so the partition starts consistent.
    pub fn seed(profiles: Vec<Profile>) -> Self {
        let mut roster = Self::new();
        for profile in profiles {
            if profile.is_current_user() {
                tracing::debug!("seed: skipping the current user's own profile");
                continue;
            }
            if roster.contains(&profile.id) {
                tracing::debug!(profile_id = %profile.id, "seed: skipping duplicate id");
                continue;
            }
            roster.available.push(profile);
        }
        roster
    }

    pub fn available(&self) -> &[Profile] {
        &self.available
    }

    pub fn ignored(&self) -> &[Profile] {
        &self.ignored
    }

    pub fn active_chats(&self) -> &[Profile] {
        &self.active_chats
    }

    /// Whether the id is known to any of the three lists.
    pub fn contains(&self, profile_id: &str) -> bool {
        self.get(profile_id).is_some()
    }

    /// Look the profile up across all three lists.
    pub fn get(&self, profile_id: &str) -> Option<&Profile> {
        self.available
            .iter()
            .chain(self.ignored.iter())
            .chain(self.active_chats.iter())
            .find(|p| p.id == profile_id)
    }

    /// Pass over a candidate: move it from `available` to the front of
    /// `ignored`. Returns false (no-op) if the candidate is not available.
    pub fn pass(&mut self, profile_id: &str) -> bool {
        let Some(profile) = take_by_id(&mut self.available, profile_id) else {
            tracing::debug!(profile_id, "pass: profile not in available list, ignoring");
            return false;
        };
        self.ignored.insert(0, profile);
        true
    }

    /// Open a conversation with a candidate: move it to the front of
    /// `active_chats`, pulling it out of whichever list held it. The relative
    /// order of the other chats is preserved. A candidate that already chats
    /// stays where it is; an unknown id is a no-op.
    pub fn start_chat(&mut self, profile_id: &str) -> bool {
        if self.active_chats.iter().any(|p| p.id == profile_id) {
            return true;
        }
        let profile = take_by_id(&mut self.available, profile_id)
            .or_else(|| take_by_id(&mut self.ignored, profile_id));
        match profile {
            Some(profile) => {
                self.active_chats.insert(0, profile);
                true
            }
            None => {
                tracing::debug!(profile_id, "start_chat: unknown profile, ignoring");
                false
            }
        }
    }

    /// Give an ignored candidate another chance: move it to the front of
    /// `available`. Returns false (no-op) if the candidate is not ignored.
    pub fn restore(&mut self, profile_id: &str) -> bool {
        let Some(profile) = take_by_id(&mut self.ignored, profile_id) else {
            tracing::debug!(profile_id, "restore: profile not in ignored list, ignoring");
            return false;
        };
        self.available.insert(0, profile);
        true
    }

    /// Record the newest message of an active chat and re-sort the chat list
    /// most-recent-first. The sort is stable so chats with equal timestamps
    /// keep their current order.
    pub fn update_last_message(&mut self, profile_id: &str, text: &str, at: u64) -> bool {
        let Some(chat) = self.active_chats.iter_mut().find(|p| p.id == profile_id) else {
            tracing::debug!(profile_id, "update_last_message: no active chat, ignoring");
            return false;
        };
        chat.touch_last_message(text, at);
        self.active_chats
            .sort_by_key(|p| std::cmp::Reverse(p.recency()));
        true
    }
}

fn take_by_id(list: &mut Vec<Profile>, profile_id: &str) -> Option<Profile> {
    let idx = list.iter().position(|p| p.id == profile_id)?;
    Some(list.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CURRENT_USER_ID;
    use std::collections::HashSet;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("朋友{id}"),
            age: 65,
            location: "台北市".to_string(),
            distance_km: 3.0,
            bio: String::new(),
            interests: vec!["爬山".to_string()],
            image_url: String::new(),
            gender: None,
            preference: None,
            last_message: None,
            last_message_time: None,
        }
    }

    fn roster_abc() -> Roster {
        Roster::seed(vec![profile("a"), profile("b"), profile("c")])
    }

    fn ids(list: &[Profile]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    /// Every id must appear in at most one of the three lists.
    fn assert_disjoint(roster: &Roster) {
        let mut seen = HashSet::new();
        for p in roster
            .available()
            .iter()
            .chain(roster.ignored())
            .chain(roster.active_chats())
        {
            assert!(seen.insert(p.id.as_str()), "id {} in two lists", p.id);
        }
    }

    #[test]
    fn test_seed_skips_current_user_and_duplicates() {
        let mut me = profile("x");
        me.id = CURRENT_USER_ID.to_string();
        let roster = Roster::seed(vec![profile("a"), me, profile("a"), profile("b")]);
        assert_eq!(ids(roster.available()), vec!["a", "b"]);
        assert!(!roster.contains(CURRENT_USER_ID));
    }

    #[test]
    fn test_pass_then_restore_round_trips() {
        let mut roster = roster_abc();

        assert!(roster.pass("b"));
        assert_eq!(ids(roster.available()), vec!["a", "c"]);
        assert_eq!(ids(roster.ignored()), vec!["b"]);
        assert_disjoint(&roster);

        assert!(roster.restore("b"));
        // Restored candidates come back at the front
        assert_eq!(ids(roster.available()), vec!["b", "a", "c"]);
        assert!(roster.ignored().is_empty());
        assert_disjoint(&roster);
    }

    #[test]
    fn test_double_pass_is_a_noop() {
        let mut roster = roster_abc();
        assert!(roster.pass("b"));
        assert!(!roster.pass("b"));
        assert_eq!(ids(roster.ignored()), vec!["b"]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_restore_of_non_ignored_is_a_noop() {
        let mut roster = roster_abc();
        assert!(!roster.restore("a"));
        assert_eq!(ids(roster.available()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_start_chat_moves_out_of_available() {
        let mut roster = roster_abc();
        assert!(roster.start_chat("b"));
        assert_eq!(ids(roster.available()), vec!["a", "c"]);
        assert_eq!(ids(roster.active_chats()), vec!["b"]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_start_chat_pulls_out_of_ignored() {
        let mut roster = roster_abc();
        roster.pass("b");
        assert!(roster.start_chat("b"));
        assert!(roster.ignored().is_empty());
        assert_eq!(ids(roster.active_chats()), vec!["b"]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_start_chat_twice_keeps_one_entry() {
        let mut roster = roster_abc();
        assert!(roster.start_chat("a"));
        assert!(roster.start_chat("a"));
        assert_eq!(ids(roster.active_chats()), vec!["a"]);
        assert_disjoint(&roster);
    }

    #[test]
    fn test_start_chat_with_unknown_id_is_a_noop() {
        let mut roster = roster_abc();
        assert!(!roster.start_chat("nobody"));
        assert!(roster.active_chats().is_empty());
    }

    #[test]
    fn test_new_chats_go_to_the_front() {
        let mut roster = roster_abc();
        roster.start_chat("a");
        roster.start_chat("b");
        roster.start_chat("c");
        assert_eq!(ids(roster.active_chats()), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_update_last_message_orders_by_recency() {
        let mut roster = roster_abc();
        roster.start_chat("a");
        assert!(roster.update_last_message("a", "hi", 10));
        roster.start_chat("b");
        assert!(roster.update_last_message("b", "yo", 20));

        // Most recent traffic first
        assert_eq!(ids(roster.active_chats()), vec!["b", "a"]);
        let b = &roster.active_chats()[0];
        assert_eq!(b.last_message.as_deref(), Some("yo"));
        assert_eq!(b.last_message_time, Some(20));

        // Older timestamp does not jump the queue
        roster.start_chat("c");
        assert!(roster.update_last_message("c", "早", 5));
        assert_eq!(ids(roster.active_chats()), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_update_last_message_is_stable_for_equal_timestamps() {
        let mut roster = roster_abc();
        roster.start_chat("a");
        roster.start_chat("b");
        roster.update_last_message("a", "one", 10);
        roster.update_last_message("b", "two", 10);

        let order: Vec<String> = ids(roster.active_chats())
            .into_iter()
            .map(String::from)
            .collect();
        // Re-sorting with unchanged timestamps must not shuffle the list
        roster.update_last_message("b", "three", 10);
        assert_eq!(
            ids(roster.active_chats()),
            order.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_update_last_message_requires_active_chat() {
        let mut roster = roster_abc();
        assert!(!roster.update_last_message("a", "hi", 10));
        assert!(roster.available()[0].last_message.is_none());
    }
}
