use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

/// Delay before a pending application is auto-approved.
pub const APPLICATION_REVIEW_MILLIS: i64 = 4000;

/// Per-session record of which activities are joined and which are
/// applied-to. An id is never in both sets at once: promotion and
/// cancellation both remove it from `applied` before touching `joined`.
#[derive(Debug, Default)]
pub struct MembershipTracker {
    joined: HashSet<String>,
    applied: HashSet<String>,
    // Scheduled auto-approval instants; removing an entry cancels the event.
    pending: HashMap<String, DateTime<Utc>>,
}

impl MembershipTracker {
    pub fn is_joined(&self, id: &str) -> bool {
        self.joined.contains(id)
    }

    pub fn is_applied(&self, id: &str) -> bool {
        self.applied.contains(id)
    }

    /// Returns true when the id was not joined before.
    pub fn join(&mut self, id: &str) -> bool {
        self.applied.remove(id);
        self.pending.remove(id);
        self.joined.insert(id.to_string())
    }

    /// Records an application and its auto-approval due time.
    pub fn apply(&mut self, id: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let due = now + Duration::milliseconds(APPLICATION_REVIEW_MILLIS);
        self.applied.insert(id.to_string());
        self.pending.insert(id.to_string(), due);
        due
    }

    /// Cancellation wins over promotion: dropping the pending entry here
    /// means a later resolve finds nothing to promote.
    pub fn cancel_application(&mut self, id: &str) -> bool {
        self.pending.remove(id);
        self.applied.remove(id)
    }

    /// Promotes an application to membership, but only if the id is still in
    /// the applied set at fire time.
    pub fn resolve_application(&mut self, id: &str) -> bool {
        self.pending.remove(id);
        if !self.applied.remove(id) {
            return false;
        }
        self.joined.insert(id.to_string());
        true
    }

    pub fn leave(&mut self, id: &str) -> bool {
        self.joined.remove(id)
    }

    /// Disband unwind: forget the id in every set.
    pub fn forget(&mut self, id: &str) {
        self.joined.remove(id);
        self.applied.remove(id);
        self.pending.remove(id);
    }

    pub fn joined_ids(&self) -> &HashSet<String> {
        &self.joined
    }

    pub fn clear(&mut self) {
        self.joined.clear();
        self.applied.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn joined_and_applied_stay_disjoint() {
        let mut tracker = MembershipTracker::default();
        tracker.apply("2", at(0));
        assert!(tracker.is_applied("2"));
        assert!(tracker.resolve_application("2"));
        assert!(tracker.is_joined("2"));
        assert!(!tracker.is_applied("2"));
    }

    #[test]
    fn application_due_time_is_four_seconds_out() {
        let mut tracker = MembershipTracker::default();
        let due = tracker.apply("2", at(0));
        assert_eq!(due, at(0) + Duration::milliseconds(4000));
    }

    #[test]
    fn cancelled_application_is_never_promoted() {
        let mut tracker = MembershipTracker::default();
        tracker.apply("2", at(0));
        assert!(tracker.cancel_application("2"));
        assert!(!tracker.resolve_application("2"));
        assert!(!tracker.is_joined("2"));
    }

    #[test]
    fn join_is_idempotent() {
        let mut tracker = MembershipTracker::default();
        assert!(tracker.join("1"));
        assert!(!tracker.join("1"));
        assert_eq!(tracker.joined_ids().len(), 1);
    }

    #[test]
    fn cancel_of_an_unknown_id_is_a_no_op() {
        let mut tracker = MembershipTracker::default();
        assert!(!tracker.cancel_application("missing"));
    }
}
