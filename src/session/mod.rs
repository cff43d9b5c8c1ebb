pub mod chat;
pub mod cooldown;
pub mod direct;
pub mod membership;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    ChatMessage, DirectConversation, DirectoryEntry, GroupActivity, JoinPolicy, MessageBody,
    Participant, UserProfile,
};

use chat::ChatChannelStore;
use cooldown::{CancellationOutcome, CooldownPolicy};
use membership::MembershipTracker;

/// A state transition requested against the session. Every mutation of
/// session state goes through [`Session::apply`] with one of these.
#[derive(Debug, Clone)]
pub enum Action {
    RequestJoin {
        activity_id: String,
        access_code: Option<String>,
    },
    CancelApplication {
        activity_id: String,
    },
    /// Fired when an application's review delay elapses. Promotes only if
    /// the id is still in the applied set.
    ResolveApplication {
        activity_id: String,
    },
    Leave {
        activity_id: String,
    },
    AddActivity {
        activity: GroupActivity,
        auto_join: bool,
    },
    RemoveActivity {
        activity_id: String,
    },
    SendText {
        conversation_id: String,
        sender_id: String,
        content: String,
    },
    SendAudio {
        conversation_id: String,
        sender_id: String,
        bytes: Vec<u8>,
        duration_secs: u32,
    },
    OpenDirectChat {
        target_user_id: String,
    },
    ToggleFriend {
        user_id: String,
    },
    RateUser {
        user_id: String,
        stars: u8,
    },
    UpdateProfile {
        profile: UserProfile,
    },
    Reset,
}

/// User-facing outcomes of an applied action, in the order they occurred.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    Joined { activity_id: String },
    ApplicationSent { activity_id: String, resolve_at: DateTime<Utc> },
    ApplicationApproved { activity_id: String },
    ApplicationCancelled { activity_id: String, count: u32, limit: u32 },
    CooldownStarted { until: DateTime<Utc> },
    Left { activity_id: String },
    ActivityCreated { activity_id: String },
    ActivityDisbanded { activity_id: String },
    MessageSent { conversation_id: String, message_id: String },
    DirectChatReady { conversation_id: String },
    FriendAdded { user_id: String },
    FriendRemoved { user_id: String },
    UserRated { user_id: String, stars: u8 },
    ProfileUpdated,
    SessionCleared,
}

/// The whole of one local user's application state: directory, membership,
/// cooldown, chat logs and social annotations. Single-threaded from its own
/// perspective; the owner serializes access.
#[derive(Debug)]
pub struct Session {
    local_user_id: String,
    profile: UserProfile,
    directory: Vec<DirectoryEntry>,
    membership: MembershipTracker,
    cooldown: CooldownPolicy,
    chats: ChatChannelStore,
    friends: HashSet<String>,
    ratings: HashMap<String, u8>,
}

impl Session {
    pub fn new(local_user_id: impl Into<String>) -> Self {
        Self {
            local_user_id: local_user_id.into(),
            profile: UserProfile::default(),
            directory: Vec::new(),
            membership: MembershipTracker::default(),
            cooldown: CooldownPolicy::default(),
            chats: ChatChannelStore::default(),
            friends: HashSet::new(),
            ratings: HashMap::new(),
        }
    }

    pub fn local_user_id(&self) -> &str {
        &self.local_user_id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn membership(&self) -> &MembershipTracker {
        &self.membership
    }

    pub fn cooldown(&self) -> &CooldownPolicy {
        &self.cooldown
    }

    pub fn chats(&self) -> &ChatChannelStore {
        &self.chats
    }

    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friends.contains(user_id)
    }

    pub fn rating(&self, user_id: &str) -> Option<u8> {
        self.ratings.get(user_id).copied()
    }

    pub fn entry(&self, id: &str) -> Option<&DirectoryEntry> {
        self.directory.iter().find(|e| e.id() == id)
    }

    /// Bulk-loads persisted groups into the directory (startup path).
    pub fn load_groups(&mut self, groups: Vec<GroupActivity>) {
        for group in groups {
            self.directory.push(DirectoryEntry::Group(group));
        }
    }

    /// Public catalog: groups only, optionally filtered by category.
    /// Direct conversations never appear here.
    pub fn groups(&self, category: Option<&str>) -> Vec<&GroupActivity> {
        self.directory
            .iter()
            .filter_map(DirectoryEntry::as_group)
            .filter(|g| match category {
                None | Some("Alla") => true,
                Some(c) => g.category == c,
            })
            .collect()
    }

    /// Everything the local user is joined to, in directory order.
    pub fn joined_entries(&self) -> Vec<&DirectoryEntry> {
        self.directory
            .iter()
            .filter(|e| self.membership.is_joined(e.id()))
            .collect()
    }

    /// Resolves a user id to a displayable participant: the local profile,
    /// a host of any group in the directory, or the unknown placeholder.
    pub fn resolve_participant(&self, id: &str) -> Participant {
        if id == self.local_user_id {
            return self.profile.as_participant(id);
        }
        for entry in &self.directory {
            if let DirectoryEntry::Group(g) = entry {
                if g.host.id == id {
                    return g.host.clone();
                }
            }
        }
        Participant::unknown(id)
    }

    pub fn apply(&mut self, action: Action, now: DateTime<Utc>) -> Result<Vec<Notice>, AppError> {
        match action {
            Action::RequestJoin {
                activity_id,
                access_code,
            } => self.request_join(activity_id, access_code, now),
            Action::CancelApplication { activity_id } => {
                self.cancel_application(activity_id, now)
            }
            Action::ResolveApplication { activity_id } => {
                if self.membership.resolve_application(&activity_id) {
                    self.chats.ensure_channel(&activity_id, now);
                    info!(activity_id = %activity_id, "application auto-approved");
                    Ok(vec![Notice::ApplicationApproved { activity_id }])
                } else {
                    // Cancelled (or disbanded) before the delay elapsed.
                    Ok(Vec::new())
                }
            }
            Action::Leave { activity_id } => {
                if self.membership.leave(&activity_id) {
                    Ok(vec![Notice::Left { activity_id }])
                } else {
                    Ok(Vec::new())
                }
            }
            Action::AddActivity { activity, auto_join } => {
                let activity_id = activity.id.clone();
                self.directory.push(DirectoryEntry::Group(activity));
                let mut notices = vec![Notice::ActivityCreated {
                    activity_id: activity_id.clone(),
                }];
                if auto_join {
                    notices.extend(self.complete_join(&activity_id, now));
                }
                Ok(notices)
            }
            Action::RemoveActivity { activity_id } => {
                let before = self.directory.len();
                self.directory.retain(|e| e.id() != activity_id);
                if self.directory.len() == before {
                    // Already gone; disband of a missing id is a no-op.
                    return Ok(Vec::new());
                }
                self.membership.forget(&activity_id);
                Ok(vec![Notice::ActivityDisbanded { activity_id }])
            }
            Action::SendText {
                conversation_id,
                sender_id,
                content,
            } => {
                let body = MessageBody::Text { content };
                self.send_message(conversation_id, sender_id, body, now)
            }
            Action::SendAudio {
                conversation_id,
                sender_id,
                bytes,
                duration_secs,
            } => {
                let handle = self.chats.store_audio(bytes);
                let body = MessageBody::Audio {
                    handle,
                    duration_secs,
                };
                self.send_message(conversation_id, sender_id, body, now)
            }
            Action::OpenDirectChat { target_user_id } => {
                let conversation_id =
                    direct::direct_conversation_id(&self.local_user_id, &target_user_id);
                if self.entry(&conversation_id).is_none() {
                    let peer = self.resolve_participant(&target_user_id);
                    self.directory.push(DirectoryEntry::Direct(DirectConversation {
                        id: conversation_id.clone(),
                        peer,
                    }));
                    self.membership.join(&conversation_id);
                }
                Ok(vec![Notice::DirectChatReady { conversation_id }])
            }
            Action::ToggleFriend { user_id } => {
                if self.friends.remove(&user_id) {
                    Ok(vec![Notice::FriendRemoved { user_id }])
                } else {
                    self.friends.insert(user_id.clone());
                    Ok(vec![Notice::FriendAdded { user_id }])
                }
            }
            Action::RateUser { user_id, stars } => {
                if !(1..=5).contains(&stars) {
                    return Ok(Vec::new());
                }
                self.ratings.insert(user_id.clone(), stars);
                Ok(vec![Notice::UserRated { user_id, stars }])
            }
            Action::UpdateProfile { profile } => {
                self.profile = profile;
                Ok(vec![Notice::ProfileUpdated])
            }
            Action::Reset => {
                self.directory.clear();
                self.membership.clear();
                self.chats.clear();
                self.friends.clear();
                self.ratings.clear();
                Ok(vec![Notice::SessionCleared])
            }
        }
    }

    fn request_join(
        &mut self,
        activity_id: String,
        access_code: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notice>, AppError> {
        if let Some(remaining_secs) = self.cooldown.check_active(now) {
            return Err(AppError::CooldownActive { remaining_secs });
        }

        let group = match self.entry(&activity_id) {
            Some(DirectoryEntry::Group(g)) => g,
            // Direct conversations are not joinable through this path.
            _ => return Err(AppError::NotFound(activity_id)),
        };
        let policy = group.join_policy;
        let expected_code = group.access_code.clone();

        match policy {
            JoinPolicy::Open => Ok(self.complete_join(&activity_id, now)),
            JoinPolicy::Apply => {
                if self.membership.is_joined(&activity_id) || self.membership.is_applied(&activity_id)
                {
                    return Ok(Vec::new());
                }
                let resolve_at = self.membership.apply(&activity_id, now);
                Ok(vec![Notice::ApplicationSent {
                    activity_id,
                    resolve_at,
                }])
            }
            JoinPolicy::Private => match access_code {
                // Prompt dismissed: silently abandoned, no state change.
                None => Ok(Vec::new()),
                Some(code) if Some(code.as_str()) == expected_code.as_deref() => {
                    Ok(self.complete_join(&activity_id, now))
                }
                Some(_) => Err(AppError::InvalidCode),
            },
        }
    }

    fn cancel_application(
        &mut self,
        activity_id: String,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notice>, AppError> {
        if !self.membership.cancel_application(&activity_id) {
            return Ok(Vec::new());
        }
        match self.cooldown.record_cancellation(now) {
            CancellationOutcome::Warned { count, limit } => Ok(vec![Notice::ApplicationCancelled {
                activity_id,
                count,
                limit,
            }]),
            CancellationOutcome::LockedOut { until } => {
                info!(until = %until, "cancellation limit reached, cooldown opened");
                Ok(vec![
                    Notice::ApplicationCancelled {
                        activity_id,
                        count: cooldown::CANCELLATION_LIMIT,
                        limit: cooldown::CANCELLATION_LIMIT,
                    },
                    Notice::CooldownStarted { until },
                ])
            }
        }
    }

    /// Joining for the first time provisions the chat channel with its
    /// welcome message. Re-joining is a no-op.
    fn complete_join(&mut self, activity_id: &str, now: DateTime<Utc>) -> Vec<Notice> {
        let newly_joined = self.membership.join(activity_id);
        self.chats.ensure_channel(activity_id, now);
        if newly_joined {
            vec![Notice::Joined {
                activity_id: activity_id.to_string(),
            }]
        } else {
            Vec::new()
        }
    }

    /// The sender id comes from the request identity; name and avatar are
    /// resolved against the directory the same way participant views are.
    fn send_message(
        &mut self,
        conversation_id: String,
        sender_id: String,
        body: MessageBody,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notice>, AppError> {
        // Sending into a conversation no longer in the directory (e.g.
        // disbanded mid-flow) is a no-op.
        if self.entry(&conversation_id).is_none() {
            return Ok(Vec::new());
        }
        let sender = self.resolve_participant(&sender_id);
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            sender_id,
            sender_name: sender.name,
            avatar_id: sender.avatar_id,
            sent_at: now,
            body,
        };
        let message_id = message.id.clone();
        self.chats.append(&conversation_id, message);
        Ok(vec![Notice::MessageSent {
            conversation_id,
            message_id,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn group(id: &str, policy: JoinPolicy, access_code: Option<&str>) -> GroupActivity {
        GroupActivity {
            id: id.to_string(),
            host: Participant {
                id: format!("u{id}"),
                name: format!("Värd {id}"),
                avatar_id: 1,
                avatar_config: None,
            },
            title: format!("Aktivitet {id}"),
            description: String::new(),
            category: "Padel".to_string(),
            date: "2024-10-18".to_string(),
            time: "12:00".to_string(),
            duration_min: 60,
            location_name: "PDL Center".to_string(),
            location_city: "Göteborg".to_string(),
            coordinates: Coordinates {
                lat: 57.7,
                lng: 11.97,
            },
            current_participants: 3,
            max_participants: 4,
            skill_level: "Medel".to_string(),
            join_policy: policy,
            access_code: access_code.map(str::to_string),
        }
    }

    fn session_with(groups: Vec<GroupActivity>) -> Session {
        let mut session = Session::new("me");
        session.load_groups(groups);
        session
    }

    #[test]
    fn open_join_is_idempotent() {
        let mut session = session_with(vec![group("1", JoinPolicy::Open, None)]);
        let action = Action::RequestJoin {
            activity_id: "1".to_string(),
            access_code: None,
        };
        let first = session.apply(action.clone(), at(0)).unwrap();
        assert!(matches!(first[0], Notice::Joined { .. }));
        let second = session.apply(action, at(1)).unwrap();
        assert!(second.is_empty());
        assert_eq!(session.membership().joined_ids().len(), 1);
        // One welcome message, not two.
        assert_eq!(session.chats().messages("1").len(), 1);
    }

    #[test]
    fn private_join_with_the_right_code_provisions_the_channel() {
        let mut session = session_with(vec![group("6", JoinPolicy::Private, Some("1234"))]);
        let notices = session
            .apply(
                Action::RequestJoin {
                    activity_id: "6".to_string(),
                    access_code: Some("1234".to_string()),
                },
                at(0),
            )
            .unwrap();
        assert!(matches!(notices[0], Notice::Joined { .. }));
        assert!(session.membership().is_joined("6"));
        let messages = session.chats().messages("6");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "system");
    }

    #[test]
    fn private_join_with_the_wrong_code_changes_nothing() {
        let mut session = session_with(vec![group("6", JoinPolicy::Private, Some("1234"))]);
        let err = session
            .apply(
                Action::RequestJoin {
                    activity_id: "6".to_string(),
                    access_code: Some("0000".to_string()),
                },
                at(0),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCode));
        assert!(!session.membership().is_joined("6"));
        assert!(session.chats().messages("6").is_empty());
    }

    #[test]
    fn private_join_without_a_code_is_silently_abandoned() {
        let mut session = session_with(vec![group("6", JoinPolicy::Private, Some("1234"))]);
        let notices = session
            .apply(
                Action::RequestJoin {
                    activity_id: "6".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap();
        assert!(notices.is_empty());
        assert!(!session.membership().is_joined("6"));
    }

    #[test]
    fn cancelling_before_resolution_prevents_promotion() {
        let mut session = session_with(vec![group("2", JoinPolicy::Apply, None)]);
        session
            .apply(
                Action::RequestJoin {
                    activity_id: "2".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap();
        assert!(session.membership().is_applied("2"));

        session
            .apply(
                Action::CancelApplication {
                    activity_id: "2".to_string(),
                },
                at(1),
            )
            .unwrap();

        // The review delay elapses anyway; the promotion finds nothing.
        let notices = session
            .apply(
                Action::ResolveApplication {
                    activity_id: "2".to_string(),
                },
                at(4),
            )
            .unwrap();
        assert!(notices.is_empty());
        assert!(!session.membership().is_joined("2"));
    }

    #[test]
    fn resolution_promotes_a_still_pending_application() {
        let mut session = session_with(vec![group("2", JoinPolicy::Apply, None)]);
        let notices = session
            .apply(
                Action::RequestJoin {
                    activity_id: "2".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap();
        let Notice::ApplicationSent { resolve_at, .. } = &notices[0] else {
            panic!("expected application confirmation");
        };
        assert_eq!(*resolve_at, at(0) + Duration::milliseconds(4000));

        let notices = session
            .apply(
                Action::ResolveApplication {
                    activity_id: "2".to_string(),
                },
                *resolve_at,
            )
            .unwrap();
        assert!(matches!(notices[0], Notice::ApplicationApproved { .. }));
        assert!(session.membership().is_joined("2"));
        assert!(!session.membership().is_applied("2"));
        // Promotion provisions the chat channel.
        assert_eq!(session.chats().messages("2").len(), 1);
    }

    #[test]
    fn three_cancellations_lock_out_further_joins() {
        let mut session = session_with(vec![
            group("1", JoinPolicy::Open, None),
            group("2", JoinPolicy::Apply, None),
        ]);
        for i in 0..3 {
            session
                .apply(
                    Action::RequestJoin {
                        activity_id: "2".to_string(),
                        access_code: None,
                    },
                    at(i * 2),
                )
                .unwrap();
            session
                .apply(
                    Action::CancelApplication {
                        activity_id: "2".to_string(),
                    },
                    at(i * 2 + 1),
                )
                .unwrap();
        }

        // Any join attempt is now rejected, with the remaining time attached.
        let err = session
            .apply(
                Action::RequestJoin {
                    activity_id: "1".to_string(),
                    access_code: None,
                },
                at(5),
            )
            .unwrap_err();
        let AppError::CooldownActive { remaining_secs } = err else {
            panic!("expected cooldown rejection");
        };
        assert_eq!(remaining_secs, 30);
        assert!(!session.membership().is_joined("1"));

        // Once the lockout has passed, joins work again.
        let notices = session
            .apply(
                Action::RequestJoin {
                    activity_id: "1".to_string(),
                    access_code: None,
                },
                at(36),
            )
            .unwrap();
        assert!(matches!(notices[0], Notice::Joined { .. }));
    }

    #[test]
    fn joining_an_unknown_activity_is_not_found() {
        let mut session = session_with(Vec::new());
        let err = session
            .apply(
                Action::RequestJoin {
                    activity_id: "missing".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn disband_unwinds_membership_and_keeps_the_chat_log() {
        let mut session = session_with(vec![group("1", JoinPolicy::Open, None)]);
        session
            .apply(
                Action::RequestJoin {
                    activity_id: "1".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap();
        let notices = session
            .apply(
                Action::RemoveActivity {
                    activity_id: "1".to_string(),
                },
                at(1),
            )
            .unwrap();
        assert!(matches!(notices[0], Notice::ActivityDisbanded { .. }));
        assert!(session.entry("1").is_none());
        assert!(!session.membership().is_joined("1"));
        // Append-only log survives the disband.
        assert_eq!(session.chats().messages("1").len(), 1);

        // Sending into the disbanded conversation is a no-op.
        let notices = session
            .apply(
                Action::SendText {
                    conversation_id: "1".to_string(),
                    sender_id: "me".to_string(),
                    content: "hej?".to_string(),
                },
                at(2),
            )
            .unwrap();
        assert!(notices.is_empty());
        assert_eq!(session.chats().messages("1").len(), 1);
    }

    #[test]
    fn direct_chat_synthesizes_one_entry_for_both_directions() {
        let mut session = session_with(vec![group("1", JoinPolicy::Open, None)]);
        let notices = session
            .apply(
                Action::OpenDirectChat {
                    target_user_id: "u1".to_string(),
                },
                at(0),
            )
            .unwrap();
        let Notice::DirectChatReady { conversation_id } = &notices[0] else {
            panic!("expected conversation id");
        };
        assert_eq!(conversation_id, "dm_me_u1");
        assert!(session.membership().is_joined("dm_me_u1"));
        // Peer resolved from the group's host field.
        match session.entry("dm_me_u1") {
            Some(DirectoryEntry::Direct(d)) => assert_eq!(d.peer.name, "Värd 1"),
            other => panic!("expected direct entry, got {other:?}"),
        }
        // No welcome message for direct conversations.
        assert!(session.chats().messages("dm_me_u1").is_empty());

        // Opening again reuses the entry.
        let again = session
            .apply(
                Action::OpenDirectChat {
                    target_user_id: "u1".to_string(),
                },
                at(1),
            )
            .unwrap();
        assert!(matches!(&again[0], Notice::DirectChatReady { conversation_id } if conversation_id == "dm_me_u1"));
        assert_eq!(session.joined_entries().len(), 1);
    }

    #[test]
    fn direct_conversations_never_appear_in_the_catalog() {
        let mut session = session_with(vec![group("1", JoinPolicy::Open, None)]);
        session
            .apply(
                Action::OpenDirectChat {
                    target_user_id: "u9".to_string(),
                },
                at(0),
            )
            .unwrap();
        assert_eq!(session.groups(None).len(), 1);
        assert_eq!(session.groups(Some("Alla")).len(), 1);
        assert_eq!(session.groups(Some("Padel")).len(), 1);
        assert!(session.groups(Some("Boule")).is_empty());
    }

    #[test]
    fn messages_carry_the_senders_resolved_identity() {
        let mut session = session_with(vec![group("1", JoinPolicy::Open, None)]);
        session
            .apply(
                Action::RequestJoin {
                    activity_id: "1".to_string(),
                    access_code: None,
                },
                at(0),
            )
            .unwrap();

        let send = |id: &str| Action::SendText {
            conversation_id: "1".to_string(),
            sender_id: id.to_string(),
            content: "hej".to_string(),
        };
        session.apply(send("me"), at(1)).unwrap();
        session.apply(send("u1"), at(2)).unwrap();
        session.apply(send("u99"), at(3)).unwrap();

        let messages = session.chats().messages("1");
        // [0] is the welcome message.
        assert_eq!(messages[1].sender_id, "me");
        assert_eq!(messages[1].sender_name, session.profile().name);
        assert_eq!(messages[2].sender_id, "u1");
        assert_eq!(messages[2].sender_name, "Värd 1");
        assert_eq!(messages[3].sender_name, "Okänd Användare");
    }

    #[test]
    fn out_of_range_ratings_are_ignored() {
        let mut session = session_with(Vec::new());
        let notices = session
            .apply(
                Action::RateUser {
                    user_id: "u1".to_string(),
                    stars: 0,
                },
                at(0),
            )
            .unwrap();
        assert!(notices.is_empty());
        assert_eq!(session.rating("u1"), None);

        session
            .apply(
                Action::RateUser {
                    user_id: "u1".to_string(),
                    stars: 4,
                },
                at(1),
            )
            .unwrap();
        assert_eq!(session.rating("u1"), Some(4));
    }
}
