use serde::{Deserialize, Serialize};

use super::participant::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Direct join.
    Open,
    /// Host-gated; auto-approved after a review delay.
    Apply,
    /// Access-code gated.
    Private,
}

impl JoinPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinPolicy::Open => "open",
            JoinPolicy::Apply => "apply",
            JoinPolicy::Private => "private",
        }
    }

    pub fn parse(input: &str) -> JoinPolicy {
        match input {
            "apply" => JoinPolicy::Apply,
            "private" => JoinPolicy::Private,
            _ => JoinPolicy::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A hostable, joinable event with schedule, location and capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupActivity {
    #[serde(default)]
    pub id: String,
    pub host: Participant,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub duration_min: i64,
    pub location_name: String,
    pub location_city: String,
    pub coordinates: Coordinates,
    pub current_participants: i64,
    pub max_participants: i64,
    pub skill_level: String,
    pub join_policy: JoinPolicy,
    // Never echoed back in listings.
    #[serde(default, skip_serializing)]
    pub access_code: Option<String>,
}

/// A synthesized two-party conversation. Shares the membership and chat
/// machinery with groups but carries none of the group-only fields
/// (capacity, schedule, join policy).
#[derive(Debug, Clone, Serialize)]
pub struct DirectConversation {
    pub id: String,
    pub peer: Participant,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectoryEntry {
    Group(GroupActivity),
    Direct(DirectConversation),
}

impl DirectoryEntry {
    pub fn id(&self) -> &str {
        match self {
            DirectoryEntry::Group(g) => &g.id,
            DirectoryEntry::Direct(d) => &d.id,
        }
    }

    pub fn as_group(&self) -> Option<&GroupActivity> {
        match self {
            DirectoryEntry::Group(g) => Some(g),
            DirectoryEntry::Direct(_) => None,
        }
    }

    pub fn conversation_title(&self) -> String {
        match self {
            DirectoryEntry::Group(g) => g.title.clone(),
            DirectoryEntry::Direct(d) => format!("Chatt med {}", d.peer.name),
        }
    }
}
