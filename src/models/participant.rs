use serde::{Deserialize, Serialize};

/// Stable identifier for the local session's user.
pub const LOCAL_USER_ID: &str = "me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    pub skin_color: String,
    pub hair_color: String,
    pub hair_style: String,
    pub clothing: String,
    pub glasses: bool,
}

/// A user as seen by others. Derived on demand from the local profile, an
/// activity's host field, or the unknown placeholder; never stored as a
/// separate master list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub avatar_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_config: Option<AvatarConfig>,
}

impl Participant {
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Okänd Användare".to_string(),
            avatar_id: 1,
            avatar_config: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub avatar_id: i64,
    pub bio: String,
    pub languages: Vec<String>,
    pub age: String,
    pub hobbies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_config: Option<AvatarConfig>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Ny Användare".to_string(),
            avatar_id: 1,
            bio: String::new(),
            languages: vec!["Svenska".to_string()],
            age: String::new(),
            hobbies: Vec::new(),
            avatar_config: None,
        }
    }
}

impl UserProfile {
    pub fn as_participant(&self, id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: self.name.clone(),
            avatar_id: self.avatar_id,
            avatar_config: self.avatar_config.clone(),
        }
    }
}
