use super::activity::{Coordinates, GroupActivity, JoinPolicy};
use super::participant::Participant;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub activity_id: String,
    pub host_user_id: String,
    pub host_name: String,
    pub host_avatar_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub duration_min: i64,
    pub location_name: String,
    pub location_city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_participants: i64,
    pub max_participants: i64,
    pub skill_level: String,
    pub join_policy: String,
    pub access_code: Option<String>,
}

impl ActivityRow {
    pub fn into_group(self) -> GroupActivity {
        GroupActivity {
            id: self.activity_id,
            host: Participant {
                id: self.host_user_id,
                name: self.host_name,
                avatar_id: self.host_avatar_id,
                avatar_config: None,
            },
            title: self.title,
            description: self.description,
            category: self.category,
            date: self.date,
            time: self.time,
            duration_min: self.duration_min,
            location_name: self.location_name,
            location_city: self.location_city,
            coordinates: Coordinates {
                lat: self.latitude,
                lng: self.longitude,
            },
            current_participants: self.current_participants,
            max_participants: self.max_participants,
            skill_level: self.skill_level,
            join_policy: JoinPolicy::parse(&self.join_policy),
            access_code: self.access_code,
        }
    }
}
