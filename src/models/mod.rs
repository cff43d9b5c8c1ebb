pub mod activity;
pub mod activity_row;
pub mod chat;
pub mod participant;

pub use activity::{Coordinates, DirectConversation, DirectoryEntry, GroupActivity, JoinPolicy};
pub use activity_row::ActivityRow;
pub use chat::{ChatMessage, MessageBody};
pub use participant::{AvatarConfig, Participant, UserProfile, LOCAL_USER_ID};
