use super::RoomId;
use serde::{Deserialize, Serialize};

/// The kind of space a room provides. Labs require `RoomKind::Lab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Lecture,
    Lab,
    Seminar,
}

/// A physical room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub kind: RoomKind,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Room {
    /// Whether this room can host a class of the given size.
    pub fn fits(&self, student_count: u32) -> bool {
        self.available && self.capacity >= student_count
    }
}
