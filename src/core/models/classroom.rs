//! Classroom model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of teaching space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    /// Lecture hall
    Lecture,
    /// Workshop (taller)
    Workshop,
    /// Computer lab (informàtica)
    ComputerLab,
    /// Multipurpose room (polivalent)
    Multipurpose,
    /// Project room (projectes)
    ProjectRoom,
    /// Seminar room
    Seminar,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lecture => "Lecture",
            Self::Workshop => "Workshop",
            Self::ComputerLab => "Computer lab",
            Self::Multipurpose => "Multipurpose",
            Self::ProjectRoom => "Project room",
            Self::Seminar => "Seminar",
        };
        f.write_str(label)
    }
}

/// A physical room that occupations can book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Storage identifier
    pub id: String,

    /// Human-readable unique code (e.g., "P.1.4")
    pub code: String,

    /// Display name
    pub name: String,

    /// Building name or letter
    #[serde(default)]
    pub building: String,

    /// Floor number (0 = ground floor)
    #[serde(default)]
    pub floor: i8,

    /// Seats
    pub capacity: u32,

    /// Kind of room
    pub room_type: RoomType,

    /// Installed equipment (e.g., "projector", "smarttv")
    #[serde(default)]
    pub equipment: Vec<String>,

    /// Whether the room can currently be booked
    #[serde(default = "default_available")]
    pub is_available: bool,
}

const fn default_available() -> bool {
    true
}

impl Classroom {
    /// Create an available classroom without equipment
    #[must_use]
    pub fn new(id: &str, code: &str, capacity: u32, room_type: RoomType) -> Self {
        Self {
            id: id.to_string(),
            code: code.to_string(),
            name: code.to_string(),
            building: String::new(),
            floor: 0,
            capacity,
            room_type,
            equipment: Vec::new(),
            is_available: true,
        }
    }

    /// Whether the room lists `item` among its equipment (case-insensitive)
    #[must_use]
    pub fn has_equipment(&self, item: &str) -> bool {
        self.equipment.iter().any(|e| e.eq_ignore_ascii_case(item))
    }
}
