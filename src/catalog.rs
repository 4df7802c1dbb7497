//! The fixed room catalog and occupancy derivation.
//!
//! The hotel has exactly 100 rooms across 5 categories. Rooms are not
//! persisted anywhere: the catalog is regenerated in memory on demand and
//! occupancy is derived by scanning the in-house collection for matching
//! room numbers. Occupancy is a view, never a stored fact.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::InHouseGuest;

/// One of the 5 fixed room categories.
///
/// Serializes as the guest-facing display name ("King Bed Suite", ...).
/// Unrecognized names deserialize as [`RoomType::Deluxe`], whose 299
/// nightly rate is the pricing default for unknown types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Standard,
    Deluxe,
    Executive,
    FamilySuite,
    KingSuite,
}

impl RoomType {
    /// All categories, in catalog order.
    pub const ALL: [RoomType; 5] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Executive,
        RoomType::FamilySuite,
        RoomType::KingSuite,
    ];

    /// Guest-facing display name; also the persisted representation.
    pub fn display_name(self) -> &'static str {
        match self {
            RoomType::Standard => "Standard Room",
            RoomType::Deluxe => "Deluxe Room",
            RoomType::Executive => "Executive Room",
            RoomType::FamilySuite => "Family Suite",
            RoomType::KingSuite => "King Bed Suite",
        }
    }

    /// Parse a display name. Returns `None` for unknown strings.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }

    /// Nightly rate in whole currency units.
    pub fn nightly_rate(self) -> u64 {
        match self {
            RoomType::Standard => 199,
            RoomType::Deluxe => 299,
            RoomType::Executive => 349,
            RoomType::FamilySuite => 399,
            RoomType::KingSuite => 499,
        }
    }

    /// How many rooms of this category exist in the fixed catalog.
    pub fn catalog_count(self) -> usize {
        match self {
            RoomType::Standard => 40,
            RoomType::Deluxe => 25,
            RoomType::Executive => 20,
            RoomType::FamilySuite => 10,
            RoomType::KingSuite => 5,
        }
    }

    /// Sleeping capacity of a room in this category.
    pub fn capacity(self) -> u32 {
        match self {
            RoomType::Standard | RoomType::Deluxe => 2,
            RoomType::Executive => 2,
            RoomType::FamilySuite => 4,
            RoomType::KingSuite => 3,
        }
    }

    fn amenities(self) -> &'static [&'static str] {
        match self {
            RoomType::Standard => &["Wi-Fi", "TV"],
            RoomType::Deluxe => &["Wi-Fi", "TV", "Mini Bar"],
            RoomType::Executive => &["Wi-Fi", "TV", "Mini Bar", "Work Desk"],
            RoomType::FamilySuite => &["Wi-Fi", "TV", "Mini Bar", "Kitchenette"],
            RoomType::KingSuite => &["Wi-Fi", "TV", "Mini Bar", "Jacuzzi", "City View"],
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<String> for RoomType {
    fn from(name: String) -> Self {
        RoomType::from_name(&name).unwrap_or(RoomType::Deluxe)
    }
}

impl From<RoomType> for String {
    fn from(room_type: RoomType) -> Self {
        room_type.display_name().to_owned()
    }
}

/// Availability state of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Cleaning,
}

/// A room in the derived catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u32,
    pub room_number: String,
    pub room_type: RoomType,
    pub floor: u32,
    pub capacity: u32,
    /// Nightly rate, duplicated from the category for display convenience.
    pub price: u64,
    pub status: RoomStatus,
    pub amenities: Vec<String>,
}

/// Regenerate the fixed 100-room catalog.
///
/// Rooms are laid out 10 per floor across floors 1-10, numbered
/// `floor * 100 + slot` (101..110, 201..210, ...), with categories
/// assigned contiguously in [`RoomType::ALL`] order. The layout is
/// deterministic: every call returns the same catalog, all rooms
/// `available`.
pub fn room_catalog() -> Vec<Room> {
    let mut rooms = Vec::with_capacity(100);
    let mut index = 0u32;
    for room_type in RoomType::ALL {
        for _ in 0..room_type.catalog_count() {
            let floor = index / 10 + 1;
            let slot = index % 10 + 1;
            rooms.push(Room {
                id: index + 1,
                room_number: format!("{}", floor * 100 + slot),
                room_type,
                floor,
                capacity: room_type.capacity(),
                price: room_type.nightly_rate(),
                status: RoomStatus::Available,
                amenities: room_type
                    .amenities()
                    .iter()
                    .map(|a| (*a).to_owned())
                    .collect(),
            });
            index += 1;
        }
    }
    rooms
}

/// Regenerate the catalog with occupancy derived from the in-house
/// collection: any room whose number matches an in-house guest is marked
/// `occupied`.
pub fn catalog_with_occupancy(in_house: &[InHouseGuest]) -> Vec<Room> {
    let occupied: HashSet<&str> = in_house.iter().map(|g| g.room_number.as_str()).collect();
    let mut rooms = room_catalog();
    for room in &mut rooms {
        if occupied.contains(room.room_number.as_str()) {
            room.status = RoomStatus::Occupied;
        }
    }
    rooms
}
