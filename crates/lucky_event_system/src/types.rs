//! # Core Type Definitions
//!
//! Identifier and transform types shared by the host and its plugins.
//!
//! ## Key Types
//!
//! - [`PlayerId`] - Unique identifier for players (acting agents)
//! - [`EntityId`] - Handle for an object living in the game world
//! - [`Vec3`] - World position
//! - [`Quat`] - World rotation
//!
//! All types serialize to JSON so they can travel inside events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a player in the game world.
///
/// This is a wrapper around UUID that provides type safety and ensures
/// player IDs cannot be confused with entity IDs.
///
/// # Examples
///
/// ```rust
/// use lucky_event_system::PlayerId;
///
/// let player_id = PlayerId::new();
/// let parsed = PlayerId::from_str("550e8400-e29b-41d4-a716-446655440000")?;
/// println!("Player ID: {}", parsed);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a player ID from a string representation.
    ///
    /// # Returns
    ///
    /// Returns `Ok(PlayerId)` if the string is a valid UUID, otherwise returns
    /// `Err(uuid::Error)` with details about the parsing failure.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for an object placed in the world.
///
/// Handles are issued by the [`World`](crate::World) implementation and stay
/// unique for the lifetime of the host; a destroyed entity's handle is never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// Represents a 3D position in the game world.
///
/// # Examples
///
/// ```rust
/// use lucky_event_system::Vec3;
///
/// let position = Vec3::new(100.5, 64.0, -200.25);
/// let distance = position.distance(Vec3::zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate (typically east-west axis)
    pub x: f64,
    /// Y coordinate (typically vertical axis)
    pub y: f64,
    /// Z coordinate (typically north-south axis)
    pub z: f64,
}

impl Vec3 {
    /// Creates a new Vec3 with the specified coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Calculates the Euclidean distance to another Vec3.
    pub fn distance(&self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Creates a zero vector (0, 0, 0).
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation stored as a quaternion (x, y, z, w).
///
/// Rotations are carried from the placed object to its replacement untouched,
/// so no arithmetic beyond construction is provided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `degrees` around the vertical (Y) axis.
    pub fn from_yaw_degrees(degrees: f64) -> Self {
        let half = degrees.to_radians() / 2.0;
        Self::new(0.0, half.sin(), 0.0, half.cos())
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}
