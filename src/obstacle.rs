use std::{fmt, str::FromStr};

use crate::entry::Entry;

/// Default width and height of an obstacle.
pub const DEFAULT_SIZE: i64 = 30;

/// Barriers span two lanes, irrespective of the requested height.
pub const BARRIER_HEIGHT: i64 = 100;

/// Kind of obstacle placed on the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Rock,
    Cone,
    Pothole,
    Oil,
    Barrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Rock,
        ObstacleKind::Cone,
        ObstacleKind::Pothole,
        ObstacleKind::Oil,
        ObstacleKind::Barrier,
    ];

    /// Name of this kind, also the name of its sprite.
    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Rock => "rock",
            ObstacleKind::Cone => "cone",
            ObstacleKind::Pothole => "pothole",
            ObstacleKind::Oil => "oil",
            ObstacleKind::Barrier => "barrier",
        }
    }

    fn index(self) -> usize {
        match self {
            ObstacleKind::Rock => 0,
            ObstacleKind::Cone => 1,
            ObstacleKind::Pothole => 2,
            ObstacleKind::Oil => 3,
            ObstacleKind::Barrier => 4,
        }
    }
}

impl fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ObstacleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<ObstacleKind, String> {
        ObstacleKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown obstacle kind {:?}", s))
    }
}

/// Damage dealt by each [`ObstacleKind`] on collision.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageTable {
    damages: [u32; 5],
}

impl DamageTable {
    pub fn damage(&self, kind: ObstacleKind) -> u32 {
        self.damages[kind.index()]
    }

    /// Override the damage for `kind`, return the old damage.
    pub fn set(&mut self, kind: ObstacleKind, damage: u32) -> u32 {
        std::mem::replace(&mut self.damages[kind.index()], damage)
    }
}

impl Default for DamageTable {
    fn default() -> Self {
        // rock, cone, pothole, oil, barrier
        DamageTable {
            damages: [20, 10, 15, 5, 25],
        }
    }
}

/// Attributes of an obstacle, indexed by its position on the track.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    kind: ObstacleKind,
    width: i64,
    height: i64,
}

impl Obstacle {
    /// Obstacle of default size.
    pub fn new(kind: ObstacleKind) -> Obstacle {
        Obstacle::with_size(kind, DEFAULT_SIZE, DEFAULT_SIZE)
    }

    /// Obstacle of given size, height is ignored for barriers.
    pub fn with_size(kind: ObstacleKind, width: i64, height: i64) -> Obstacle {
        let height = match kind {
            ObstacleKind::Barrier => BARRIER_HEIGHT,
            _ => height,
        };
        Obstacle {
            kind,
            width,
            height,
        }
    }

    #[inline]
    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.kind == ObstacleKind::Barrier
    }

    /// Only barriers can be cleared by jumping.
    #[inline]
    pub fn is_jumpable(&self) -> bool {
        self.is_barrier()
    }

    pub fn damage(&self, table: &DamageTable) -> u32 {
        table.damage(self.kind)
    }
}

/// Collision rectangle of an obstacle, `x` is the track distance and
/// `y` the lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hitbox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Entry<Obstacle> {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            x: self.primary(),
            y: self.secondary(),
            width: self.value().width,
            height: self.value().height,
        }
    }
}
