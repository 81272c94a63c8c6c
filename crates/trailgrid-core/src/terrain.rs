//! The fixed terrain vocabulary of text maps.

use std::fmt;

/// The kind of ground a grid cell is made of.
///
/// Every terrain except [`Terrain::Wall`] can be walked on, and each walkable
/// terrain charges a fixed cost for stepping onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// `.` open floor.
    Floor,
    /// `#` impassable wall.
    Wall,
    /// `A` the start landmark.
    Start,
    /// `B` the goal landmark.
    Goal,
    /// `w`
    Water,
    /// `m`
    Mud,
    /// `f`
    Forest,
    /// `g`
    Grass,
    /// `r`
    Road,
}

impl Terrain {
    /// Every terrain, in symbol-table order.
    pub const ALL: [Terrain; 9] = [
        Terrain::Floor,
        Terrain::Wall,
        Terrain::Start,
        Terrain::Goal,
        Terrain::Water,
        Terrain::Mud,
        Terrain::Forest,
        Terrain::Grass,
        Terrain::Road,
    ];

    /// Look up the terrain drawn with `ch`, or `None` for a foreign symbol.
    pub const fn from_symbol(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Floor,
            '#' => Self::Wall,
            'A' => Self::Start,
            'B' => Self::Goal,
            'w' => Self::Water,
            'm' => Self::Mud,
            'f' => Self::Forest,
            'g' => Self::Grass,
            'r' => Self::Road,
            _ => return None,
        })
    }

    /// The map symbol for this terrain.
    pub const fn symbol(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Start => 'A',
            Self::Goal => 'B',
            Self::Water => 'w',
            Self::Mud => 'm',
            Self::Forest => 'f',
            Self::Grass => 'g',
            Self::Road => 'r',
        }
    }

    /// Cost of stepping onto a cell of this terrain, `None` for walls.
    ///
    /// Landmarks are free: standing on the start or reaching the goal
    /// costs nothing by itself.
    pub const fn entry_cost(self) -> Option<i32> {
        match self {
            Self::Wall => None,
            Self::Start | Self::Goal => Some(0),
            Self::Floor | Self::Road => Some(1),
            Self::Grass => Some(5),
            Self::Forest => Some(10),
            Self::Mud => Some(50),
            Self::Water => Some(100),
        }
    }

    /// Whether a search may step onto this terrain.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Whether this terrain marks the start or the goal.
    #[inline]
    pub const fn is_landmark(self) -> bool {
        matches!(self, Self::Start | Self::Goal)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Goal => "goal",
            Self::Water => "water",
            Self::Mud => "mud",
            Self::Forest => "forest",
            Self::Grass => "grass",
            Self::Road => "road",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
