use std::fmt;
use std::hash::{Hash, Hasher};

use trailgrid_core::{Point, Terrain};

/// A single cell of a [`Board`](crate::Board).
///
/// Nodes are identified by their position: equality and hashing look at
/// nothing else. Search bookkeeping is not stored here, see
/// [`SearchSpace`](crate::SearchSpace).
#[derive(Debug, Clone)]
pub struct Node {
    pos: Point,
    terrain: Terrain,
    pub(crate) h: i32,
}

impl Node {
    pub(crate) fn new(pos: Point, terrain: Terrain) -> Self {
        Self { pos, terrain, h: 0 }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Cost of stepping onto this node, `None` for walls.
    #[inline]
    pub fn arc_cost(&self) -> Option<i32> {
        self.terrain.entry_cost()
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.terrain.is_walkable()
    }

    /// Manhattan distance to the board's current goal.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node {},{} ({})", self.pos.x, self.pos.y, self.terrain)
    }
}

/// One step of a [`Path`]: a position and the cost paid to step onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// A start-to-goal path, both ends included.
///
/// The first step always has cost 0; every later step carries the entry
/// cost of its cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<PathNode>,
}

impl Path {
    pub(crate) fn new(steps: Vec<PathNode>) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps }
    }

    /// Number of cells on the path, both ends included.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: a path holds at least its start.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of the entry costs along the path.
    pub fn total_cost(&self) -> i32 {
        self.steps.iter().map(|s| s.cost).sum()
    }

    pub fn steps(&self) -> &[PathNode] {
        &self.steps
    }

    /// The positions along the path.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.steps.iter().map(|s| s.pos)
    }

    pub fn first(&self) -> Option<Point> {
        self.steps.first().map(|s| s.pos)
    }

    pub fn last(&self) -> Option<Point> {
        self.steps.last().map(|s| s.pos)
    }

    pub fn into_steps(self) -> Vec<PathNode> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathNode;
    type IntoIter = std::slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
