use std::collections::VecDeque;
use std::fmt;

use trailgrid_core::{Point, Range};

use crate::node::Path;

/// Sentinel meaning "unreachable" in BFS depth maps and edge costs.
pub const UNREACHABLE: i32 = i32::MAX;

/// Why a search stopped before reaching a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The configured number of expansions was used up.
    StepLimit,
    /// The configured deadline passed.
    Deadline,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepLimit => f.write_str("step limit reached"),
            Self::Deadline => f.write_str("deadline passed"),
        }
    }
}

/// Result of a path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A lowest-cost path, both ends included.
    Found(Path),
    /// The goal is not reachable from the start.
    NoPath,
    /// The search gave up before deciding.
    Aborted(AbortReason),
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-run A* bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct SearchNode {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Open-set entry. `g` is a snapshot used to recognise stale entries.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f, then smallest h,
        // then the earliest pushed.
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Reusable per-run search state over a grid rectangle.
///
/// A `SearchSpace` holds everything a search mutates (costs, parents,
/// visited marks, queues) so the graph itself stays shared and immutable.
/// Repeated queries reuse the buffers; state from an earlier run is never
/// observed by a later one.
pub struct SearchSpace {
    pub(crate) bounds: Range,
    pub(crate) width: usize,
    // A*
    pub(crate) astar_nodes: Vec<SearchNode>,
    pub(crate) astar_generation: u32,
    pub(crate) seq: u64,
    pub(crate) expanded: usize,
    // DFS
    pub(crate) seen: Vec<bool>,
    pub(crate) stack: Vec<usize>,
    // BFS
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) queue: VecDeque<usize>,
    // components
    pub(crate) cc_labels: Vec<i32>,
    // neighbor scratch
    pub(crate) nbuf: Vec<Point>,
}

impl SearchSpace {
    /// Create a search space for the given grid rectangle.
    pub fn new(bounds: Range) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
            astar_nodes: vec![SearchNode::default(); len],
            astar_generation: 0,
            seq: 0,
            expanded: 0,
            seen: vec![false; len],
            stack: Vec::new(),
            bfs_map: vec![UNREACHABLE; len],
            queue: VecDeque::new(),
            cc_labels: vec![-1; len],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The cells this space can hold state for.
    #[inline]
    pub fn range(&self) -> Range {
        self.bounds
    }

    /// Number of nodes the last A* run expanded.
    #[inline]
    pub fn last_expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new A* run: every node from earlier runs becomes stale.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.astar_generation = self.astar_generation.wrapping_add(1);
        if self.astar_generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            for n in self.astar_nodes.iter_mut() {
                n.generation = 0;
            }
            self.astar_generation = 1;
        }
        self.seq = 0;
        self.astar_generation
    }

    #[inline]
    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat row-major index of `p`, if covered.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Inverse of [`idx`](Self::idx).
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.bounds.min.x;
        let y = (idx / self.width) as i32 + self.bounds.min.y;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn index_round_trip() {
        let sp = SearchSpace::new(Range::new(2, 3, 7, 6));
        assert_eq!(sp.idx(Point::new(2, 3)), Some(0));
        assert_eq!(sp.idx(Point::new(6, 5)), Some(14));
        assert_eq!(sp.idx(Point::new(7, 3)), None);
        assert_eq!(sp.idx(Point::new(1, 3)), None);
        for i in 0..sp.range().len() {
            assert_eq!(sp.idx(sp.point(i)), Some(i));
        }
    }

    #[test]
    fn open_entries_pop_by_f_then_h_then_seq() {
        let e = |idx: usize, f: i32, h: i32, seq: u64| OpenEntry {
            idx,
            g: f - h,
            h,
            f,
            seq,
        };
        let mut heap = BinaryHeap::new();
        heap.push(e(0, 5, 1, 1));
        heap.push(e(1, 4, 3, 2));
        heap.push(e(2, 4, 2, 3));
        heap.push(e(3, 4, 2, 4));
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|x| x.idx)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn generation_wrap_clears_stamps() {
        let mut sp = SearchSpace::new(Range::new(0, 0, 2, 2));
        sp.astar_nodes[1].generation = 7;
        sp.astar_generation = u32::MAX;
        assert_eq!(sp.next_generation(), 1);
        assert!(sp.astar_nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn outcome_accessors() {
        let aborted = SearchOutcome::Aborted(AbortReason::Deadline);
        assert!(!aborted.is_found());
        assert_eq!(aborted.path(), None);
        assert_eq!(SearchOutcome::NoPath.into_path(), None);
        assert_eq!(AbortReason::StepLimit.to_string(), "step limit reached");
    }
}
