//! The parsed map with its nodes, graph and landmarks.

use std::str::FromStr;

use trailgrid_core::{GridError, Point, Range, Terrain, TileMap};

use crate::config::{BoardConfig, SearchBudget};
use crate::distance::manhattan;
use crate::graph::Graph;
use crate::node::Node;
use crate::space::{SearchOutcome, SearchSpace};
use crate::traits::{AstarPather, Pather, WeightedPather};

const NO_NODE: usize = usize::MAX;

/// A text map ready for searching.
///
/// A board owns one [`Node`] per map cell and the [`Graph`] derived from
/// them. It knows the start (`A`) and goal (`B`) and keeps every node's
/// heuristic in step with the current goal. Boards are not modified by
/// searches, so one board can serve any number of
/// [`SearchSpace`]s, including from several threads.
#[derive(Debug, Clone)]
pub struct Board {
    bounds: Range,
    nodes: Vec<Node>,
    // flat cell index -> index into `nodes`, NO_NODE for missing cells
    slots: Vec<usize>,
    graph: Graph,
    start: usize,
    goal: usize,
    // zero-cost cells a path may step onto, excluding the start
    free_cells: i32,
    config: BoardConfig,
}

impl Board {
    /// Parse `s` and build a board with the default configuration.
    pub fn new(s: &str) -> Result<Self, GridError> {
        Self::with_config(s, BoardConfig::default())
    }

    /// Parse `s` and build a board.
    pub fn with_config(s: &str, config: BoardConfig) -> Result<Self, GridError> {
        Self::from_tiles(&TileMap::parse(s)?, config)
    }

    /// Build a board from an already parsed map.
    ///
    /// The map must hold exactly one start and exactly one goal.
    pub fn from_tiles(tiles: &TileMap, config: BoardConfig) -> Result<Self, GridError> {
        let start_pos = tiles.landmark(Terrain::Start)?;
        let goal_pos = tiles.landmark(Terrain::Goal)?;

        let bounds = tiles.bounds();
        let mut nodes = Vec::new();
        let mut slots = vec![NO_NODE; bounds.len()];
        let mut start = NO_NODE;
        let mut goal = NO_NODE;
        for (i, p) in bounds.iter().enumerate() {
            let Some(terrain) = tiles.at(p) else {
                continue;
            };
            if p == start_pos {
                start = nodes.len();
            }
            if p == goal_pos {
                goal = nodes.len();
            }
            slots[i] = nodes.len();
            nodes.push(Node::new(p, terrain));
        }

        let mut board = Self {
            bounds,
            nodes,
            slots,
            graph: Graph::build(tiles, config.border),
            start,
            goal,
            free_cells: 0,
            config,
        };
        board.refresh_heuristics();
        log::debug!(
            "board {}: start {}, goal {}, {} walkable nodes",
            bounds,
            start_pos,
            goal_pos,
            board.graph.len()
        );
        Ok(board)
    }

    /// The map's bounding rectangle.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The start node.
    #[inline]
    pub fn start_node(&self) -> &Node {
        &self.nodes[self.start]
    }

    /// The current goal node.
    #[inline]
    pub fn goal_node(&self) -> &Node {
        &self.nodes[self.goal]
    }

    /// The node of a landmark terrain.
    ///
    /// `Start` and `Goal` return the board's start and current goal. Other
    /// terrains must occur exactly once on the map.
    pub fn landmark(&self, terrain: Terrain) -> Result<&Node, GridError> {
        match terrain {
            Terrain::Start => Ok(self.start_node()),
            Terrain::Goal => Ok(self.goal_node()),
            _ => {
                let mut found = self.nodes.iter().filter(|n| n.terrain() == terrain);
                let first = found.next().ok_or(GridError::MissingLandmark(terrain))?;
                match found.next() {
                    Some(second) => Err(GridError::DuplicateLandmark {
                        terrain,
                        first: first.pos(),
                        second: second.pos(),
                    }),
                    None => Ok(first),
                }
            }
        }
    }

    /// The node at `p`, or `None` outside the map or past a short row.
    pub fn node(&self, p: Point) -> Option<&Node> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        let slot = self.slots[y * self.bounds.width() as usize + x];
        self.nodes.get(slot)
    }

    /// All nodes in row-major order, walls included.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Move the goal to another walkable cell and refresh every heuristic.
    ///
    /// The terrain of both cells is unchanged.
    pub fn set_goal(&mut self, p: Point) -> Result<(), GridError> {
        if !self.bounds.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        let goal = match self.node(p) {
            Some(n) if n.is_walkable() => self.slot(p),
            _ => return Err(GridError::NotWalkable(p)),
        };
        self.goal = goal;
        self.refresh_heuristics();
        log::debug!("goal moved to {p}");
        Ok(())
    }

    /// Recompute every node's `h` as the Manhattan distance to the goal.
    ///
    /// Construction and [`set_goal`](Self::set_goal) call this, so
    /// heuristics are never stale.
    pub fn refresh_heuristics(&mut self) {
        let goal = self.nodes[self.goal].pos();
        for n in self.nodes.iter_mut() {
            n.h = manhattan(n.pos(), goal);
        }
        let start = self.nodes[self.start].pos();
        self.free_cells = self
            .nodes
            .iter()
            .filter(|n| n.pos() != start && n.arc_cost() == Some(0))
            .count() as i32;
    }

    fn slot(&self, p: Point) -> usize {
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        self.slots[y * self.bounds.width() as usize + x]
    }

    // -----------------------------------------------------------------------
    // Searches with a fresh search space
    // -----------------------------------------------------------------------

    /// A* from the start to the goal, without limits.
    pub fn astar(&self) -> SearchOutcome {
        self.astar_with(&SearchBudget::default())
    }

    /// A* from the start to the goal within `budget`.
    pub fn astar_with(&self, budget: &SearchBudget) -> SearchOutcome {
        let mut space = SearchSpace::new(self.bounds);
        space.astar_path(
            self,
            self.start_node().pos(),
            self.goal_node().pos(),
            budget,
        )
    }

    /// Nodes reachable from the start, depth-first.
    pub fn dfs(&self) -> Vec<Point> {
        SearchSpace::new(self.bounds).dfs(self, self.start_node().pos())
    }

    /// Nodes reachable from the start, breadth-first.
    pub fn bfs(&self) -> Vec<Point> {
        SearchSpace::new(self.bounds).bfs(self, self.start_node().pos())
    }
}

impl FromStr for Board {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Pather for Board {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.graph.neighbors(p, buf);
    }

    fn contains(&self, p: Point) -> bool {
        self.graph.contains(p)
    }
}

impl WeightedPather for Board {
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.graph.cost(from, to)
    }
}

impl AstarPather for Board {
    /// Manhattan distance, less the zero-cost cells a simple path could still
    /// step onto. Free cells are the only steps that do not pay at least 1.
    fn estimate(&self, from: Point, to: Point) -> i32 {
        let h = match self.node(from) {
            Some(n) if to == self.goal_node().pos() => n.h(),
            _ => manhattan(from, to),
        };
        (h - self.free_cells).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BorderPolicy;

    #[test]
    fn landmarks_are_found() {
        let board = Board::new("A.#\n.#B\n...").unwrap();
        assert_eq!(board.start_node().pos(), Point::new(0, 0));
        assert_eq!(board.goal_node().pos(), Point::new(2, 1));
        assert_eq!(board.start_node().terrain(), Terrain::Start);
        assert_eq!(board.landmark(Terrain::Goal).map(Node::pos), Ok(Point::new(2, 1)));
        assert_eq!(
            board.landmark(Terrain::Water),
            Err(GridError::MissingLandmark(Terrain::Water))
        );
        assert_eq!(
            board.landmark(Terrain::Wall),
            Err(GridError::DuplicateLandmark {
                terrain: Terrain::Wall,
                first: Point::new(2, 0),
                second: Point::new(1, 1),
            })
        );
    }

    #[test]
    fn missing_goal() {
        assert_eq!(
            Board::new("A..\n...").unwrap_err(),
            GridError::MissingLandmark(Terrain::Goal)
        );
        assert_eq!(
            Board::new("..B").unwrap_err(),
            GridError::MissingLandmark(Terrain::Start)
        );
    }

    #[test]
    fn two_starts_are_ambiguous() {
        assert_eq!(
            Board::new("A.A\n..B").unwrap_err(),
            GridError::DuplicateLandmark {
                terrain: Terrain::Start,
                first: Point::new(0, 0),
                second: Point::new(2, 0),
            }
        );
    }

    #[test]
    fn structural_errors_surface() {
        assert!(matches!(Board::new(""), Err(GridError::Malformed(_))));
        assert!(matches!(
            "A.z\n..B".parse::<Board>(),
            Err(GridError::UnknownSymbol { ch: 'z', .. })
        ));
    }

    #[test]
    fn heuristics_follow_the_goal() {
        let mut board = Board::new("A...\n....\n...B").unwrap();
        assert_eq!(board.node(Point::new(0, 0)).map(Node::h), Some(5));
        assert_eq!(board.node(Point::new(3, 2)).map(Node::h), Some(0));
        assert!(board.nodes().all(|n| n.h() == manhattan(n.pos(), Point::new(3, 2))));

        board.set_goal(Point::new(1, 0)).unwrap();
        assert_eq!(board.goal_node().pos(), Point::new(1, 0));
        assert_eq!(board.goal_node().terrain(), Terrain::Floor);
        assert!(board.nodes().all(|n| n.h() == manhattan(n.pos(), Point::new(1, 0))));

        let path = board.astar().into_path().unwrap();
        assert_eq!(path.last(), Some(Point::new(1, 0)));
        assert_eq!(path.total_cost(), 1);
    }

    #[test]
    fn set_goal_rejects_bad_cells() {
        let mut board = Board::new("A#\n.B\n.").unwrap();
        assert_eq!(
            board.set_goal(Point::new(1, 0)),
            Err(GridError::NotWalkable(Point::new(1, 0)))
        );
        assert_eq!(
            board.set_goal(Point::new(1, 2)),
            Err(GridError::NotWalkable(Point::new(1, 2)))
        );
        assert_eq!(
            board.set_goal(Point::new(2, 0)),
            Err(GridError::OutOfBounds(Point::new(2, 0)))
        );
        assert_eq!(board.goal_node().pos(), Point::new(1, 1));
    }

    #[test]
    fn estimate_is_admissible_next_to_the_goal() {
        let board = Board::new("A.B").unwrap();
        let goal = board.goal_node().pos();
        // Stepping onto the goal is free.
        assert_eq!(board.estimate(Point::new(1, 0), goal), 0);
        assert_eq!(board.estimate(Point::new(0, 0), goal), 1);
    }

    #[test]
    fn ragged_board() {
        let board = Board::new("A..\n.\n..B").unwrap();
        assert!(board.node(Point::new(1, 1)).is_none());
        assert_eq!(board.nodes().count(), 7);
        let path = board.astar().into_path().unwrap();
        assert_eq!(path.total_cost(), 3);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn traversals_from_start() {
        let board = Board::new("A.#..\n..#.B").unwrap();
        assert_eq!(board.dfs().len(), 4);
        assert_eq!(board.bfs().len(), 4);
        assert_eq!(board.bfs()[0], Point::new(0, 0));
    }

    #[test]
    fn config_is_kept() {
        let config = BoardConfig::default().with_border(BorderPolicy::ClipLastRowColumn);
        let board = Board::with_config("A..\n..B\n...", config).unwrap();
        assert_eq!(board.config(), config);
        assert!(!board.graph().contains(Point::new(2, 1)));
    }

    #[test]
    fn boards_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Board>();

        let board = Board::new("A...\n.##.\n...B").unwrap();
        let expected = board.astar();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(board.astar(), expected));
            }
        });
    }
}
