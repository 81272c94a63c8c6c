//! Adjacency built from a tile map.

use std::collections::BTreeMap;

use trailgrid_core::{Point, Terrain, TileMap};

use crate::config::BorderPolicy;
use crate::space::UNREACHABLE;
use crate::traits::{Pather, WeightedPather};

/// A one-step move onto `to`, paying `cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Point,
    pub cost: i32,
}

/// Mapping from every walkable cell to the walkable cells one step away.
///
/// Movement is 4-directional. Neighbor lists are ordered left, up, down,
/// right.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: BTreeMap<Point, Vec<Edge>>,
}

impl Graph {
    /// Build the graph of `tiles`.
    pub fn build(tiles: &TileMap, border: BorderPolicy) -> Self {
        let region = match border {
            BorderPolicy::Full => tiles.bounds(),
            BorderPolicy::ClipLastRowColumn => tiles.bounds().shrink_max(1, 1),
        };

        let mut adjacency = BTreeMap::new();
        for (p, terrain) in tiles.iter() {
            if !terrain.is_walkable() || !region.contains(p) {
                continue;
            }
            let mut edges = Vec::with_capacity(4);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    // No diagonal moves.
                    if i32::abs(dx) + i32::abs(dy) > 1 {
                        continue;
                    }
                    let q = p.shift(dx, dy);
                    if !region.contains(q) {
                        continue;
                    }
                    let Some(cost) = tiles.at(q).and_then(Terrain::entry_cost) else {
                        continue;
                    };
                    edges.push(Edge { to: q, cost });
                }
            }
            adjacency.insert(p, edges);
        }

        let graph = Self { adjacency };
        log::debug!(
            "built graph over {}: {} nodes, {} edges",
            region,
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    /// The moves out of `p`; empty if `p` is not a node.
    pub fn edges(&self, p: Point) -> &[Edge] {
        self.adjacency
            .get(&p)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `p` is a node of the graph.
    pub fn contains(&self, p: Point) -> bool {
        self.adjacency.contains_key(&p)
    }

    /// All nodes in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }

    /// All nodes with their moves, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &[Edge])> + '_ {
        self.adjacency.iter().map(|(&p, e)| (p, e.as_slice()))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl Pather for Graph {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.edges(p).iter().map(|e| e.to));
    }

    fn contains(&self, p: Point) -> bool {
        Graph::contains(self, p)
    }
}

impl WeightedPather for Graph {
    fn cost(&self, from: Point, to: Point) -> i32 {
        self.edges(from)
            .iter()
            .find(|e| e.to == to)
            .map_or(UNREACHABLE, |e| e.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(s: &str, border: BorderPolicy) -> Graph {
        Graph::build(&TileMap::parse(s).unwrap(), border)
    }

    fn targets(g: &Graph, p: Point) -> Vec<Point> {
        g.edges(p).iter().map(|e| e.to).collect()
    }

    #[test]
    fn neighbor_order_is_left_up_down_right() {
        let g = graph("...\n...\n...", BorderPolicy::Full);
        assert_eq!(
            targets(&g, Point::new(1, 1)),
            vec![
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn no_diagonals() {
        let g = graph("...\n...\n...", BorderPolicy::Full);
        for (p, edges) in g.iter() {
            for e in edges {
                let d = e.to - p;
                assert_eq!(d.x.abs() + d.y.abs(), 1, "{p} -> {}", e.to);
            }
        }
        assert_eq!(g.len(), 9);
        // 4 corners × 2 + 4 sides × 3 + centre × 4
        assert_eq!(g.edge_count(), 24);
    }

    #[test]
    fn walls_are_neither_keys_nor_neighbors() {
        let g = graph("A.#\n.#B\n...", BorderPolicy::Full);
        assert!(!g.contains(Point::new(2, 0)));
        assert!(!g.contains(Point::new(1, 1)));
        assert_eq!(targets(&g, Point::new(1, 0)), vec![Point::new(0, 0)]);
        assert_eq!(targets(&g, Point::new(2, 1)), vec![Point::new(2, 2)]);
    }

    #[test]
    fn edges_carry_entry_cost() {
        let g = graph("Awm\nfgr\n..B", BorderPolicy::Full);
        let costs: Vec<(Point, i32)> = g
            .edges(Point::new(1, 1))
            .iter()
            .map(|e| (e.to, e.cost))
            .collect();
        assert_eq!(
            costs,
            vec![
                (Point::new(0, 1), 10),
                (Point::new(1, 0), 100),
                (Point::new(1, 2), 1),
                (Point::new(2, 1), 1),
            ]
        );
        assert_eq!(g.cost(Point::new(1, 1), Point::new(2, 1)), 1);
        assert_eq!(g.cost(Point::new(2, 2), Point::new(1, 2)), 1);
        assert_eq!(g.cost(Point::new(1, 2), Point::new(2, 2)), 0);
        assert_eq!(g.cost(Point::new(2, 1), Point::new(2, 0)), 50);
        assert_eq!(g.cost(Point::new(0, 0), Point::new(2, 2)), UNREACHABLE);
    }

    #[test]
    fn full_border_includes_last_row_and_column() {
        let g = graph("A..\n...\n..B", BorderPolicy::Full);
        assert!(g.contains(Point::new(2, 2)));
        assert!(g.contains(Point::new(0, 2)));
        assert!(g.contains(Point::new(2, 0)));
    }

    #[test]
    fn clipped_border_drops_last_row_and_column() {
        let g = graph("A..\n...\n..B", BorderPolicy::ClipLastRowColumn);
        let keys: Vec<Point> = g.keys().collect();
        assert_eq!(
            keys,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1),
            ]
        );
        assert_eq!(
            targets(&g, Point::new(1, 1)),
            vec![Point::new(0, 1), Point::new(1, 0)]
        );
    }

    #[test]
    fn ragged_rows_have_no_phantom_cells() {
        let g = graph("A..\n.\n..B", BorderPolicy::Full);
        assert!(!g.contains(Point::new(1, 1)));
        assert!(!g.contains(Point::new(2, 1)));
        assert_eq!(
            targets(&g, Point::new(1, 0)),
            vec![Point::new(0, 0), Point::new(2, 0)]
        );
        assert_eq!(g.len(), 7);
    }

    #[test]
    fn pather_neighbors_match_edges() {
        let g = graph("A.\n.B", BorderPolicy::Full);
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1), Point::new(1, 0)]);
        assert!(Pather::contains(&g, Point::new(1, 1)));
        assert!(!Pather::contains(&g, Point::new(5, 5)));
    }
}
