//! Weighted grid graphs and search over text maps.
//!
//! This crate turns a [`TileMap`](trailgrid_core::TileMap) into a navigable
//! graph and runs searches over it:
//!
//! - **A\*** lowest-cost path search ([`SearchSpace::astar_path`])
//! - **DFS** reachability ([`SearchSpace::dfs`])
//! - **BFS** level-order reachability and depth map ([`SearchSpace::bfs`])
//! - **Connected components** labelling ([`SearchSpace::components`])
//!
//! A [`Board`] owns the parsed nodes and the [`Graph`] and stays immutable
//! while searching. Per-run bookkeeping (`g`, `f`, parents, visited marks)
//! lives in a [`SearchSpace`], so several searches can share one board.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | DFS, BFS, connected components |
//! | [`WeightedPather`] : [`Pather`] | path costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod board;
mod config;
mod dfs;
mod distance;
mod graph;
mod node;
mod space;
mod traits;

pub use board::Board;
pub use config::{BoardConfig, BorderPolicy, SearchBudget};
pub use distance::manhattan;
pub use graph::{Edge, Graph};
pub use node::{Node, Path, PathNode};
pub use space::{AbortReason, SearchOutcome, SearchSpace, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
