//! **trailgrid-core**: points, terrain and text maps for grid pathfinding.
//!
//! This crate provides the foundational types used across the *trailgrid*
//! workspace: geometry primitives, the fixed terrain vocabulary, and a parser
//! turning text maps into a grid of terrain cells.

pub mod geom;
pub mod terrain;
pub mod tilemap;

pub use geom::{Point, Range};
pub use terrain::Terrain;
pub use tilemap::{GridError, TileMap};
