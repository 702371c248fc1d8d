//! Jigsaw puzzle simulation
//!
//! Twelve pieces on a 3x4 grid. Dropping a piece next to a correctly
//! neighbouring piece snaps and merges their groups; the puzzle is solved
//! when one group holds every piece.

pub mod board;
pub mod disjoint_set;

pub use board::{Board, DropOutcome, Merge, Piece, grid_of, scatter_position};
pub use disjoint_set::DisjointSet;
