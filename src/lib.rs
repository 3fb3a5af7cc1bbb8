//! **gridmaze** is a perfect-maze generation, route finding and level layout library.

pub mod cells;
pub mod displays;
pub mod errors;
pub mod generators;
pub mod layout;
pub mod maze;
pub mod pathing;
pub mod units;
