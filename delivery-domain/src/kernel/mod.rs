//! 共享内核：在各聚合之间通用的值对象
//!
mod location;
mod volume;

pub use location::{Location, MAX_X, MAX_Y, MIN_X, MIN_Y};
pub use volume::{MIN_VOLUME, Volume};
