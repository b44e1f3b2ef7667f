//! Command modules

pub mod fuse;
pub mod turns;
