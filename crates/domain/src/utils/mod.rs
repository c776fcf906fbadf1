//! Domain utility functions

pub mod duration;
