//! Commands - the settings and popup form surface

mod settings;
mod tally;

pub use settings::*;
pub use tally::*;
