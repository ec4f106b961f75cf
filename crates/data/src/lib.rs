//! Loading of card catalogs, deck lists and rule settings from JSON.

pub mod catalog;
pub mod decklist;
pub mod load;

pub use catalog::*;
pub use decklist::*;
pub use load::*;
