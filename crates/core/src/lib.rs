//! Rules engine for a two-player collectible card game. Keep this crate free
//! of IO and platform concerns.

pub mod action;
pub mod cards;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod deck;
pub mod engine;
pub mod events;
pub mod instance;
pub mod legal;
pub mod mana;
pub mod phase;
pub mod resolve;
pub mod rng;
pub mod state;
pub mod zones;

pub use action::*;
pub use cards::*;
pub use catalog::*;
pub use combat::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use events::*;
pub use instance::*;
pub use legal::*;
pub use mana::*;
pub use phase::*;
pub use resolve::*;
pub use rng::*;
pub use state::*;
pub use zones::*;
