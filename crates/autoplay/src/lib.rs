//! Bots and a seeded headless simulator for bot-vs-bot games on the core
//! engine.

mod actors;
mod config;
mod error;
mod simulator;
mod trace;

pub use actors::*;
pub use config::*;
pub use error::*;
pub use simulator::*;
pub use trace::*;
