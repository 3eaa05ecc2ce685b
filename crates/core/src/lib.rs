//! Battle rules. Keep this crate free of IO and platform concerns.

pub mod battle;
pub mod cards;
pub mod combatant;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod state;
pub mod stats;

pub use battle::*;
pub use cards::*;
pub use combatant::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use rng::*;
pub use scoring::*;
pub use selection::*;
pub use session::*;
pub use state::*;
pub use stats::*;
