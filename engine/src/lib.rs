//! Game engine for cookiebot.
//!
//! Owns the cookie ledger, the minigame outcome engine (slots, blackjack,
//! fishing), fishing progression, and the per-guild session state. The
//! messaging gateway, command parsing and the concrete storage engine are
//! external collaborators: the dispatcher calls into [`commands`] one step
//! at a time and formats the returned values into chat messages.

pub mod commands;
pub mod games;
pub mod ledger;
pub mod session;
pub mod store;

pub use commands::{CommandError, GameCommands};
pub use games::{GameError, GameRng};
pub use ledger::Ledger;
pub use session::GuildSession;
pub use store::{MemoryStore, ProfileStore};
