//! Two-player tic-tac-toe played in a browser.
//!
//! The game itself lives on the server: the page sends one [`Command`] per
//! click over a WebSocket and redraws from the [`Snapshot`] it gets back.

pub mod board;
pub mod command;
pub mod config;
pub mod error;
pub mod message;
pub mod player;
pub mod resources;
pub mod server;
pub mod session;

pub use board::{Cell, GameBoard, GameStatus, MarkOutcome, WinningLine};
pub use command::{Command, PlayerView, Snapshot};
pub use error::{GameError, Result};
pub use player::{Player, PlayerSlot};
pub use session::{GameSession, PlayerDefaults, SessionPhase};
