use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::{GameBoard, MarkOutcome};
use crate::command::{Command, Snapshot};
use crate::error::Result;
use crate::player::{Player, PlayerSlot};

pub const PLAYER_ONE_SYMBOL: char = 'X';
pub const PLAYER_TWO_SYMBOL: char = 'O';

/// Names given to the players a session starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDefaults {
    pub player_one_name: String,
    pub player_two_name: String,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        PlayerDefaults {
            player_one_name: String::from("Player 1"),
            player_two_name: String::from("Player 2"),
        }
    }
}

/// Whether the board is taking marks. A session opens on the start screen and
/// returns there on exit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionPhase {
    Idle,
    Playing,
}

/// One browser's game: the board and both players, kept for the whole
/// connection.
#[derive(Debug)]
pub struct GameSession {
    board: GameBoard,
    phase: SessionPhase,
}

impl GameSession {
    pub fn new(defaults: PlayerDefaults) -> GameSession {
        GameSession {
            board: GameBoard::new(
                Player::new(defaults.player_one_name, PLAYER_ONE_SYMBOL),
                Player::new(defaults.player_two_name, PLAYER_TWO_SYMBOL),
            ),
            phase: SessionPhase::Idle,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.board, self.phase)
    }

    /// Applies `command` and returns the state to render. Only an out-of-range
    /// mark fails, and it leaves the session as it was.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, command: Command) -> Result<Snapshot> {
        match command {
            Command::Start => {
                info!("Game started");
                self.phase = SessionPhase::Playing;
            }
            Command::MarkCell { row, column } if self.phase == SessionPhase::Idle => {
                self.board.cell(row, column)?;
                debug!("Mark ignored before start");
            }
            Command::MarkCell { row, column } => {
                let outcome = self.board.mark_cell(row, column)?;
                if outcome != MarkOutcome::Applied {
                    debug!(?outcome, "Mark ignored");
                } else {
                    debug!(status = ?self.board.status(), "Board updated");
                }
            }
            Command::Restart => {
                info!("Restarting round");
                self.board.reset_state();
            }
            Command::ChangeName { player, name } => match player {
                PlayerSlot::One => self.board.change_player_one_name(name),
                PlayerSlot::Two => self.board.change_player_two_name(name),
            },
            Command::Exit => {
                info!("Back to the start screen");
                self.board.reset_state();
                self.phase = SessionPhase::Idle;
            }
            Command::Refresh => (),
        }
        Ok(self.snapshot())
    }
}
