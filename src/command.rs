use serde::{Deserialize, Serialize};

use crate::board::{GameBoard, GameStatus, WinningLine, BOARD_SIZE};
use crate::player::{Player, PlayerSlot};
use crate::session::SessionPhase;

/// A single user action, translated by the view from a click or a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Start,
    MarkCell { row: usize, column: usize },
    Restart,
    ChangeName { player: PlayerSlot, name: String },
    Exit,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: PlayerSlot,
    pub name: String,
    pub symbol: char,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl PlayerView {
    fn of(slot: PlayerSlot, player: &Player) -> PlayerView {
        PlayerView {
            slot,
            name: player.name().to_string(),
            symbol: player.symbol(),
            wins: player.wins(),
            losses: player.losses(),
            draws: player.draws(),
        }
    }
}

/// Everything the view needs to redraw itself after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: [[Option<char>; BOARD_SIZE]; BOARD_SIZE],
    pub players: [PlayerView; 2],
    pub active_player: PlayerSlot,
    pub status: GameStatus,
    pub winner: Option<PlayerSlot>,
    pub winning_line: Option<WinningLine>,
    pub phase: SessionPhase,
    pub info: String,
}

impl Snapshot {
    pub fn of(board: &GameBoard, phase: SessionPhase) -> Snapshot {
        let grid = *board.cells();
        let cells = grid.map(|row| {
            row.map(|cell| cell.owner().map(|slot| board.player(slot).symbol()))
        });
        Snapshot {
            cells,
            players: [
                PlayerView::of(PlayerSlot::One, board.player_one()),
                PlayerView::of(PlayerSlot::Two, board.player_two()),
            ],
            active_player: board.active_slot(),
            status: board.status(),
            winner: board.winner_slot(),
            winning_line: board.winning_line(),
            phase,
            info: match phase {
                SessionPhase::Idle => String::from("Click Start to Play!"),
                SessionPhase::Playing => game_info(board),
            },
        }
    }
}

/// The one-line banner shown above the grid.
pub fn game_info(board: &GameBoard) -> String {
    match (board.status(), board.winner()) {
        (GameStatus::Ended, Some(winner)) => format!("{} Win!", winner.name()),
        (GameStatus::Draw, _) => String::from("Draw!"),
        _ => {
            let name = board.active_player().name();
            let suffix = if name.ends_with('s') { "'" } else { "'s" };
            format!("{name}{suffix} Turn")
        }
    }
}
