use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::player::{Player, PlayerSlot};

pub const BOARD_SIZE: usize = 3;

/// One square of the grid. Coordinates are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    owner: Option<PlayerSlot>,
}

impl Cell {
    fn new(row: usize, column: usize) -> Cell {
        Cell { row, column, owner: None }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn owner(&self) -> Option<PlayerSlot> {
        self.owner
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Running,
    Ended,
    Draw,
}

/// The eight triples that win a round.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinningLine {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

impl WinningLine {
    /// Rows, then columns, then diagonals.
    pub const ALL: [WinningLine; 8] = [
        WinningLine::Row(0),
        WinningLine::Row(1),
        WinningLine::Row(2),
        WinningLine::Column(0),
        WinningLine::Column(1),
        WinningLine::Column(2),
        WinningLine::Diagonal,
        WinningLine::AntiDiagonal,
    ];

    /// `(row, column)` of each cell on the line.
    pub fn positions(&self) -> [(usize, usize); 3] {
        match *self {
            WinningLine::Row(r) => [(r, 0), (r, 1), (r, 2)],
            WinningLine::Column(c) => [(0, c), (1, c), (2, c)],
            WinningLine::Diagonal => [(0, 0), (1, 1), (2, 2)],
            WinningLine::AntiDiagonal => [(0, 2), (1, 1), (2, 0)],
        }
    }
}

/// What `mark_cell` did with a request that was in range.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MarkOutcome {
    Applied,
    Occupied,
    NotRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    player_one: Player,
    player_two: Player,
    active: PlayerSlot,
    status: GameStatus,
    winner: Option<PlayerSlot>,
    winning_line: Option<WinningLine>,
}

impl GameBoard {
    pub fn new(player_one: Player, player_two: Player) -> GameBoard {
        GameBoard {
            cells: Self::empty_cells(),
            player_one,
            player_two,
            active: PlayerSlot::One,
            status: GameStatus::Running,
            winner: None,
            winning_line: None,
        }
    }

    fn empty_cells() -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        std::array::from_fn(|row| std::array::from_fn(|column| Cell::new(row, column)))
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell> {
        Self::check_coordinate(row, column)?;
        Ok(&self.cells[row][column])
    }

    /// The mark shown in a cell, if any.
    pub fn symbol_at(&self, row: usize, column: usize) -> Result<Option<char>> {
        Ok(self
            .cell(row, column)?
            .owner()
            .map(|slot| self.player(slot).symbol()))
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        match slot {
            PlayerSlot::One => &self.player_one,
            PlayerSlot::Two => &self.player_two,
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        match slot {
            PlayerSlot::One => &mut self.player_one,
            PlayerSlot::Two => &mut self.player_two,
        }
    }

    pub fn player_one(&self) -> &Player {
        &self.player_one
    }

    pub fn player_two(&self) -> &Player {
        &self.player_two
    }

    pub fn active_slot(&self) -> PlayerSlot {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner_slot(&self) -> Option<PlayerSlot> {
        self.winner
    }

    /// Present only once the round has `Ended`.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|slot| self.player(slot))
    }

    /// The other player of an `Ended` round.
    pub fn loser(&self) -> Option<&Player> {
        self.winner.map(|slot| self.player(slot.opponent()))
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn change_player_one_name(&mut self, name: impl Into<String>) {
        self.player_one.set_name(name);
    }

    pub fn change_player_two_name(&mut self, name: impl Into<String>) {
        self.player_two.set_name(name);
    }

    /// Places the active player's mark. Occupied cells and finished rounds are
    /// left untouched and reported through the outcome, not as errors.
    pub fn mark_cell(&mut self, row: usize, column: usize) -> Result<MarkOutcome> {
        Self::check_coordinate(row, column)?;
        if self.status != GameStatus::Running {
            return Ok(MarkOutcome::NotRunning);
        }
        let cell = &mut self.cells[row][column];
        if !cell.is_empty() {
            return Ok(MarkOutcome::Occupied);
        }
        cell.owner = Some(self.active);
        self.check_board_health();
        self.update_status();
        Ok(MarkOutcome::Applied)
    }

    /// Clears the grid for a new round. Players and their tallies are kept.
    pub fn reset_state(&mut self) {
        self.cells = Self::empty_cells();
        self.active = PlayerSlot::One;
        self.status = GameStatus::Running;
        self.winner = None;
        self.winning_line = None;
    }

    fn update_status(&mut self) {
        if let Some(line) = self.find_winning_line() {
            let winner = self.active;
            self.status = GameStatus::Ended;
            self.winner = Some(winner);
            self.winning_line = Some(line);
            self.player_mut(winner).increment_win();
            self.player_mut(winner.opponent()).increment_loss();
        } else if self.is_full() {
            self.status = GameStatus::Draw;
            self.player_one.increment_draw();
            self.player_two.increment_draw();
        } else {
            self.active = self.active.opponent();
        }
    }

    fn find_winning_line(&self) -> Option<WinningLine> {
        WinningLine::ALL.into_iter().find(|line| {
            let [a, b, c] = line
                .positions()
                .map(|(row, column)| self.cells[row][column].owner);
            a.is_some() && a == b && a == c
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    fn check_coordinate(row: usize, column: usize) -> Result<()> {
        if row < BOARD_SIZE && column < BOARD_SIZE {
            Ok(())
        } else {
            Err(GameError::InvalidCoordinate { row, column })
        }
    }

    fn check_board_health(&self) {
        let mut one_count: i32 = 0;
        let mut two_count: i32 = 0;
        for cell in self.cells.iter().flatten() {
            match cell.owner {
                Some(PlayerSlot::One) => one_count += 1,
                Some(PlayerSlot::Two) => two_count += 1,
                None => (),
            }
        }
        debug_assert!(
            (0..=1).contains(&(one_count - two_count)),
            "board corrupted: {one_count} marks for player one against {two_count} for player two"
        );
    }
}
