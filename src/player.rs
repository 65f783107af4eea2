use serde::{Deserialize, Serialize};

/// Which of the two seats a player occupies on a board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn opponent(&self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// A participant with a fixed mark and a running tally of outcomes.
///
/// The tallies only ever grow; a fresh `Player` is the only way back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    symbol: char,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, symbol: char) -> Player {
        Player {
            name: name.into(),
            symbol,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn increment_win(&mut self) {
        self.wins += 1;
    }

    pub fn increment_loss(&mut self) {
        self.losses += 1;
    }

    pub fn increment_draw(&mut self) {
        self.draws += 1;
    }
}
