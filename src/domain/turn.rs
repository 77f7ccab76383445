use crate::domain::transfer::Amount;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A batsman's (or the computer's) choice: a number from 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BatsmanMove(u8);

impl BatsmanMove {
    pub const ALL: [BatsmanMove; 6] = [
        BatsmanMove(1),
        BatsmanMove(2),
        BatsmanMove(3),
        BatsmanMove(4),
        BatsmanMove(5),
        BatsmanMove(6),
    ];

    pub fn new(value: u8) -> Result<Self> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidChoice(value.to_string()))
        }
    }

    /// Parses the `move` field of a play request.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: u8 = raw
            .trim()
            .parse()
            .map_err(|_| GameError::InvalidChoice(raw.to_string()))?;
        Self::new(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BatsmanMove {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BatsmanMove> for u8 {
    fn from(mv: BatsmanMove) -> Self {
        mv.0
    }
}

impl fmt::Display for BatsmanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of a single ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnOutcome {
    pub player_move: BatsmanMove,
    pub computer_move: BatsmanMove,
    pub is_out: bool,
    /// The running score after the ball: unchanged when out, otherwise the
    /// previous score plus the player's move.
    pub updated_score: u32,
}

/// Resolves one ball. Pure: the computer's move is drawn by the caller.
///
/// The batsman is out exactly when both picked the same number; an out on the
/// first ball (score 0) is a normal terminal state.
pub fn resolve_turn(player_move: BatsmanMove, computer_move: BatsmanMove, score: u32) -> TurnOutcome {
    let is_out = player_move == computer_move;
    let updated_score = if is_out {
        score
    } else {
        score + u32::from(player_move.value())
    };
    TurnOutcome {
        player_move,
        computer_move,
        is_out,
        updated_score,
    }
}

/// The settlement of a finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub final_score: u32,
    pub computer_score: u32,
    pub player_won: bool,
    /// The fixed reward when the player wins, `None` otherwise.
    pub payout: Option<Amount>,
}

/// The computer's total is drawn uniformly from `[0, final_score + 10)`.
pub fn computer_total_bound(final_score: u32) -> u32 {
    final_score + 10
}

/// Decides the winner once the batsman is out. Pure: `computer_score` is
/// drawn by the caller from [`computer_total_bound`].
///
/// A tie goes to the computer: the player wins only when the drawn total is
/// strictly below the final score. In particular a final score of 0 can never
/// win. Winner take all; there is no partial payout for an accrued score.
pub fn decide(final_score: u32, computer_score: u32, payout: Amount) -> GameResult {
    let player_won = computer_score < final_score;
    GameResult {
        final_score,
        computer_score,
        player_won,
        payout: player_won.then_some(payout),
    }
}
