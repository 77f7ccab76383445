use crate::domain::transfer::{Amount, PaymentReference};
use crate::error::{GameError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque player identity: a public address string.
///
/// The engine does not interpret the address; it only checks that it has the
/// shape of one (base58 alphabet, 32-44 characters) so obviously malformed
/// input is rejected before any session lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn parse(address: &str) -> Result<Self> {
        if address.len() < 32 || address.len() > 44 {
            return Err(GameError::InvalidAccount(format!(
                "address must be 32-44 characters, got {}",
                address.len()
            )));
        }
        if !address.chars().all(is_base58_char) {
            return Err(GameError::InvalidAccount(
                "address contains characters outside the base58 alphabet".to_string(),
            ));
        }
        Ok(Self(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Base58 excludes 0, O, I and l to avoid ambiguity.
fn is_base58_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

impl TryFrom<String> for PlayerId {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PlayerId> for String {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session is in the payment-gated game lifecycle.
///
/// There is deliberately no `Ended` variant: a finished game is a removed
/// session, win or lose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum SessionState {
    /// Entry-fee transfer was issued but settlement has not been confirmed.
    AwaitingPayment {
        reference: PaymentReference,
        amount: Amount,
    },
    /// Payment confirmed; the innings is open.
    Active { score: u32 },
}

/// Per-player game state, owned exclusively by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub player: PlayerId,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl PlayerSession {
    /// Creates a session awaiting settlement of the entry fee.
    pub fn awaiting_payment(
        player: PlayerId,
        reference: PaymentReference,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            player,
            state: SessionState::AwaitingPayment { reference, amount },
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Transitions to `Active` with score 0 once payment is confirmed.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.state = SessionState::Active { score: 0 };
        self.last_activity_at = now;
    }

    /// Records a new running score. Only meaningful while `Active`.
    pub fn set_score(&mut self, score: u32, now: DateTime<Utc>) {
        self.state = SessionState::Active { score };
        self.last_activity_at = now;
    }

    /// The running score, if payment has been confirmed.
    pub fn score(&self) -> Option<u32> {
        match self.state {
            SessionState::Active { score } => Some(score),
            SessionState::AwaitingPayment { .. } => None,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// An abandoned session is reclaimed once it has been idle for the TTL.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_activity_at > ttl
    }
}
