use crate::domain::session::{PlayerId, PlayerSession};
use crate::domain::transfer::{Amount, PaymentReference, TransferSpec};
use crate::domain::turn::BatsmanMove;
use crate::error::Result;
use async_trait::async_trait;

/// Storage for per-player sessions.
///
/// Adapters only need internal consistency; the engine serializes all
/// mutations per player, so a store never sees racing writes for the same
/// `PlayerId`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, player: &PlayerId) -> Result<Option<PlayerSession>>;
    async fn put(&self, session: PlayerSession) -> Result<()>;
    async fn remove(&self, player: &PlayerId) -> Result<()>;
    async fn all(&self) -> Result<Vec<PlayerSession>>;
}

pub type SessionStoreBox = Box<dyn SessionStore>;

/// Outcome of checking an entry-fee transfer against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// The transfer is final on the ledger for at least the expected amount.
    Confirmed,
    /// Not yet finalized; the caller must not grant access and the client
    /// retries later.
    Pending,
    /// Rejected, insufficient, or unknown reference; access is denied.
    Failed,
}

/// Confirms that a payment obligation was actually settled on the ledger.
///
/// Must return immediately; if confirmation requires polling the ledger,
/// implementations report `Pending` rather than block the request path.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(
        &self,
        player: &PlayerId,
        expected_amount: Amount,
        reference: &PaymentReference,
    ) -> Result<PaymentStatus>;
}

pub type PaymentVerifierBox = Box<dyn PaymentVerifier>;

/// Constructs unsigned transfer instructions. Never signs or submits.
#[async_trait]
pub trait TransferBuilder: Send + Sync {
    async fn build(&self, from: &PlayerId, to: &PlayerId, amount: Amount) -> Result<TransferSpec>;
}

pub type TransferBuilderBox = Box<dyn TransferBuilder>;

/// Substitutable randomness for the computer opponent.
///
/// Production uses a seedable RNG adapter; tests script the draws so turn and
/// payout outcomes are deterministic.
pub trait RandomSource: Send + Sync {
    /// Uniform draw from 1..=6.
    fn draw_move(&self) -> BatsmanMove;
    /// Uniform draw from `[0, bound)`; returns 0 when `bound` is 0.
    fn draw_total(&self, bound: u32) -> u32;
}

pub type RandomSourceBox = Box<dyn RandomSource>;
