use crate::config::GameConfig;
use crate::domain::ports::{
    PaymentStatus, PaymentVerifierBox, RandomSourceBox, SessionStoreBox, TransferBuilderBox,
};
use crate::domain::session::{PlayerId, PlayerSession, SessionState};
use crate::domain::transfer::{PaymentReference, TransferSpec};
use crate::domain::turn::{computer_total_bound, decide, resolve_turn, BatsmanMove};
use crate::error::{GameError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::locks::PlayerLocks;

/// What `start` hands back: the fee transfer for the client to sign and the
/// reference the verifier will check on the next `play` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReceipt {
    pub message: String,
    pub reference: PaymentReference,
    pub transfer_request: TransferSpec,
}

/// The response contract surfaced to the embedding request handler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayReply {
    pub outcome_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_score: Option<u32>,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_request: Option<TransferSpec>,
}

/// The session state machine and payment-gated turn resolution engine.
///
/// `GameEngine` owns its ports as boxed trait objects and drives the
/// lifecycle `AwaitingPayment -> Active -> removed`. A player becomes
/// `Active` only after the payment verifier confirms settlement of the entry
/// fee; constructing the fee transfer grants nothing. All transitions for one
/// player run under that player's lock.
pub struct GameEngine {
    config: GameConfig,
    sessions: SessionStoreBox,
    verifier: PaymentVerifierBox,
    transfers: TransferBuilderBox,
    random: RandomSourceBox,
    locks: PlayerLocks,
}

impl GameEngine {
    pub fn new(
        config: GameConfig,
        sessions: SessionStoreBox,
        verifier: PaymentVerifierBox,
        transfers: TransferBuilderBox,
        random: RandomSourceBox,
    ) -> Self {
        Self {
            config,
            sessions,
            verifier,
            transfers,
            random,
            locks: PlayerLocks::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Begins a game: issues the entry-fee transfer and a payment reference.
    ///
    /// Idempotent while unpaid: a repeated `start` returns the *same* pending
    /// reference with a rebuilt transfer, so a double-click cannot
    /// double-charge or desynchronize verification. A `start` over an active
    /// game is rejected rather than overwriting in-flight state.
    pub async fn start(&self, player: &PlayerId) -> Result<StartReceipt> {
        let _guard = self.locks.acquire(player).await;
        let now = Utc::now();

        match self.live_session(player, now).await? {
            Some(session) => match session.state {
                SessionState::Active { .. } => Err(GameError::GameAlreadyInProgress),
                SessionState::AwaitingPayment { reference, amount } => {
                    let transfer_request = self
                        .transfers
                        .build(player, &self.config.treasury, amount)
                        .await?;
                    tracing::debug!(%player, %reference, "re-issued pending entry fee transfer");
                    Ok(StartReceipt {
                        message: fee_message(&self.config),
                        reference,
                        transfer_request,
                    })
                }
            },
            None => {
                let transfer_request = self
                    .transfers
                    .build(player, &self.config.treasury, self.config.entry_fee)
                    .await?;
                let reference = PaymentReference::new();
                let session = PlayerSession::awaiting_payment(
                    player.clone(),
                    reference,
                    self.config.entry_fee,
                    now,
                );
                self.sessions.put(session).await?;
                tracing::info!(%player, %reference, "session created, awaiting entry fee");
                Ok(StartReceipt {
                    message: fee_message(&self.config),
                    reference,
                    transfer_request,
                })
            }
        }
    }

    /// Plays one ball.
    ///
    /// On a session still awaiting payment this first consults the verifier;
    /// the payment gate applies regardless of move validity. Confirmation
    /// activates the session and the same call resolves the turn. Validation
    /// happens before any score mutation, so every error path leaves the
    /// session in a consistent state.
    pub async fn play(&self, player: &PlayerId, raw_move: &str) -> Result<PlayReply> {
        let _guard = self.locks.acquire(player).await;
        let now = Utc::now();

        let Some(mut session) = self.live_session(player, now).await? else {
            return Err(GameError::NoActiveGame);
        };

        let score = match session.state {
            SessionState::Active { score } => score,
            SessionState::AwaitingPayment { reference, amount } => {
                match self.verifier.verify(player, amount, &reference).await? {
                    PaymentStatus::Confirmed => {
                        session.activate(now);
                        // Record the confirmation before resolving the turn,
                        // so a rejected move cannot lose the paid state.
                        self.sessions.put(session.clone()).await?;
                        tracing::info!(%player, %reference, "entry fee confirmed, innings open");
                        0
                    }
                    PaymentStatus::Pending => {
                        return Err(GameError::PaymentNotConfirmed(
                            "entry fee transfer is not yet finalized, try again shortly"
                                .to_string(),
                        ));
                    }
                    PaymentStatus::Failed => {
                        self.sessions.remove(player).await?;
                        tracing::warn!(%player, %reference, "entry fee transfer failed");
                        return Err(GameError::PaymentNotConfirmed(
                            "entry fee transfer failed, start a new game".to_string(),
                        ));
                    }
                }
            }
        };

        let player_move = BatsmanMove::parse(raw_move)?;
        let computer_move = self.random.draw_move();
        let outcome = resolve_turn(player_move, computer_move, score);

        if !outcome.is_out {
            session.set_score(outcome.updated_score, now);
            self.sessions.put(session).await?;
            tracing::debug!(%player, score = outcome.updated_score, "not out");
            return Ok(PlayReply {
                outcome_message: format!(
                    "You played {player_move}, computer played {computer_move}. Score: {}. Not out yet!",
                    outcome.updated_score
                ),
                updated_score: Some(outcome.updated_score),
                game_over: false,
                transfer_request: None,
            });
        }

        // Out: the score freezes at its pre-turn value and the game settles.
        let final_score = outcome.updated_score;
        let computer_score = self.random.draw_total(computer_total_bound(final_score));
        let result = decide(final_score, computer_score, self.config.payout);

        let transfer_request = match result.payout {
            Some(payout) => Some(
                self.transfers
                    .build(&self.config.treasury, player, payout)
                    .await?,
            ),
            None => None,
        };
        self.sessions.remove(player).await?;
        tracing::info!(
            %player,
            final_score,
            computer_score,
            player_won = result.player_won,
            "game settled"
        );

        let outcome_message = if result.player_won {
            format!(
                "You played {player_move}, computer played {computer_move}. OUT! Final Score: {final_score}. \
                 Computer total: {computer_score}. You beat the computer! {} payout transfer built.",
                self.config.payout
            )
        } else {
            format!(
                "You played {player_move}, computer played {computer_move}. OUT! Final Score: {final_score}. \
                 Computer total: {computer_score}. Computer wins. No payout."
            )
        };

        Ok(PlayReply {
            outcome_message,
            updated_score: Some(final_score),
            game_over: true,
            transfer_request,
        })
    }

    /// Evicts every expired session. Intended for a periodic background
    /// sweep; lookups also evict lazily, so running this is optional.
    pub async fn sweep_expired(&self) -> Result<usize> {
        let ttl = self.config.session_ttl();
        let mut evicted = 0;
        for session in self.sessions.all().await? {
            let _guard = self.locks.acquire(&session.player).await;
            // Re-check under the player's lock; the session may have just
            // been touched or removed.
            if let Some(current) = self.sessions.get(&session.player).await?
                && current.is_expired(Utc::now(), ttl)
            {
                self.evict(&current).await?;
                evicted += 1;
            }
        }
        Ok(evicted)
    }

    /// Looks up a session, reclaiming it if the TTL has lapsed.
    ///
    /// Caller must hold the player's lock.
    async fn live_session(
        &self,
        player: &PlayerId,
        now: DateTime<Utc>,
    ) -> Result<Option<PlayerSession>> {
        match self.sessions.get(player).await? {
            Some(session) if session.is_expired(now, self.config.session_ttl()) => {
                self.evict(&session).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn evict(&self, session: &PlayerSession) -> Result<()> {
        self.sessions.remove(&session.player).await?;
        if session.is_paid() {
            // Forfeiture policy: an expired paid session is not recoverable
            // and no refund transfer is produced.
            tracing::warn!(player = %session.player, score = ?session.score(), "paid session expired, forfeited");
        } else {
            tracing::debug!(player = %session.player, "unpaid session expired");
        }
        Ok(())
    }
}

fn fee_message(config: &GameConfig) -> String {
    format!("Sign to pay {} and start the game!", config.entry_fee)
}
