use crate::domain::ports::{PaymentStatus, PaymentVerifier, TransferBuilder};
use crate::domain::session::PlayerId;
use crate::domain::transfer::{Amount, PaymentReference, TransferSpec};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-process stand-in for the ledger, implementing both outbound ports.
///
/// Used by the CLI demo and the test suite. Transfers are only recorded,
/// never submitted; settlement is driven either automatically (`auto_settling`,
/// every reference confirms) or manually via [`settle`](Self::settle) and
/// [`reject`](Self::reject).
#[derive(Default, Clone)]
pub struct LocalLedger {
    auto_settle: bool,
    settled: Arc<RwLock<HashSet<PaymentReference>>>,
    rejected: Arc<RwLock<HashSet<PaymentReference>>>,
    built: Arc<RwLock<Vec<TransferSpec>>>,
}

impl LocalLedger {
    /// A ledger where nothing settles until told to.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that treats every payment reference as settled.
    pub fn auto_settling() -> Self {
        Self {
            auto_settle: true,
            ..Self::default()
        }
    }

    /// Marks a payment reference as finalized.
    pub async fn settle(&self, reference: PaymentReference) {
        self.settled.write().await.insert(reference);
    }

    /// Marks a payment reference as failed.
    pub async fn reject(&self, reference: PaymentReference) {
        self.rejected.write().await.insert(reference);
    }

    /// Every transfer instruction built so far, in order.
    pub async fn built_transfers(&self) -> Vec<TransferSpec> {
        self.built.read().await.clone()
    }
}

#[async_trait]
impl TransferBuilder for LocalLedger {
    async fn build(&self, from: &PlayerId, to: &PlayerId, amount: Amount) -> Result<TransferSpec> {
        let spec = TransferSpec {
            from: from.clone(),
            to: to.clone(),
            amount,
        };
        self.built.write().await.push(spec.clone());
        Ok(spec)
    }
}

#[async_trait]
impl PaymentVerifier for LocalLedger {
    async fn verify(
        &self,
        _player: &PlayerId,
        _expected_amount: Amount,
        reference: &PaymentReference,
    ) -> Result<PaymentStatus> {
        if self.rejected.read().await.contains(reference) {
            return Ok(PaymentStatus::Failed);
        }
        if self.auto_settle || self.settled.read().await.contains(reference) {
            return Ok(PaymentStatus::Confirmed);
        }
        Ok(PaymentStatus::Pending)
    }
}
