use crate::domain::session::PlayerId;
use crate::error::GameError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A positive ledger amount.
///
/// Wrapper around `rust_decimal::Decimal` so entry fees and payouts cannot be
/// zero or negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, GameError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GameError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GameError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlates an entry-fee transfer with its later settlement check.
///
/// Issued by the engine when a session enters `AwaitingPayment` and handed to
/// the payment verifier on the next `play` call. A pending reference is never
/// regenerated for the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentReference(Uuid);

impl PaymentReference {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentReference {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unsigned transfer instruction, as returned by the ledger transfer
/// builder. The engine never signs or submits it; it is passed upward for the
/// client to sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSpec {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.1)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(GameError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(GameError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_serde_rejects_non_positive() {
        let amount: Amount = serde_json::from_str("\"0.2\"").unwrap();
        assert_eq!(amount.value(), dec!(0.2));

        assert!(serde_json::from_str::<Amount>("\"-0.2\"").is_err());
    }

    #[test]
    fn test_payment_references_are_unique() {
        assert_ne!(PaymentReference::new(), PaymentReference::new());
    }

    #[test]
    fn test_transfer_spec_serializes_camel_case() {
        let spec = TransferSpec {
            from: PlayerId::parse("DemoBatsman1111111111111111111111").unwrap(),
            to: PlayerId::parse("HandCricketTreasury1111111111111").unwrap(),
            amount: Amount::new(dec!(0.1)).unwrap(),
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["amount"], serde_json::json!("0.1"));
        assert!(json.get("from").is_some());
    }
}
