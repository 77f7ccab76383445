use crate::domain::session::PlayerId;
use crate::domain::transfer::Amount;
use crate::error::{GameError, Result};
use chrono::Duration;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Default treasury placeholder; embedding services supply the real address.
pub const DEFAULT_TREASURY: &str = "HandCricketTreasury1111111111111";

const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Engine configuration: the money rules and session retention policy.
///
/// Deserializable so the embedding service can load it from JSON; the payout
/// must exceed the entry fee (the house edge is funded by losing players'
/// fees, not by shorting winners).
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    pub treasury: PlayerId,
    pub entry_fee: Amount,
    pub payout: Amount,
    session_ttl_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameConfig {
    treasury: PlayerId,
    entry_fee: Amount,
    payout: Amount,
    #[serde(default = "default_ttl_secs")]
    session_ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.treasury, raw.entry_fee, raw.payout, raw.session_ttl_secs)
    }
}

impl GameConfig {
    pub fn new(
        treasury: PlayerId,
        entry_fee: Amount,
        payout: Amount,
        session_ttl_secs: u64,
    ) -> Result<Self> {
        if payout <= entry_fee {
            return Err(GameError::ValidationError(
                "payout must exceed the entry fee".to_string(),
            ));
        }
        if session_ttl_secs == 0 {
            return Err(GameError::ValidationError(
                "session TTL must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            treasury,
            entry_fee,
            payout,
            session_ttl_secs,
        })
    }

    /// How long an idle session is retained before reclamation.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl_secs as i64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        // All literals below satisfy the constructor's checks.
        Self::new(
            PlayerId::parse(DEFAULT_TREASURY).expect("default treasury address is well-formed"),
            Amount::new(dec!(0.1)).expect("default entry fee is positive"),
            Amount::new(dec!(0.2)).expect("default payout is positive"),
            DEFAULT_SESSION_TTL_SECS,
        )
        .expect("default configuration is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert!(config.payout > config.entry_fee);
        assert_eq!(config.session_ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_payout_must_exceed_entry_fee() {
        let config = GameConfig::default();
        let result = GameConfig::new(
            config.treasury.clone(),
            config.payout,
            config.entry_fee,
            60,
        );
        assert!(matches!(result, Err(GameError::ValidationError(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{
                "treasury": "HandCricketTreasury1111111111111",
                "entryFee": "0.5",
                "payout": "1.0"
            }"#,
        )
        .unwrap();
        assert_eq!(config.entry_fee.value().to_string(), "0.5");
        assert_eq!(config.session_ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_config_json_rejects_inverted_amounts() {
        let result = serde_json::from_str::<GameConfig>(
            r#"{
                "treasury": "HandCricketTreasury1111111111111",
                "entryFee": "1.0",
                "payout": "0.5"
            }"#,
        );
        assert!(result.is_err());
    }
}
