use crate::application::engine::{PlayReply, StartReceipt};
use crate::domain::session::PlayerId;
use crate::error::{GameError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

/// A typed inbound request, decoded from the operation path segment and the
/// POST body.
#[derive(Debug, Clone, PartialEq)]
pub enum GameRequest {
    Start { account: PlayerId },
    Play { account: PlayerId, mv: String },
}

#[derive(Deserialize)]
struct RequestBody {
    account: Option<String>,
    #[serde(rename = "move")]
    mv: Option<String>,
}

/// Decodes an inbound request.
///
/// `operation` is the last path segment the embedding request handler routed
/// on (`"start"` or `"play"`, case-insensitive); `body` is the raw JSON POST
/// body carrying at least `account` and, for play, `move`. The operation is
/// dispatched before the body is decoded, so an unknown operation always
/// answers `UnknownOperation` whatever the body looks like. Move *values* are
/// validated later by the engine; here only presence is checked.
pub fn parse_request(operation: &str, body: &str) -> Result<GameRequest> {
    match operation.trim().to_ascii_lowercase().as_str() {
        "start" => {
            let body = decode_body(body)?;
            Ok(GameRequest::Start {
                account: require_account(body.account)?,
            })
        }
        "play" => {
            let body = decode_body(body)?;
            let mv = body
                .mv
                .ok_or_else(|| GameError::InvalidChoice("missing 'move'".to_string()))?;
            Ok(GameRequest::Play {
                account: require_account(body.account)?,
                mv,
            })
        }
        other => Err(GameError::UnknownOperation(other.to_string())),
    }
}

fn decode_body(body: &str) -> Result<RequestBody> {
    serde_json::from_str(body)
        .map_err(|e| GameError::InvalidAccount(format!("malformed request body: {e}")))
}

fn require_account(account: Option<String>) -> Result<PlayerId> {
    let account =
        account.ok_or_else(|| GameError::InvalidAccount("missing 'account'".to_string()))?;
    PlayerId::parse(&account)
}

/// The `{ errorKind, message }` envelope for rejected requests. No transfer
/// request is ever attached to an error.
pub fn error_envelope(err: &GameError) -> Value {
    json!({
        "errorKind": err.kind(),
        "message": err.to_string(),
    })
}

/// Serializes a start receipt for the response envelope.
pub fn start_envelope(receipt: &StartReceipt) -> Result<Value> {
    serde_json::to_value(receipt).map_err(|e| GameError::InternalError(Box::new(e)))
}

/// Serializes a play reply for the response envelope.
pub fn play_envelope(reply: &PlayReply) -> Result<Value> {
    serde_json::to_value(reply).map_err(|e| GameError::InternalError(Box::new(e)))
}
