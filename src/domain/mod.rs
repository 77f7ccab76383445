//! Domain model: sessions, moves, transfers and the ports the engine
//! depends on.

pub mod ports;
pub mod session;
pub mod transfer;
pub mod turn;
