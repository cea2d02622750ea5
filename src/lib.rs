//! A decoder for the fixed-format UDP telemetry feed emitted by Codemasters'
//! F1 racing simulator.
//!
//! The game broadcasts a handful of fixed-size packet types, each a flat
//! byte buffer with fields at statically known offsets. This crate decodes
//! the two it cares about, the session packet (total lap count) and the lap
//! data packet (the player's current lap), and bundles a small blocking UDP
//! client that keeps a [`RaceState`](session::RaceState) up to date from the
//! live feed.
//!
//! The decoding functions in [`protocol`] are pure and allocation free, so
//! they can also be driven directly against captured datagrams without a
//! socket.

pub mod client;
pub mod protocol;
pub mod session;

pub use client::{ClientError, MessageHandler, TelemetryClient};
pub use protocol::{DecodeError, PacketKind};
pub use session::RaceState;
