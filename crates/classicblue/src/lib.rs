//! ClassicBlue - A Rust library for Bluetooth BR/EDR Secure Simple Pairing
//!
//! This library implements the pairing and authentication engine of a
//! Bluetooth Classic (BR/EDR) host stack: a per-link state machine driven by
//! controller events that negotiates IO capabilities, runs the selected
//! user-interaction model through a pairing delegate, validates the strength
//! of the resulting link key, and brings up link encryption.
//!
//! HCI transport and packet encoding, LE pairing, and bond persistence are
//! external concerns and are not part of this crate.

pub mod error;
pub mod gap;
pub mod hci;
pub mod smp;

// Re-export common types for convenience
pub use error::{PairingError, PairingStatus};
pub use gap::{
    BdAddr, BrEdrLink, DisplayMethod, InitiatorAction, PairingAction, PairingDelegate,
    PairingState, State, StatusCallback, StatusListener,
};
pub use hci::{AuthRequirements, ConnectionHandle, IoCapability, LinkKey, LinkKeyType, StatusCode};
pub use smp::{SecurityLevel, SecurityProperties};
