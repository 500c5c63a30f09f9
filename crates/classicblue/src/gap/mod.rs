//! Generic Access Profile pairing engine for BR/EDR links
//!
//! This module provides the per-link pairing state machine, which is
//! responsible for:
//! - Driving Secure Simple Pairing from controller events
//! - Selecting the user-interaction model for a capability pair
//! - Routing user interaction through the pairing delegate
//! - Validating the security of the resulting link key
//! - Starting link encryption on success

pub mod delegate;
pub mod link;
pub mod pairing_state;
pub mod types;


// Re-export the public API
pub use delegate::{ConfirmCallback, DisplayMethod, PairingDelegate, PasskeyResponseCallback};
pub use link::BrEdrLink;
pub use pairing_state::{
    expected_pairing_event, initiator_auth_requirements, initiator_pairing_action,
    is_pairing_authenticated, responder_auth_requirements, responder_pairing_action,
    state_for_pairing_event, InitiatorAction, PairingAction, PairingState, State, StatusCallback,
    StatusListener, UserConfirmationCallback, UserPasskeyCallback,
};
pub use types::BdAddr;
