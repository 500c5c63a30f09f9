//! Pairing delegate interface
//!
//! The delegate is the UI-facing component consulted whenever pairing needs
//! user interaction. Every method completes through a callback that may be
//! invoked at an arbitrary later time, or never; the engine stays parked in
//! the matching wait state until the reply (or a failure event) arrives.

use super::types::BdAddr;
use crate::error::PairingStatus;
use crate::smp;

/// How a passkey handed to [`PairingDelegate::display_passkey`] is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMethod {
    /// Both sides display the value and the user confirms they match
    Comparison,
    /// The peer is entering the value on its side; nothing to confirm here
    PeerEntry,
}

/// Reply to a user confirmation prompt
pub type ConfirmCallback = Box<dyn FnOnce(bool)>;

/// Reply to a passkey entry prompt; negative values mean no passkey
pub type PasskeyResponseCallback = Box<dyn FnOnce(i64)>;

/// User-interaction surface consulted during pairing
pub trait PairingDelegate {
    /// IO capability of the local user interface
    fn io_capability(&self) -> smp::IoCapability;

    /// Show a passkey to the user
    ///
    /// With `DisplayMethod::Comparison` the callback carries the user's
    /// match/no-match decision; with `DisplayMethod::PeerEntry` the reply
    /// has no effect.
    fn display_passkey(
        &self,
        peer_id: BdAddr,
        passkey: u32,
        method: DisplayMethod,
        confirm: ConfirmCallback,
    );

    /// Ask the user for a yes/no pairing consent
    fn confirm_pairing(&self, peer_id: BdAddr, confirm: ConfirmCallback);

    /// Prompt the user to enter the passkey shown on the peer
    fn request_passkey(&self, peer_id: BdAddr, respond: PasskeyResponseCallback);

    /// Report the final outcome of a pairing the user was involved in
    fn complete_pairing(&self, peer_id: BdAddr, status: PairingStatus);
}
