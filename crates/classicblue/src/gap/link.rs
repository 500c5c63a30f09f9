//! Link abstraction consumed by the pairing engine

use crate::hci::{ConnectionHandle, LinkKey};

/// Host-side view of an established BR/EDR baseband link
///
/// The link is owned by the connection layer and outlives the pairing
/// engine bound to it; the engine only reads and updates its key material
/// and asks it to start encryption.
pub trait BrEdrLink {
    /// Connection handle the controller assigned to this link
    fn handle(&self) -> ConnectionHandle;

    /// Current link key, if the link has one
    fn link_key(&self) -> Option<LinkKey>;

    /// Replace the link key with one produced by pairing
    fn set_link_key(&mut self, key: LinkKey);

    /// Ask the controller to encrypt the link
    ///
    /// Returns false if the request could not be issued. Completion is
    /// reported later through `PairingState::on_encryption_change`.
    fn start_encryption(&mut self) -> bool;
}
