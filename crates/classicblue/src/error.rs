//! Error types for the classicblue library
//!
//! This module defines the error types used throughout the library.

use crate::hci::StatusCode;
use thiserror::Error;

/// Errors that terminate a pairing negotiation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingError {
    #[error("Pairing delegate not available")]
    NotReady,

    #[error("Pairing request canceled")]
    Canceled,

    #[error("Event not supported in the current state")]
    NotSupported,

    #[error("Pairing failed")]
    Failed,

    #[error("Link key does not meet the required security level")]
    InsufficientSecurity,

    #[error("Controller reported status {0}")]
    Controller(StatusCode),
}

/// Outcome delivered to every party waiting on a pairing
pub type PairingStatus = Result<(), PairingError>;
