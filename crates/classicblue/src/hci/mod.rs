//! Bluetooth HCI (Host Controller Interface) definitions
//!
//! This module provides the BR/EDR HCI vocabulary consumed by the pairing
//! engine: event codes, status codes, IO capability, authentication
//! requirement and link key type values.

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::{AuthRequirements, ConnectionHandle, IoCapability, LinkKey, LinkKeyType, StatusCode};
