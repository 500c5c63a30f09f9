//! Type definitions for the BR/EDR HCI layer

use super::constants::*;
use crate::error::{PairingError, PairingStatus};
use std::fmt;

/// Connection handle assigned to a baseband link by the controller
pub type ConnectionHandle = u16;

/// Status code carried by an HCI event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u8);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(STATUS_SUCCESS);

    pub fn is_success(self) -> bool {
        self.0 == STATUS_SUCCESS
    }

    /// Convert a controller-reported status into a pairing outcome
    pub fn to_result(self) -> PairingStatus {
        if self.is_success() {
            Ok(())
        } else {
            Err(PairingError::Controller(self))
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// IO capability values used on the BR/EDR wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoCapability {
    /// Display only capability
    DisplayOnly,
    /// Display with yes/no capability
    DisplayYesNo,
    /// Keyboard only
    KeyboardOnly,
    /// No input, no output
    NoInputNoOutput,
}

impl IoCapability {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            IoCapability::DisplayOnly => IO_CAPABILITY_DISPLAY_ONLY,
            IoCapability::DisplayYesNo => IO_CAPABILITY_DISPLAY_YES_NO,
            IoCapability::KeyboardOnly => IO_CAPABILITY_KEYBOARD_ONLY,
            IoCapability::NoInputNoOutput => IO_CAPABILITY_NO_INPUT_NO_OUTPUT,
        }
    }

    /// Convert from u8 value from protocol
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            IO_CAPABILITY_DISPLAY_ONLY => Some(IoCapability::DisplayOnly),
            IO_CAPABILITY_DISPLAY_YES_NO => Some(IoCapability::DisplayYesNo),
            IO_CAPABILITY_KEYBOARD_ONLY => Some(IoCapability::KeyboardOnly),
            IO_CAPABILITY_NO_INPUT_NO_OUTPUT => Some(IoCapability::NoInputNoOutput),
            _ => None,
        }
    }
}

impl fmt::Display for IoCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoCapability::DisplayOnly => write!(f, "Display Only"),
            IoCapability::DisplayYesNo => write!(f, "Display Yes/No"),
            IoCapability::KeyboardOnly => write!(f, "Keyboard Only"),
            IoCapability::NoInputNoOutput => write!(f, "No Input No Output"),
        }
    }
}

/// Authentication requirements reported in an IO Capability reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirements {
    /// No bonding, MITM protection not required
    NoBonding,
    /// No bonding, MITM protection required
    MitmNoBonding,
    /// Dedicated bonding, MITM protection not required
    DedicatedBonding,
    /// Dedicated bonding, MITM protection required
    MitmDedicatedBonding,
    /// General bonding, MITM protection not required
    GeneralBonding,
    /// General bonding, MITM protection required
    MitmGeneralBonding,
}

impl AuthRequirements {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            AuthRequirements::NoBonding => AUTH_REQ_NO_BONDING,
            AuthRequirements::MitmNoBonding => AUTH_REQ_MITM_NO_BONDING,
            AuthRequirements::DedicatedBonding => AUTH_REQ_DEDICATED_BONDING,
            AuthRequirements::MitmDedicatedBonding => AUTH_REQ_MITM_DEDICATED_BONDING,
            AuthRequirements::GeneralBonding => AUTH_REQ_GENERAL_BONDING,
            AuthRequirements::MitmGeneralBonding => AUTH_REQ_MITM_GENERAL_BONDING,
        }
    }

    /// Convert from u8 value from protocol
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            AUTH_REQ_NO_BONDING => Some(AuthRequirements::NoBonding),
            AUTH_REQ_MITM_NO_BONDING => Some(AuthRequirements::MitmNoBonding),
            AUTH_REQ_DEDICATED_BONDING => Some(AuthRequirements::DedicatedBonding),
            AUTH_REQ_MITM_DEDICATED_BONDING => Some(AuthRequirements::MitmDedicatedBonding),
            AUTH_REQ_GENERAL_BONDING => Some(AuthRequirements::GeneralBonding),
            AUTH_REQ_MITM_GENERAL_BONDING => Some(AuthRequirements::MitmGeneralBonding),
            _ => None,
        }
    }

    /// Whether this requirement includes MITM protection
    pub fn mitm(&self) -> bool {
        matches!(
            self,
            AuthRequirements::MitmNoBonding
                | AuthRequirements::MitmDedicatedBonding
                | AuthRequirements::MitmGeneralBonding
        )
    }
}

/// Link key types reported by a Link Key Notification event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKeyType {
    /// Legacy combination key
    Combination,
    /// Legacy local unit key
    LocalUnit,
    /// Legacy remote unit key
    RemoteUnit,
    /// Debug combination key from a controller in pairing debug mode
    DebugCombination,
    /// Unauthenticated key from P-192 Secure Simple Pairing
    UnauthenticatedCombination192,
    /// Authenticated key from P-192 Secure Simple Pairing
    AuthenticatedCombination192,
    /// Replacement for an existing combination key
    ChangedCombination,
    /// Unauthenticated key from P-256 Secure Connections
    UnauthenticatedCombination256,
    /// Authenticated key from P-256 Secure Connections
    AuthenticatedCombination256,
}

impl LinkKeyType {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            LinkKeyType::Combination => LINK_KEY_COMBINATION,
            LinkKeyType::LocalUnit => LINK_KEY_LOCAL_UNIT,
            LinkKeyType::RemoteUnit => LINK_KEY_REMOTE_UNIT,
            LinkKeyType::DebugCombination => LINK_KEY_DEBUG_COMBINATION,
            LinkKeyType::UnauthenticatedCombination192 => LINK_KEY_UNAUTHENTICATED_P192,
            LinkKeyType::AuthenticatedCombination192 => LINK_KEY_AUTHENTICATED_P192,
            LinkKeyType::ChangedCombination => LINK_KEY_CHANGED_COMBINATION,
            LinkKeyType::UnauthenticatedCombination256 => LINK_KEY_UNAUTHENTICATED_P256,
            LinkKeyType::AuthenticatedCombination256 => LINK_KEY_AUTHENTICATED_P256,
        }
    }

    /// Convert from u8 value from protocol
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            LINK_KEY_COMBINATION => Some(LinkKeyType::Combination),
            LINK_KEY_LOCAL_UNIT => Some(LinkKeyType::LocalUnit),
            LINK_KEY_REMOTE_UNIT => Some(LinkKeyType::RemoteUnit),
            LINK_KEY_DEBUG_COMBINATION => Some(LinkKeyType::DebugCombination),
            LINK_KEY_UNAUTHENTICATED_P192 => Some(LinkKeyType::UnauthenticatedCombination192),
            LINK_KEY_AUTHENTICATED_P192 => Some(LinkKeyType::AuthenticatedCombination192),
            LINK_KEY_CHANGED_COMBINATION => Some(LinkKeyType::ChangedCombination),
            LINK_KEY_UNAUTHENTICATED_P256 => Some(LinkKeyType::UnauthenticatedCombination256),
            LINK_KEY_AUTHENTICATED_P256 => Some(LinkKeyType::AuthenticatedCombination256),
            _ => None,
        }
    }
}

impl fmt::Display for LinkKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.to_u8())
    }
}

/// A BR/EDR link key together with the type the controller reported for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkKey {
    /// Key value
    pub value: [u8; LINK_KEY_SIZE],
    /// Reported key type
    pub key_type: LinkKeyType,
}

impl LinkKey {
    /// Create a new link key
    pub fn new(value: [u8; LINK_KEY_SIZE], key_type: LinkKeyType) -> Self {
        Self { value, key_type }
    }
}
