//! Type definitions for the security manager layer

use crate::hci::LinkKeyType;
use std::fmt;

/// IO Capability types for pairing
///
/// This is the full security-manager capability set reported by a pairing
/// delegate. BR/EDR pairing has no wire encoding for `KeyboardDisplay`;
/// [`io_capability_for_hci`](super::util::io_capability_for_hci) collapses
/// it onto `DisplayYesNo`.
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
    /// Both keyboard and display
    KeyboardDisplay,
}

impl IoCapability {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            IoCapability::DisplayOnly => super::constants::SMP_IO_CAPABILITY_DISPLAY_ONLY,
            IoCapability::DisplayYesNo => super::constants::SMP_IO_CAPABILITY_DISPLAY_YES_NO,
            IoCapability::KeyboardOnly => super::constants::SMP_IO_CAPABILITY_KEYBOARD_ONLY,
            IoCapability::NoInputNoOutput => super::constants::SMP_IO_CAPABILITY_NO_INPUT_NO_OUTPUT,
            IoCapability::KeyboardDisplay => super::constants::SMP_IO_CAPABILITY_KEYBOARD_DISPLAY,
        }
    }

    /// Convert from u8 value from protocol
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            super::constants::SMP_IO_CAPABILITY_DISPLAY_ONLY => Some(IoCapability::DisplayOnly),
            super::constants::SMP_IO_CAPABILITY_DISPLAY_YES_NO => Some(IoCapability::DisplayYesNo),
            super::constants::SMP_IO_CAPABILITY_KEYBOARD_ONLY => Some(IoCapability::KeyboardOnly),
            super::constants::SMP_IO_CAPABILITY_NO_INPUT_NO_OUTPUT => {
                Some(IoCapability::NoInputNoOutput)
            }
            super::constants::SMP_IO_CAPABILITY_KEYBOARD_DISPLAY => {
                Some(IoCapability::KeyboardDisplay)
            }
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
            IoCapability::KeyboardDisplay => write!(f, "Keyboard Display"),
        }
    }
}

/// Security level of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// No security (unencrypted or legacy key)
    None = 0,
    /// Encryption without authentication (Just Works)
    EncryptionOnly = 1,
    /// Encryption with authentication (MITM protection)
    EncryptionWithAuthentication = 2,
    /// Secure Connections with encryption and authentication
    SecureConnections = 3,
}

impl SecurityLevel {
    /// Check if this security level includes encryption
    pub fn is_encrypted(&self) -> bool {
        *self >= SecurityLevel::EncryptionOnly
    }

    /// Check if this security level includes authentication
    pub fn is_authenticated(&self) -> bool {
        *self >= SecurityLevel::EncryptionWithAuthentication
    }
}

/// Security properties of the key produced by a pairing
///
/// The controller and the host both derive the association model, so the
/// properties of the reported key type can be checked against what the
/// capability exchange predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityProperties {
    encrypted: bool,
    authenticated: bool,
    secure_connections: bool,
}

impl SecurityProperties {
    /// Derive the security properties of a reported link key type
    pub fn from_link_key_type(key_type: LinkKeyType) -> Self {
        match key_type {
            // Legacy keys and keys of unknowable provenance carry no
            // provable security.
            LinkKeyType::Combination
            | LinkKeyType::LocalUnit
            | LinkKeyType::RemoteUnit
            | LinkKeyType::DebugCombination
            | LinkKeyType::ChangedCombination => Self {
                encrypted: false,
                authenticated: false,
                secure_connections: false,
            },
            LinkKeyType::UnauthenticatedCombination192 => Self {
                encrypted: true,
                authenticated: false,
                secure_connections: false,
            },
            LinkKeyType::AuthenticatedCombination192 => Self {
                encrypted: true,
                authenticated: true,
                secure_connections: false,
            },
            LinkKeyType::UnauthenticatedCombination256 => Self {
                encrypted: true,
                authenticated: false,
                secure_connections: true,
            },
            LinkKeyType::AuthenticatedCombination256 => Self {
                encrypted: true,
                authenticated: true,
                secure_connections: true,
            },
        }
    }

    /// Get the security level provided by these properties
    pub fn level(&self) -> SecurityLevel {
        if !self.encrypted {
            SecurityLevel::None
        } else if self.authenticated && self.secure_connections {
            SecurityLevel::SecureConnections
        } else if self.authenticated {
            SecurityLevel::EncryptionWithAuthentication
        } else {
            SecurityLevel::EncryptionOnly
        }
    }

    /// Whether the key is MITM-authenticated
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the key was generated with Secure Connections
    pub fn secure_connections(&self) -> bool {
        self.secure_connections
    }
}
