//! HCI protocol constants
//!
//! This module contains the BR/EDR HCI constants used by the pairing engine.

// HCI event codes delivered during pairing
pub const EVT_AUTHENTICATION_COMPLETE: u8 = 0x06;
pub const EVT_ENCRYPTION_CHANGE: u8 = 0x08;
pub const EVT_LINK_KEY_NOTIFICATION: u8 = 0x18;
pub const EVT_IO_CAPABILITY_REQUEST: u8 = 0x31;
pub const EVT_IO_CAPABILITY_RESPONSE: u8 = 0x32;
pub const EVT_USER_CONFIRMATION_REQUEST: u8 = 0x33;
pub const EVT_USER_PASSKEY_REQUEST: u8 = 0x34;
pub const EVT_SIMPLE_PAIRING_COMPLETE: u8 = 0x36;
pub const EVT_USER_PASSKEY_NOTIFICATION: u8 = 0x3B;

// HCI status codes
pub const STATUS_SUCCESS: u8 = 0x00;
pub const STATUS_AUTHENTICATION_FAILURE: u8 = 0x05;
pub const STATUS_PIN_OR_KEY_MISSING: u8 = 0x06;
pub const STATUS_PAIRING_NOT_ALLOWED: u8 = 0x18;
pub const STATUS_INSUFFICIENT_SECURITY: u8 = 0x2F;

// IO capability values (BR/EDR wire encoding)
pub const IO_CAPABILITY_DISPLAY_ONLY: u8 = 0x00;
pub const IO_CAPABILITY_DISPLAY_YES_NO: u8 = 0x01;
pub const IO_CAPABILITY_KEYBOARD_ONLY: u8 = 0x02;
pub const IO_CAPABILITY_NO_INPUT_NO_OUTPUT: u8 = 0x03;

// Authentication requirement values for IO Capability replies
pub const AUTH_REQ_NO_BONDING: u8 = 0x00;
pub const AUTH_REQ_MITM_NO_BONDING: u8 = 0x01;
pub const AUTH_REQ_DEDICATED_BONDING: u8 = 0x02;
pub const AUTH_REQ_MITM_DEDICATED_BONDING: u8 = 0x03;
pub const AUTH_REQ_GENERAL_BONDING: u8 = 0x04;
pub const AUTH_REQ_MITM_GENERAL_BONDING: u8 = 0x05;

// Link key types reported by Link Key Notification
pub const LINK_KEY_COMBINATION: u8 = 0x00;
pub const LINK_KEY_LOCAL_UNIT: u8 = 0x01;
pub const LINK_KEY_REMOTE_UNIT: u8 = 0x02;
pub const LINK_KEY_DEBUG_COMBINATION: u8 = 0x03;
pub const LINK_KEY_UNAUTHENTICATED_P192: u8 = 0x04;
pub const LINK_KEY_AUTHENTICATED_P192: u8 = 0x05;
pub const LINK_KEY_CHANGED_COMBINATION: u8 = 0x06;
pub const LINK_KEY_UNAUTHENTICATED_P256: u8 = 0x07;
pub const LINK_KEY_AUTHENTICATED_P256: u8 = 0x08;

// Size of a BR/EDR link key in bytes
pub const LINK_KEY_SIZE: usize = 16;
