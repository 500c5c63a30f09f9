//! Conversion helpers between security manager and HCI representations

use super::types::IoCapability;
use crate::hci;

/// Map a delegate-reported IO capability onto the BR/EDR wire encoding
///
/// BR/EDR has no KeyboardDisplay value; a device with both a keyboard and a
/// display negotiates as DisplayYesNo.
pub fn io_capability_for_hci(capability: IoCapability) -> hci::IoCapability {
    match capability {
        IoCapability::DisplayOnly => hci::IoCapability::DisplayOnly,
        IoCapability::DisplayYesNo => hci::IoCapability::DisplayYesNo,
        IoCapability::KeyboardOnly => hci::IoCapability::KeyboardOnly,
        IoCapability::NoInputNoOutput => hci::IoCapability::NoInputNoOutput,
        IoCapability::KeyboardDisplay => hci::IoCapability::DisplayYesNo,
    }
}
