//! Tests for the security manager types

#[cfg(test)]
mod tests {
    use super::super::types::*;
    use super::super::util::*;
    use crate::hci;
    use crate::hci::LinkKeyType;

    #[test]
    fn test_legacy_key_types_carry_no_security() {
        for key_type in [
            LinkKeyType::Combination,
            LinkKeyType::LocalUnit,
            LinkKeyType::RemoteUnit,
            LinkKeyType::DebugCombination,
            LinkKeyType::ChangedCombination,
        ] {
            let props = SecurityProperties::from_link_key_type(key_type);
            assert_eq!(props.level(), SecurityLevel::None);
            assert!(!props.authenticated());
        }
    }

    #[test]
    fn test_ssp_key_type_security_levels() {
        let props =
            SecurityProperties::from_link_key_type(LinkKeyType::UnauthenticatedCombination192);
        assert_eq!(props.level(), SecurityLevel::EncryptionOnly);
        assert!(!props.authenticated());
        assert!(!props.secure_connections());

        let props =
            SecurityProperties::from_link_key_type(LinkKeyType::AuthenticatedCombination192);
        assert_eq!(props.level(), SecurityLevel::EncryptionWithAuthentication);
        assert!(props.authenticated());
        assert!(!props.secure_connections());

        // An unauthenticated Secure Connections key is still only encrypted.
        let props =
            SecurityProperties::from_link_key_type(LinkKeyType::UnauthenticatedCombination256);
        assert_eq!(props.level(), SecurityLevel::EncryptionOnly);
        assert!(!props.authenticated());
        assert!(props.secure_connections());

        let props =
            SecurityProperties::from_link_key_type(LinkKeyType::AuthenticatedCombination256);
        assert_eq!(props.level(), SecurityLevel::SecureConnections);
        assert!(props.authenticated());
        assert!(props.secure_connections());
    }

    #[test]
    fn test_security_level_ordering() {
        assert!(!SecurityLevel::None.is_encrypted());
        assert!(SecurityLevel::EncryptionOnly.is_encrypted());
        assert!(!SecurityLevel::EncryptionOnly.is_authenticated());
        assert!(SecurityLevel::EncryptionWithAuthentication.is_authenticated());
        assert!(SecurityLevel::SecureConnections.is_authenticated());
    }

    #[test]
    fn test_io_capability_for_hci() {
        assert_eq!(
            io_capability_for_hci(IoCapability::DisplayOnly),
            hci::IoCapability::DisplayOnly
        );
        assert_eq!(
            io_capability_for_hci(IoCapability::DisplayYesNo),
            hci::IoCapability::DisplayYesNo
        );
        assert_eq!(
            io_capability_for_hci(IoCapability::KeyboardOnly),
            hci::IoCapability::KeyboardOnly
        );
        assert_eq!(
            io_capability_for_hci(IoCapability::NoInputNoOutput),
            hci::IoCapability::NoInputNoOutput
        );
        // BR/EDR collapses KeyboardDisplay onto DisplayYesNo.
        assert_eq!(
            io_capability_for_hci(IoCapability::KeyboardDisplay),
            hci::IoCapability::DisplayYesNo
        );
    }
}
