//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{ContactNumber, SessionId, WhatsAppId};
use proptest::prelude::*;

// ============================================================================
// ContactNumber Property Tests
// ============================================================================

mod contact_number_tests {
    use super::*;

    proptest! {
        #[test]
        fn digit_strings_are_accepted(digits in "[0-9]{1,20}") {
            let number = ContactNumber::new(&digits).unwrap();
            prop_assert_eq!(number.digits(), digits.as_str());
        }

        #[test]
        fn formatting_is_stripped(
            cc in "[0-9]{1,3}",
            area in "[0-9]{2,4}",
            rest in "[0-9]{4,8}"
        ) {
            let formatted = format!("+{cc} ({area}) {rest}");
            let number = ContactNumber::new(&formatted).unwrap();
            prop_assert_eq!(number.digits(), format!("{cc}{area}{rest}"));
        }

        #[test]
        fn address_user_is_the_digits(digits in "[0-9]{1,15}") {
            let number = ContactNumber::new(&digits).unwrap();
            let address = number.to_address();
            prop_assert_eq!(address.user(), number.digits());
            prop_assert!(address.as_str().ends_with("@c.us"));
        }

        #[test]
        fn letters_are_rejected(
            head in "[0-9]{1,5}",
            letters in "[a-zA-Z]{1,3}",
            tail in "[0-9]{1,5}"
        ) {
            let raw = format!("{head}{letters}{tail}");
            prop_assert!(ContactNumber::new(&raw).is_err());
        }
    }
}

// ============================================================================
// WhatsAppId Property Tests
// ============================================================================

mod whatsapp_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn jid_user_part_is_preserved(user in "[0-9A-Za-z]{1,20}", server in "(c\\.us|s\\.whatsapp\\.net)") {
            let id = WhatsAppId::from_jid(&format!("{user}@{server}")).unwrap();
            prop_assert_eq!(id.as_str(), user.as_str());
        }
    }
}

// ============================================================================
// SessionId Property Tests
// ============================================================================

mod session_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn display_parses_back(raw in any::<i64>()) {
            let id = SessionId::new(raw);
            let parsed: SessionId = id.to_string().parse().unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}
