//! Property-based tests for input validation and request parsing
//!
//! Uses proptest to generate random inputs and verify properties

use assert_matches::assert_matches;
use ffcodex_auth::backend::auth::handlers::Pagination;
use ffcodex_auth::backend::middleware::bearer_token;
use ffcodex_auth::shared::validation::{
    validate_email, validate_password_strength, validate_username,
};
use ffcodex_auth::shared::SharedError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_valid_usernames_accepted(name in "[A-Za-z0-9_]{3,50}") {
        prop_assert_eq!(validate_username(&name).unwrap(), name);
    }

    #[test]
    fn test_usernames_with_other_characters_rejected(
        prefix in "[a-z]{2,10}",
        bad in "[-!@#$%^&*. ]",
        suffix in "[a-z]{2,10}",
    ) {
        let name = format!("{}{}{}", prefix, bad, suffix);
        let err = validate_username(&name).unwrap_err();
        prop_assert_eq!(err.field(), "username");
    }

    #[test]
    fn test_valid_emails_are_lowercased(
        local in "[A-Za-z0-9._]{1,20}",
        domain in "[A-Za-z0-9]{1,15}",
        tld in "[A-Za-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        let normalized = validate_email(&email).unwrap();
        prop_assert_eq!(normalized, email.to_lowercase());
    }

    #[test]
    fn test_strong_passwords_accepted(
        upper in "[A-Z]{1,10}",
        lower in "[a-z]{1,10}",
        digits in "[0-9]{1,10}",
        padding in "[a-z]{5,10}",
    ) {
        let password = format!("{}{}{}{}", upper, lower, digits, padding);
        prop_assert!(validate_password_strength(&password).is_ok());
    }

    #[test]
    fn test_passwords_without_digits_rejected(password in "[A-Z][a-z]{7,30}") {
        assert_matches!(
            validate_password_strength(&password),
            Err(SharedError::ValidationError { .. })
        );
    }

    #[test]
    fn test_page_size_always_in_bounds(skip in any::<i64>(), limit in any::<i64>()) {
        let page = Pagination { skip: Some(skip), limit: Some(limit) };
        prop_assert!((1..=100).contains(&page.page_size()));
        prop_assert!(page.offset() >= 0);
    }

    #[test]
    fn test_bearer_token_extraction(token in "[A-Za-z0-9._-]{1,200}") {
        let header = format!("Bearer {}", token);
        prop_assert_eq!(bearer_token(Some(&header)), Some(token.as_str()));
    }
}
