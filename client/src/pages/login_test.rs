use super::*;

// =============================================================================
// validate_sign_in_input
// =============================================================================

#[test]
fn validate_trims_email_and_keeps_secret() {
    assert_eq!(
        validate_sign_in_input("  hr@hrportal.com ", " hr123"),
        Ok(("hr@hrportal.com".to_owned(), " hr123".to_owned()))
    );
}

#[test]
fn validate_rejects_blank_fields() {
    assert_eq!(validate_sign_in_input("   ", "x"), Err("Enter your email and password."));
    assert_eq!(validate_sign_in_input("a@b.c", ""), Err("Enter your email and password."));
}

#[test]
fn validate_rejects_address_without_at_sign() {
    assert_eq!(validate_sign_in_input("hrportal.com", "x"), Err("Enter a valid email address."));
}

// =============================================================================
// sign_in_error_message
// =============================================================================

#[test]
fn invalid_credentials_message_is_exact() {
    assert_eq!(sign_in_error_message(&AuthError::InvalidCredentials), "Invalid credentials");
}

#[test]
fn service_failure_message_includes_cause() {
    assert_eq!(
        sign_in_error_message(&AuthError::Service("sign-in failed: 503".to_owned())),
        "Sign-in failed: sign-in failed: 503"
    );
}
