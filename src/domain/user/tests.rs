//! Tests for the user field types and public view.

use super::*;
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(42)]
#[case(u64::MAX)]
fn user_id_accepts_positive_integers(#[case] value: u64) {
    let id = UserId::new(value).expect("valid id");
    assert_eq!(id.value(), value);
}

#[rstest]
fn user_id_rejects_zero() {
    assert_eq!(UserId::new(0), Err(UserValidationError::InvalidId));
}

#[rstest]
#[case("1", Ok(1))]
#[case("12", Ok(12))]
#[case("0", Err(UserValidationError::InvalidId))]
#[case("-3", Err(UserValidationError::InvalidId))]
#[case("abc", Err(UserValidationError::InvalidId))]
#[case("12abc", Err(UserValidationError::InvalidId))]
#[case("1.5", Err(UserValidationError::InvalidId))]
#[case("", Err(UserValidationError::InvalidId))]
fn user_id_parses_whole_segments_only(
    #[case] raw: &str,
    #[case] expected: Result<u64, UserValidationError>,
) {
    let result = raw.parse::<UserId>().map(UserId::value);
    assert_eq!(result, expected);
}

#[rstest]
fn username_accepts_boundary_lengths() {
    for length in [USERNAME_MIN, USERNAME_MAX] {
        let raw = "a".repeat(length);
        let username = Username::new(&raw).expect("valid boundary length");
        assert_eq!(username.as_str(), raw);
    }
}

#[rstest]
#[case("ab")]
#[case("")]
fn username_rejects_too_short(#[case] raw: &str) {
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::InvalidUsername)
    );
}

#[rstest]
fn username_rejects_too_long() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::InvalidUsername)
    );
}

#[rstest]
fn username_trims_surrounding_whitespace() {
    let username = Username::new("  ada  ").expect("trimmed to valid length");
    assert_eq!(username.as_str(), "ada");
}

#[rstest]
fn username_rejects_whitespace_padding_around_short_handle() {
    // "  a  " trims to a single character.
    assert_eq!(
        Username::new("  a  "),
        Err(UserValidationError::InvalidUsername)
    );
}

#[rstest]
#[case("a@b.co")]
#[case("a.b@c.de")]
#[case("first.last+tag@ex-ample.co.uk")]
#[case("user_name%99@host.org")]
fn email_accepts_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid address");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("a@b")]
#[case("not-an-email")]
// One-letter TLDs fail the two-or-more-letters rule.
#[case("a@b.c")]
#[case("a.b@c.d")]
#[case("@b.co")]
#[case("a@.co")]
#[case(" a@b.co")]
#[case("a@b.co ")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::InvalidEmail)
    );
}

#[rstest]
#[case("abc123")]
#[case("a1")]
fn password_accepts_mixed_letters_and_digits(#[case] raw: &str) {
    assert!(Password::new(raw).is_ok());
}

#[rstest]
fn password_accepts_maximum_length() {
    let raw = format!("{}1", "a".repeat(PASSWORD_MAX - 1));
    assert!(Password::new(raw).is_ok());
}

#[rstest]
#[case("abcdef")]
#[case("123456")]
#[case("ab#123")]
#[case("a")]
#[case("")]
#[case("ab 123")]
fn password_rejects_rule_breakers(#[case] raw: &str) {
    assert_eq!(Password::new(raw), Err(UserValidationError::WeakPassword));
}

#[rstest]
fn password_rejects_over_maximum_length() {
    let raw = format!("{}1", "a".repeat(PASSWORD_MAX));
    assert_eq!(Password::new(raw), Err(UserValidationError::WeakPassword));
}

#[rstest]
fn password_debug_is_redacted() {
    let password = Password::new("abc123").expect("valid password");
    assert_eq!(format!("{password:?}"), "Password(<redacted>)");
}

fn sample_record() -> UserRecord {
    UserRecord::new(
        UserId::new(1).expect("valid id"),
        Username::new("ada").expect("valid username"),
        EmailAddress::new("ada@example.com").expect("valid email"),
        Password::new("abc123").expect("valid password"),
    )
}

#[rstest]
fn public_view_never_carries_a_password() {
    let view = PublicUser::from(&sample_record());
    let value = serde_json::to_value(view).expect("serialise view");
    assert!(value.get("password").is_none());
    assert_eq!(value.get("id").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(value.get("username").and_then(|v| v.as_str()), Some("ada"));
    assert_eq!(
        value.get("email").and_then(|v| v.as_str()),
        Some("ada@example.com")
    );
}

#[rstest]
fn apply_merges_only_supplied_fields() {
    let mut record = sample_record();
    record.apply(ProfileChanges {
        email: Some(EmailAddress::new("countess@example.com").expect("valid email")),
        ..ProfileChanges::default()
    });
    assert_eq!(record.username().as_str(), "ada");
    assert_eq!(record.email().as_str(), "countess@example.com");
    assert_eq!(record.password(), &Password::new("abc123").expect("valid"));
}

#[rstest]
fn username_validates_on_deserialize() {
    let result: Result<Username, _> = serde_json::from_value(serde_json::json!("ab"));
    assert!(result.is_err());
}
