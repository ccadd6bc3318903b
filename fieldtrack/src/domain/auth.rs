//! Authentication primitives: login credentials and the seeded credential
//! directory.
//!
//! Keep raw payload parsing outside the store by exposing constructors that
//! validate string inputs before an operation consumes them. Passwords stay
//! wrapped in [`Zeroizing`] for their whole in-memory life.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty; matching against the directory is
///   case-insensitive.
/// - `password` is non-empty and compared exactly, retaining caller-provided
///   whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for directory lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// One seeded email/password pair.
#[derive(Debug, Clone)]
pub struct Credential {
    email: String,
    password: Zeroizing<String>,
}

impl Credential {
    /// Build a directory entry from fixed seed values.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// The mock credential directory the login operation checks against.
///
/// There is no hashing and no credential mutation; the set is fixed at seed
/// time, which is exactly the contract of the mocked sign-in flow.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet(Vec<Credential>);

impl CredentialSet {
    /// Build a directory from seeded entries.
    pub fn new(entries: Vec<Credential>) -> Self {
        Self(entries)
    }

    /// True when some entry matches the email case-insensitively and the
    /// password exactly.
    pub fn verify(&self, credentials: &LoginCredentials) -> bool {
        self.0.iter().any(|entry| {
            entry.email.eq_ignore_ascii_case(credentials.email())
                && entry.password.as_str() == credentials.password()
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn fixture_directory() -> CredentialSet {
        CredentialSet::new(vec![
            Credential::new("wh135@whies.com", "sembarangsaja"),
            Credential::new("hendra@whies.com", "whies2025"),
        ])
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("hendra@whies.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, password).expect_err("invalid inputs fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("hendra@whies.com", "whies2025", true)]
    #[case("HENDRA@WHIES.COM", "whies2025", true)]
    #[case("hendra@whies.com", "WHIES2025", false)]
    #[case("hendra@whies.com", "wrong", false)]
    #[case("nobody@whies.com", "whies2025", false)]
    fn verify_is_case_insensitive_on_email_only(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        assert_eq!(fixture_directory().verify(&creds), expected);
    }

    #[test]
    fn email_is_trimmed_before_matching() {
        let creds = LoginCredentials::try_from_parts("  wh135@whies.com  ", "sembarangsaja")
            .expect("credentials shape");
        assert!(fixture_directory().verify(&creds));
    }
}
