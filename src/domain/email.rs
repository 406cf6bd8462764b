//! Email normalization shared by accounts, user records and ticket ownership.

/// Trim surrounding whitespace and lowercase.
///
/// Every email is normalized before it is stored or compared, so
/// `" Alice@Corp.COM "` and `"alice@corp.com"` are the same identity.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal shape check: exactly one `@`, both sides non-empty, no inner whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  Alice@Corp.COM \n"), "alice@corp.com");
        assert_eq!(normalize_email("bob@corp.com"), "bob@corp.com");
    }

    #[test]
    fn plausibility() {
        assert!(is_plausible_email("a@b.c"));
        assert!(is_plausible_email(" a@b "));
        assert!(!is_plausible_email("no-at-sign"));
        assert!(!is_plausible_email("@corp.com"));
        assert!(!is_plausible_email("a@"));
        assert!(!is_plausible_email("a@b@c"));
        assert!(!is_plausible_email("a b@c.d"));
    }
}
