use once_cell::sync::Lazy;
use regex::Regex;

/// The fixed symbol set the password policy accepts.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?#&";

pub const REQ_NAME_LENGTH: &str = "at least 3 characters";
pub const REQ_NAME_CHARS: &str = "only letters, spaces, hyphens and apostrophes";
pub const REQ_NAME_EDGE_SPACES: &str = "no spaces at start or end";
pub const REQ_NAME_DOUBLE_SPACES: &str = "no double spaces";

pub const REQ_EMAIL_SINGLE_AT: &str = "exactly one @ symbol";
pub const REQ_EMAIL_LOCAL: &str = "letters and digits before the @, with single . _ - separators";
pub const REQ_EMAIL_DOMAIN: &str = "a valid domain such as example.com";

pub const REQ_PASSWORD_LENGTH: &str = "at least 8 characters";
pub const REQ_PASSWORD_UPPERCASE: &str = "at least one uppercase letter";
pub const REQ_PASSWORD_LOWERCASE: &str = "at least one lowercase letter";
pub const REQ_PASSWORD_DIGIT: &str = "at least one number";
pub const REQ_PASSWORD_SYMBOL: &str = "at least one special character (@$!%*?#&)";

pub const REQ_PASSWORDS_MATCH: &str = "passwords must match";
pub const REQ_PHONE_DIGITS: &str = "10 to 15 digits";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ '-][A-Za-z]+)*$").unwrap());
static EMAIL_LOCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:[._-][A-Za-z0-9]+)*$").unwrap());
static EMAIL_DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*(?:\.[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*)*\.[A-Za-z]{2,}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10,15}$").unwrap());

/// Result of checking one field: a validity flag plus the labels of every
/// unmet requirement, in policy order, for progressive disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    unmet: Vec<&'static str>,
}

impl Verdict {
    pub fn ok() -> Self {
        Self::default()
    }

    fn require(&mut self, met: bool, label: &'static str) {
        if !met {
            self.unmet.push(label);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.unmet.is_empty()
    }

    pub fn unmet(&self) -> &[&'static str] {
        &self.unmet
    }

    pub fn unmet_labels(&self) -> Vec<String> {
        self.unmet.iter().map(|s| s.to_string()).collect()
    }
}

/// Full name: at least 3 characters of letters, single spaces, hyphens or
/// apostrophes, with no leading, trailing or doubled spaces.
pub fn validate_full_name(raw: &str) -> Verdict {
    let trimmed = raw.trim();
    let mut verdict = Verdict::ok();
    verdict.require(trimmed.chars().count() >= 3, REQ_NAME_LENGTH);
    verdict.require(NAME_RE.is_match(trimmed), REQ_NAME_CHARS);
    verdict.require(
        !(raw.starts_with(' ') || raw.ends_with(' ')),
        REQ_NAME_EDGE_SPACES,
    );
    verdict.require(!raw.contains("  "), REQ_NAME_DOUBLE_SPACES);
    verdict
}

/// Email: `local@domain.tld`, alphanumeric local part with single `.`/`_`/`-`
/// separators and a domain whose final label is at least two letters.
pub fn validate_email(raw: &str) -> Verdict {
    let trimmed = raw.trim();
    let mut verdict = Verdict::ok();

    let parts: Vec<&str> = trimmed.split('@').collect();
    if parts.len() != 2 {
        verdict.require(false, REQ_EMAIL_SINGLE_AT);
        return verdict;
    }

    verdict.require(EMAIL_LOCAL_RE.is_match(parts[0]), REQ_EMAIL_LOCAL);
    verdict.require(EMAIL_DOMAIN_RE.is_match(parts[1]), REQ_EMAIL_DOMAIN);
    verdict
}

/// Password strength: every unmet rule is named so the caller can render the
/// full checklist, not just the first failure.
pub fn validate_password(raw: &str) -> Verdict {
    let mut verdict = Verdict::ok();
    verdict.require(raw.chars().count() >= 8, REQ_PASSWORD_LENGTH);
    verdict.require(raw.chars().any(|c| c.is_ascii_uppercase()), REQ_PASSWORD_UPPERCASE);
    verdict.require(raw.chars().any(|c| c.is_ascii_lowercase()), REQ_PASSWORD_LOWERCASE);
    verdict.require(raw.chars().any(|c| c.is_ascii_digit()), REQ_PASSWORD_DIGIT);
    verdict.require(
        raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        REQ_PASSWORD_SYMBOL,
    );
    verdict
}

/// Confirm-password equality. Only evaluated once both fields are non-empty,
/// so a half-filled form does not flash a mismatch.
pub fn validate_confirm_password(confirm: &str, password: &str) -> Verdict {
    let mut verdict = Verdict::ok();
    if !confirm.is_empty() && !password.is_empty() {
        verdict.require(confirm == password, REQ_PASSWORDS_MATCH);
    }
    verdict
}

/// Phone number: optional, but 10 to 15 digits when present.
pub fn validate_phone(raw: &str) -> Verdict {
    let trimmed = raw.trim();
    let mut verdict = Verdict::ok();
    if !trimmed.is_empty() {
        verdict.require(PHONE_RE.is_match(trimmed), REQ_PHONE_DIGITS);
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ada Lovelace")]
    #[case("Jean-Luc Picard")]
    #[case("O'Brien")]
    #[case("Bo Li")]
    fn accepts_well_formed_names(#[case] name: &str) {
        assert!(validate_full_name(name).is_valid(), "{name} should pass");
    }

    #[rstest]
    #[case("Al", REQ_NAME_LENGTH)]
    #[case("Ada99", REQ_NAME_CHARS)]
    #[case(" Ada Lovelace", REQ_NAME_EDGE_SPACES)]
    #[case("Ada  Lovelace", REQ_NAME_DOUBLE_SPACES)]
    fn rejects_malformed_names(#[case] name: &str, #[case] expected: &str) {
        let verdict = validate_full_name(name);
        assert!(!verdict.is_valid());
        assert!(verdict.unmet().contains(&expected), "{:?}", verdict.unmet());
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("ada.lovelace@example.com")]
    #[case("ada_l-99@mail.example.co")]
    fn accepts_well_formed_emails(#[case] email: &str) {
        assert!(validate_email(email).is_valid(), "{email} should pass");
    }

    #[rstest]
    #[case("ada.example.com", REQ_EMAIL_SINGLE_AT)]
    #[case("ada@@example.com", REQ_EMAIL_SINGLE_AT)]
    #[case(".ada@example.com", REQ_EMAIL_LOCAL)]
    #[case("ada..l@example.com", REQ_EMAIL_LOCAL)]
    #[case("ada-@example.com", REQ_EMAIL_LOCAL)]
    #[case("ada@example", REQ_EMAIL_DOMAIN)]
    #[case("ada@-example.com", REQ_EMAIL_DOMAIN)]
    #[case("ada@example.c", REQ_EMAIL_DOMAIN)]
    fn rejects_malformed_emails(#[case] email: &str, #[case] expected: &str) {
        let verdict = validate_email(email);
        assert!(!verdict.is_valid());
        assert!(verdict.unmet().contains(&expected), "{:?}", verdict.unmet());
    }

    #[test]
    fn strong_password_passes_all_rules() {
        assert!(validate_password("Str0ng!Pass").is_valid());
    }

    #[test]
    fn weak_password_names_every_unmet_rule() {
        let verdict = validate_password("abc");
        assert_eq!(
            verdict.unmet(),
            &[
                REQ_PASSWORD_LENGTH,
                REQ_PASSWORD_UPPERCASE,
                REQ_PASSWORD_DIGIT,
                REQ_PASSWORD_SYMBOL,
            ]
        );
    }

    #[rstest]
    #[case("str0ng!pass", &[REQ_PASSWORD_UPPERCASE])]
    #[case("STR0NG!PASS", &[REQ_PASSWORD_LOWERCASE])]
    #[case("Strong!Pass", &[REQ_PASSWORD_DIGIT])]
    #[case("Str0ngPass", &[REQ_PASSWORD_SYMBOL])]
    #[case("S0m!e", &[REQ_PASSWORD_LENGTH])]
    fn password_single_failures(#[case] password: &str, #[case] expected: &[&str]) {
        assert_eq!(validate_password(password).unmet(), expected);
    }

    #[test]
    fn confirm_password_only_checked_when_both_present() {
        assert!(validate_confirm_password("", "Str0ng!Pass").is_valid());
        assert!(validate_confirm_password("Str0ng!Pass", "").is_valid());
        assert!(!validate_confirm_password("Str0ng!Pass", "Other1!aa").is_valid());
        assert!(validate_confirm_password("Str0ng!Pass", "Str0ng!Pass").is_valid());
    }

    #[rstest]
    #[case("", true)]
    #[case("0123456789", true)]
    #[case("012345678901234", true)]
    #[case("012345678", false)]
    #[case("0123456789012345", false)]
    #[case("01234abc89", false)]
    #[case("+4401234567", false)]
    fn phone_is_optional_but_strict(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(validate_phone(phone).is_valid(), valid, "{phone}");
    }
}
