// src/utils/security.rs

//! Input validators and the script-block stripper.
//!
//! Every function here is total: malformed input yields `false` or a
//! transformed string, never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of an email address (RFC 5321 path limit).
pub const EMAIL_MAX_LEN: usize = 254;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;

/// Length of one base-36 token segment (`u64::MAX` needs 13 digits).
const TOKEN_SEGMENT_LEN: usize = 13;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-()]").unwrap());

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\u{C0}-\u{FF}\s]+$").unwrap());

/// Strips `<script>...</script>` blocks and trims surrounding whitespace.
///
/// Removal is repeated until nothing matches, so fragments such as
/// `<scr<script></script>ipt>` cannot reassemble into a new block.
/// This is NOT general HTML sanitization; use [`crate::utils::html`] for markup.
pub fn sanitize_input(text: &str) -> String {
    let mut current = text.to_owned();
    while SCRIPT_BLOCK.is_match(&current) {
        current = SCRIPT_BLOCK.replace_all(&current, "").into_owned();
    }
    current.trim().to_owned()
}

pub fn validate_email(text: &str) -> bool {
    text.chars().count() <= EMAIL_MAX_LEN && EMAIL.is_match(text)
}

/// Accepts international-style numbers: optional `+`, nonzero leading digit,
/// 1 to 16 digits in total. Whitespace, hyphens and parentheses are ignored.
pub fn validate_phone(text: &str) -> bool {
    let digits = PHONE_NOISE.replace_all(text, "");
    PHONE.is_match(&digits)
}

/// Latin letters (including U+00C0..=U+00FF) and whitespace, 2 to 100 chars.
pub fn validate_name(text: &str) -> bool {
    let len = text.chars().count();
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) && NAME.is_match(text)
}

/// Generates an opaque 26-character base-36 token.
///
/// **Not a security credential.** The token is meant for low-stakes
/// correlation (e.g. matching a confirmation link to a pending form).
/// Anything that needs unpredictability guarantees should draw from a
/// dedicated CSPRNG instead.
pub fn generate_verification_token() -> String {
    let mut token = String::with_capacity(TOKEN_SEGMENT_LEN * 2);
    token.push_str(&random_segment());
    token.push_str(&random_segment());
    token
}

fn random_segment() -> String {
    // XOR folds the fixed version/variant bits of the v4 layout away.
    let (hi, lo) = Uuid::new_v4().as_u64_pair();
    to_base36(hi ^ lo, TOKEN_SEGMENT_LEN)
}

fn to_base36(mut value: u64, width: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut buf = vec![b'0'; width];
    let mut pos = width;
    while value > 0 && pos > 0 {
        pos -= 1;
        buf[pos] = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    buf.into_iter().map(char::from).collect()
}

/// A named format policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Email,
    Phone,
    Name,
}

impl ValidationKind {
    pub fn check(self, text: &str) -> bool {
        match self {
            ValidationKind::Email => validate_email(text),
            ValidationKind::Phone => validate_phone(text),
            ValidationKind::Name => validate_name(text),
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "email" => Some(ValidationKind::Email),
            "phone" => Some(ValidationKind::Phone),
            "name" => Some(ValidationKind::Name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_block() {
        assert_eq!(sanitize_input("<script>alert(1)</script>hello"), "hello");
        assert_eq!(
            sanitize_input("  a<SCRIPT type=\"x\">\n<b>1</b>\n</Script >b  "),
            "ab"
        );
    }

    #[test]
    fn script_removal_is_non_greedy() {
        assert_eq!(
            sanitize_input("<script>1</script>keep<script>2</script>"),
            "keep"
        );
    }

    #[test]
    fn sanitize_input_is_idempotent() {
        let samples = [
            "",
            "   ",
            "plain text",
            "  <script>x</script>  hello  ",
            "<scr<script></script>ipt>alert(1)</script>tail",
            "<p>not a script</p>",
            "<script>unterminated",
            "<scripting>kept</scripting>",
        ];
        for s in samples {
            let once = sanitize_input(s);
            assert_eq!(sanitize_input(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn nested_fragments_do_not_reassemble() {
        let out = sanitize_input("<scr<script></script>ipt>alert(1)</script>tail");
        assert!(!out.to_lowercase().contains("<script"));
        assert_eq!(out, "tail");
    }

    #[test]
    fn leaves_other_markup_alone() {
        assert_eq!(sanitize_input("<b>bold</b>"), "<b>bold</b>");
        assert_eq!(sanitize_input("<scripting>x</scripting>"), "<scripting>x</scripting>");
    }

    #[test]
    fn email_verdicts() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last+tag@sub.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a b@c.de"));
        assert!(!validate_email("a@@b.co"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email(""));
    }

    #[test]
    fn email_length_bound() {
        let long = format!("a@b.com{}", "x".repeat(250));
        assert!(!validate_email(&long));

        let local = "a".repeat(EMAIL_MAX_LEN - "@b.co".len());
        let exact = format!("{local}@b.co");
        assert_eq!(exact.len(), EMAIL_MAX_LEN);
        assert!(validate_email(&exact));
    }

    #[test]
    fn phone_verdicts() {
        assert!(validate_phone("+1 (555) 123-4567"));
        assert!(validate_phone("4915112345678"));
        assert!(validate_phone("7"));
        assert!(!validate_phone("abc123"));
        assert!(!validate_phone("0123456"));
        assert!(!validate_phone("+"));
        assert!(!validate_phone(""));
        assert!(!validate_phone("12.34"));
    }

    #[test]
    fn phone_digit_bounds() {
        assert!(validate_phone(&format!("1{}", "0".repeat(15))));
        assert!(!validate_phone(&format!("1{}", "0".repeat(16))));
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        assert!(!validate_phone("١٢٣٤"));
    }

    #[test]
    fn name_verdicts() {
        assert!(validate_name("Jürgen Müller"));
        assert!(validate_name("Zoë"));
        assert!(validate_name("Al"));
        assert!(!validate_name("John123"));
        assert!(!validate_name("A"));
        assert!(!validate_name(""));
        assert!(!validate_name("O'Brien"));
        assert!(!validate_name("Łukasz"));
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name(&"é".repeat(NAME_MAX_LEN)));
        assert!(!validate_name(&"a".repeat(NAME_MAX_LEN + 1)));
    }

    #[test]
    fn token_shape() {
        let token = generate_verification_token();
        assert_eq!(token.len(), TOKEN_SEGMENT_LEN * 2);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(token, generate_verification_token());
    }

    #[test]
    fn base36_padding() {
        assert_eq!(to_base36(0, 4), "0000");
        assert_eq!(to_base36(35, 3), "00z");
        assert_eq!(to_base36(u64::MAX, TOKEN_SEGMENT_LEN), "3w5e11264sgsf");
    }

    #[test]
    fn kind_dispatch() {
        assert_eq!(ValidationKind::parse("phone"), Some(ValidationKind::Phone));
        assert_eq!(ValidationKind::parse("zip"), None);
        assert!(ValidationKind::Email.check("a@b.co"));
        assert!(!ValidationKind::Name.check("R2D2"));
    }
}
