//! Reusable field rules. Each returns `Some(message)` on failure.
//!
//! Every rule except `required` accepts the empty string: an optional field
//! left blank is valid, and a required one is caught by `required` first.

use url::Url;

pub const REQUIRED: &str = "required";
pub const MAX_TEXT_LEN: usize = 3000;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

pub fn required(value: &str) -> Option<String> {
    value.trim().is_empty().then(|| REQUIRED.to_string())
}

pub fn max_length(value: &str, max: usize) -> Option<String> {
    (value.chars().count() > max).then(|| format!("must be at most {max} characters"))
}

pub fn digits_only(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some("must contain digits only".to_string())
    }
}

/// Absolute http(s) URL with a host.
pub fn url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match parse_web_url(value) {
        Some(_) => None,
        None => Some("must be a valid URL".to_string()),
    }
}

/// http(s) URL whose host is `domain` or one of its subdomains.
pub fn url_on_host(value: &str, domain: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let Some(parsed) = parse_web_url(value) else {
        return Some("must be a valid URL".to_string());
    };
    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    if host == domain || host.ends_with(&format!(".{domain}")) {
        None
    } else {
        Some(format!("must be a {domain} link"))
    }
}

pub fn email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some(REQUIRED.to_string());
    }
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    (!valid).then(|| "must be a valid email".to_string())
}

/// Optional leading `+`, then digits with spaces, dashes, or parentheses.
pub fn phone(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let body = value.strip_prefix('+').unwrap_or(value);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if allowed && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        None
    } else {
        Some("must be a valid phone number".to_string())
    }
}

fn parse_web_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value).ok()?;
    let web = matches!(parsed.scheme(), "http" | "https");
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    (web && has_host).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert_eq!(required("").as_deref(), Some("required"));
        assert_eq!(required("   ").as_deref(), Some("required"));
        assert_eq!(required("Rust developer"), None);
    }

    #[test]
    fn test_max_length_counts_chars() {
        assert_eq!(max_length("ääää", 4), None);
        assert!(max_length("ääääa", 4).is_some());
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only(""), None);
        assert_eq!(digits_only("3500"), None);
        assert!(digits_only("3500$").is_some());
        assert!(digits_only("abc").is_some());
    }

    #[test]
    fn test_url_requires_web_scheme_and_host() {
        assert_eq!(url(""), None);
        assert_eq!(url("https://acme.io/about"), None);
        assert!(url("acme.io").is_some());
        assert!(url("ftp://acme.io").is_some());
        assert!(url("mailto:hr@acme.io").is_some());
    }

    #[test]
    fn test_url_on_host_accepts_subdomains() {
        assert_eq!(
            url_on_host("https://www.linkedin.com/in/jane", "linkedin.com"),
            None
        );
        assert_eq!(
            url_on_host("https://jobs.dou.ua/companies/acme/", "dou.ua"),
            None
        );
        assert_eq!(
            url_on_host("https://notlinkedin.com/x", "linkedin.com").as_deref(),
            Some("must be a linkedin.com link")
        );
        assert_eq!(
            url_on_host("linkedin", "linkedin.com").as_deref(),
            Some("must be a valid URL")
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(email("hr@acme.io"), None);
        assert_eq!(email("").as_deref(), Some("required"));
        assert!(email("hr@acme").is_some());
        assert!(email("@acme.io").is_some());
        assert!(email("hr@@acme.io").is_some());
        assert!(email("h r@acme.io").is_some());
    }

    #[test]
    fn test_phone() {
        assert_eq!(phone(""), None);
        assert_eq!(phone("+380 (67) 123-45-67"), None);
        assert!(phone("+3780").is_some());
        assert!(phone("call me").is_some());
        assert!(phone("+1234567890123456").is_some());
    }
}
