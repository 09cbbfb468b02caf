//! String formats
//!
//! Every format carries the pattern exported to JSON Schema. Where that
//! pattern needs look-around, which the `regex` crate does not support,
//! the matcher is a look-around-free regex plus explicit structural checks
//! that together accept the same language.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;

use crate::foundation::Format;
use crate::foundation::checks::FormatCheck;

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("built-in format pattern {pattern:?} failed to compile: {e}"),
    }
}

/// Replaces `\d` with an ASCII class; `\d` is Unicode-aware in `regex`.
fn ascii_digits(pattern: &str) -> String {
    pattern.replace(r"\d", "[0-9]")
}

// ============================================================================
// PATTERNS
// ============================================================================

const EMAIL: &str = r"^(?!\.)(?!.*\.\.)([A-Za-z0-9_'+\-\.]*)[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
static EMAIL_BODY: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([A-Za-z0-9_'+\-\.]*)[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-8][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}|00000000-0000-0000-0000-000000000000)$",
    )
});
static GUID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$")
});
static NANOID: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9_-]{21}$"));
static CUID: LazyLock<Regex> = LazyLock::new(|| compile(r"^[cC][^\s-]{8,}$"));
static CUID2: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9a-z]+$"));
static ULID: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[0-9A-HJKMNP-TV-Za-hjkmnp-tv-z]{26}$"));
static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\p{Extended_Pictographic}|\p{Emoji_Component})+$"));
static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])$",
    )
});
const IPV6: &str = r"^(([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|::|([0-9a-fA-F]{1,4})?::([0-9a-fA-F]{1,4}:?){0,6})$";
static CIDRV4: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])/([0-9]|[1-2][0-9]|3[0-2])$",
    )
});
const CIDRV6: &str = r"^(([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|::|([0-9a-fA-F]{1,4})?::([0-9a-fA-F]{1,4}:?){0,6})\/(12[0-8]|1[01][0-9]|[1-9]?[0-9])$";
static BASE64: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^$|^(?:[0-9a-zA-Z+/]{4})*(?:(?:[0-9a-zA-Z+/]{2}==)|(?:[0-9a-zA-Z+/]{3}=))?$")
});
static BASE64URL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9_-]*$"));
static E164: LazyLock<Regex> = LazyLock::new(|| compile(r"^\+(?:[0-9]){6,14}[0-9]$"));

pub(crate) static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^A-Z]*$"));
pub(crate) static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^a-z]*$"));

const DATE_SOURCE: &str = r"((\d\d[2468][048]|\d\d[13579][26]|\d\d0[48]|[02468][048]00|[13579][26]00)-02-29|\d{4}-((0[13578]|1[02])-(0[1-9]|[12]\d|3[01])|(0[469]|11)-(0[1-9]|[12]\d|30)|(02)-(0[1-9]|1\d|2[0-8])))";

const DURATION: &str = r"^P(?:(\d+W)|(?!.*W)(?=\d|T\d)(\d+Y)?(\d+M)?(\d+D)?(T(?=\d)(\d+H)?(\d+M)?(\d+([.,]\d+)?S)?)?)$";
static DURATION_BODY: LazyLock<Regex> = LazyLock::new(|| {
    compile(&ascii_digits(
        r"^P(?:(\d+W)|(\d+Y)?(\d+M)?(\d+D)?(T(\d+H)?(\d+M)?(\d+([.,]\d+)?S)?)?)$",
    ))
});

// ============================================================================
// MATCHERS
// ============================================================================

fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_BODY.is_match(s)
}

fn is_duration(s: &str) -> bool {
    if !DURATION_BODY.is_match(s) {
        return false;
    }
    // The body regex cannot express "at least one component" or "a digit
    // after T"; check both here.
    let rest = &s[1..];
    let starts_ok = rest.starts_with(|c: char| c.is_ascii_digit())
        || rest
            .strip_prefix('T')
            .is_some_and(|t| t.starts_with(|c: char| c.is_ascii_digit()));
    let time_ok = rest
        .split_once('T')
        .is_none_or(|(_, time)| time.starts_with(|c: char| c.is_ascii_digit()));
    starts_ok && time_ok
}

fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

fn is_cidrv6(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let prefix_ok = !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_digit())
        && !(prefix.len() > 1 && prefix.starts_with('0'))
        && prefix.parse::<u8>().is_ok_and(|p| p <= 128);
    is_ipv6(addr) && prefix_ok
}

fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// Header must decode to a JSON object with an `alg`; a `typ`, if
/// present, must be `JWT`.
fn is_jwt(s: &str, alg: Option<&str>) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    let [header, _, _] = parts.as_slice() else {
        return false;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(header.trim_end_matches('=')) else {
        return false;
    };
    let Ok(serde_json::Value::Object(fields)) = serde_json::from_slice(&bytes) else {
        return false;
    };
    if fields.get("typ").is_some_and(|typ| typ.as_str() != Some("JWT")) {
        return false;
    }
    match (fields.get("alg").and_then(serde_json::Value::as_str), alg) {
        (None, _) => false,
        (Some(found), Some(wanted)) => found == wanted,
        (Some(_), None) => true,
    }
}

// ============================================================================
// CHECK BUILDERS
// ============================================================================

pub(crate) fn email() -> FormatCheck {
    FormatCheck::new(Format::Email, Some(EMAIL.to_owned()), is_email)
}

pub(crate) fn uuid() -> FormatCheck {
    FormatCheck::regex(Format::Uuid, &UUID)
}

/// A UUID of one RFC 9562 version, 1 through 8.
pub(crate) fn uuid_version(version: u8) -> FormatCheck {
    let pattern = format!(
        "^([0-9a-fA-F]{{8}}-[0-9a-fA-F]{{4}}-{version}[0-9a-fA-F]{{3}}-[89abAB][0-9a-fA-F]{{3}}-[0-9a-fA-F]{{12}})$"
    );
    let regex = compile(&pattern);
    FormatCheck::new(Format::Uuid, Some(pattern), move |s| regex.is_match(s))
}

pub(crate) fn guid() -> FormatCheck {
    FormatCheck::regex(Format::Guid, &GUID)
}

pub(crate) fn nanoid() -> FormatCheck {
    FormatCheck::regex(Format::Nanoid, &NANOID)
}

pub(crate) fn cuid() -> FormatCheck {
    FormatCheck::regex(Format::Cuid, &CUID)
}

pub(crate) fn cuid2() -> FormatCheck {
    FormatCheck::regex(Format::Cuid2, &CUID2)
}

pub(crate) fn ulid() -> FormatCheck {
    FormatCheck::regex(Format::Ulid, &ULID)
}

pub(crate) fn emoji() -> FormatCheck {
    FormatCheck::regex(Format::Emoji, &EMOJI)
}

pub(crate) fn ipv4() -> FormatCheck {
    FormatCheck::new(Format::Ipv4, Some(IPV4.as_str().to_owned()), |s| {
        IPV4.is_match(s) && s.parse::<Ipv4Addr>().is_ok()
    })
}

pub(crate) fn ipv6() -> FormatCheck {
    FormatCheck::new(Format::Ipv6, Some(IPV6.to_owned()), is_ipv6)
}

pub(crate) fn cidrv4() -> FormatCheck {
    FormatCheck::regex(Format::Cidrv4, &CIDRV4)
}

pub(crate) fn cidrv6() -> FormatCheck {
    FormatCheck::new(Format::Cidrv6, Some(CIDRV6.to_owned()), is_cidrv6)
}

pub(crate) fn base64() -> FormatCheck {
    FormatCheck::regex(Format::Base64, &BASE64)
}

pub(crate) fn base64url() -> FormatCheck {
    FormatCheck::regex(Format::Base64url, &BASE64URL)
}

pub(crate) fn e164() -> FormatCheck {
    FormatCheck::regex(Format::E164, &E164)
}

pub(crate) fn url() -> FormatCheck {
    FormatCheck::new(Format::Url, None, is_url)
}

pub(crate) fn jwt(alg: Option<String>) -> FormatCheck {
    FormatCheck::new(Format::Jwt, None, move |s| is_jwt(s, alg.as_deref()))
}

pub(crate) fn duration() -> FormatCheck {
    FormatCheck::new(Format::Duration, Some(DURATION.to_owned()), is_duration)
}

// ============================================================================
// ISO DATE AND TIME
// ============================================================================

/// Options of the ISO datetime and time formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoOptions {
    /// Accept `+hh:mm` offsets besides `Z`.
    pub offset: bool,
    /// Accept datetimes without a zone designator.
    pub local: bool,
    /// Exact number of fractional second digits; `None` accepts any.
    pub precision: Option<u8>,
}

impl IsoOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn offset(mut self) -> Self {
        self.offset = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn precision(mut self, digits: u8) -> Self {
        self.precision = Some(digits);
        self
    }
}

fn time_source(options: IsoOptions) -> String {
    let base = r"([01]\d|2[0-3]):[0-5]\d:[0-5]\d";
    match options.precision {
        None => format!(r"{base}(\.\d+)?"),
        Some(0) => base.to_owned(),
        Some(n) => format!(r"{base}\.\d{{{n}}}"),
    }
}

fn regex_format(format: Format, pattern: String) -> FormatCheck {
    let regex = compile(&ascii_digits(&pattern));
    FormatCheck::new(format, Some(pattern), move |s| regex.is_match(s))
}

pub(crate) fn iso_datetime(options: IsoOptions) -> FormatCheck {
    let mut zones = vec![if options.local { "Z?" } else { "Z" }];
    if options.offset {
        zones.push(r"([+-]\d{2}:?\d{2})");
    }
    let pattern = format!(
        "^{DATE_SOURCE}T{}({})$",
        time_source(options),
        zones.join("|")
    );
    regex_format(Format::Datetime, pattern)
}

pub(crate) fn iso_date() -> FormatCheck {
    regex_format(Format::Date, format!("^{DATE_SOURCE}$"))
}

pub(crate) fn iso_time(options: IsoOptions) -> FormatCheck {
    regex_format(Format::Time, format!("^{}$", time_source(options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn accepts(check: &FormatCheck, s: &str) -> bool {
        (check.matcher)(s)
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case(".user@example.com", false)]
    #[case("a..b@example.com", false)]
    #[case("user@example", false)]
    #[case("user@.com", false)]
    fn emails(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(accepts(&email(), input), ok);
    }

    #[rstest]
    #[case("P1W", true)]
    #[case("P1Y2M3DT4H5M6S", true)]
    #[case("PT0.5S", true)]
    #[case("P", false)]
    #[case("PT", false)]
    #[case("P1DT", false)]
    #[case("P1Y1W", false)]
    fn durations(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(accepts(&duration(), input), ok);
    }

    #[rstest]
    #[case("2024-02-29T12:00:00Z", true)]
    #[case("2023-02-29T12:00:00Z", false)]
    #[case("2024-01-01T12:00:00.123Z", true)]
    #[case("2024-01-01T12:00:00", false)]
    #[case("2024-01-01T12:00:00+02:00", false)]
    fn datetimes(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(accepts(&iso_datetime(IsoOptions::new()), input), ok);
    }

    #[test]
    fn datetime_options() {
        assert!(accepts(&iso_datetime(IsoOptions::new().offset()), "2024-01-01T12:00:00+02:00"));
        assert!(accepts(&iso_datetime(IsoOptions::new().local()), "2024-01-01T12:00:00"));
        let exact = iso_datetime(IsoOptions::new().precision(3));
        assert!(accepts(&exact, "2024-01-01T12:00:00.123Z"));
        assert!(!accepts(&exact, "2024-01-01T12:00:00Z"));
    }

    #[test]
    fn exported_patterns_match_reference_sources() {
        assert_eq!(
            iso_time(IsoOptions::new()).pattern.as_deref(),
            Some(r"^([01]\d|2[0-3]):[0-5]\d:[0-5]\d(\.\d+)?$")
        );
        assert_eq!(ipv4().pattern.as_deref(), Some(IPV4.as_str()));
        assert!(url().pattern.is_none());
    }

    #[rstest]
    #[case("::1", true)]
    #[case("2001:db8::ff00:42:8329", true)]
    #[case("2001:db8::g", false)]
    fn ipv6_addresses(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(accepts(&ipv6(), input), ok);
    }

    #[test]
    fn cidrs() {
        assert!(accepts(&cidrv4(), "192.168.0.0/24"));
        assert!(!accepts(&cidrv4(), "192.168.0.0/33"));
        assert!(accepts(&cidrv6(), "2001:db8::/32"));
        assert!(!accepts(&cidrv6(), "2001:db8::/129"));
    }

    #[test]
    fn jwts() {
        // {"alg":"HS256","typ":"JWT"}
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.sig";
        assert!(accepts(&jwt(None), token));
        assert!(accepts(&jwt(Some("HS256".into())), token));
        assert!(!accepts(&jwt(Some("RS256".into())), token));
        assert!(!accepts(&jwt(None), "a.b"));
    }

    #[test]
    fn misc_formats() {
        assert!(accepts(&uuid(), "123e4567-e89b-12d3-a456-426614174000"));
        assert!(!accepts(&uuid_version(4), "123e4567-e89b-12d3-a456-426614174000"));
        assert!(accepts(&base64(), "aGVsbG8="));
        assert!(!accepts(&base64(), "aGVsbG8"));
        assert!(accepts(&e164(), "+14155552671"));
        assert!(accepts(&url(), "https://example.com/path"));
        assert!(!accepts(&url(), "not a url"));
        assert!(accepts(&emoji(), "👍"));
        assert!(accepts(&ulid(), "01ARZ3NDEKTSV4RRFFQ69G5FAV"));
    }
}
