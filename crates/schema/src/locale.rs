//! Built-in English messages
//!
//! The last message source consulted; see [`config`](crate::config) for the
//! precedence order.

use crate::foundation::{Format, IssueKind, Limit, Origin};

fn format_noun(format: Format) -> &'static str {
    match format {
        Format::Regex => "input",
        Format::Email => "email address",
        Format::Url => "URL",
        Format::Emoji => "emoji",
        Format::Uuid => "UUID",
        Format::Guid => "GUID",
        Format::Nanoid => "nanoid",
        Format::Cuid => "cuid",
        Format::Cuid2 => "cuid2",
        Format::Ulid => "ULID",
        Format::Datetime => "ISO datetime",
        Format::Date => "ISO date",
        Format::Time => "ISO time",
        Format::Duration => "ISO duration",
        Format::Ipv4 => "IPv4 address",
        Format::Ipv6 => "IPv6 address",
        Format::Cidrv4 => "IPv4 range",
        Format::Cidrv6 => "IPv6 range",
        Format::Base64 => "base64-encoded string",
        Format::Base64url => "base64url-encoded string",
        Format::E164 => "E.164 number",
        Format::Jwt => "JWT",
        Format::Lowercase => "lowercase string",
        Format::Uppercase => "uppercase string",
        Format::StartsWith | Format::EndsWith | Format::Includes => "string",
    }
}

fn bound(prefix: &str, origin: Origin, adj: &str, limit: &Limit) -> String {
    match origin.unit() {
        Some(unit) => format!("{prefix}: expected {origin} to have {adj}{limit} {unit}"),
        None => format!("{prefix}: expected {origin} to be {adj}{limit}"),
    }
}

fn quoted(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// Renders the English message for an issue.
#[must_use]
pub fn en(kind: &IssueKind) -> String {
    match kind {
        IssueKind::InvalidType { expected, received } => {
            format!("Invalid input: expected {expected}, received {received}")
        }
        IssueKind::InvalidValue { values } => match values.as_slice() {
            [single] => format!("Invalid input: expected {single}"),
            many => {
                let joined: Vec<String> = many.iter().map(ToString::to_string).collect();
                format!("Invalid option: expected one of {}", joined.join("|"))
            }
        },
        IssueKind::TooBig {
            origin,
            maximum,
            inclusive,
            ..
        } => bound("Too big", *origin, if *inclusive { "<=" } else { "<" }, maximum),
        IssueKind::TooSmall {
            origin,
            minimum,
            inclusive,
            ..
        } => bound("Too small", *origin, if *inclusive { ">=" } else { ">" }, minimum),
        IssueKind::InvalidFormat {
            format,
            pattern,
            prefix,
            suffix,
            includes,
        } => match format {
            Format::StartsWith => format!(
                "Invalid string: must start with {}",
                quoted(prefix.as_deref().unwrap_or_default())
            ),
            Format::EndsWith => format!(
                "Invalid string: must end with {}",
                quoted(suffix.as_deref().unwrap_or_default())
            ),
            Format::Includes => format!(
                "Invalid string: must include {}",
                quoted(includes.as_deref().unwrap_or_default())
            ),
            Format::Regex => format!(
                "Invalid string: must match pattern /{}/",
                pattern.as_deref().unwrap_or_default()
            ),
            other => format!("Invalid {}", format_noun(*other)),
        },
        IssueKind::NotMultipleOf { divisor } => {
            format!("Invalid number: must be a multiple of {divisor}")
        }
        IssueKind::UnrecognizedKeys { keys } => {
            let joined: Vec<String> = keys.iter().map(|k| quoted(k)).collect();
            let plural = if keys.len() > 1 { "s" } else { "" };
            format!("Unrecognized key{plural}: {}", joined.join(", "))
        }
        IssueKind::InvalidKey { origin, .. } => format!("Invalid key in {origin}"),
        IssueKind::InvalidElement { origin, .. } => format!("Invalid value in {origin}"),
        IssueKind::InvalidUnion { .. } | IssueKind::Custom { .. } => "Invalid input".to_owned(),
    }
}
