//! ISO 8601 string formats as standalone constructors
//!
//! `iso::datetime()` is shorthand for `string().datetime()`.

pub use crate::validators::formats::IsoOptions;
use crate::validators::string::{StringSchema, string};

/// A UTC datetime such as `2024-01-01T12:00:00Z`.
#[must_use]
pub fn datetime() -> StringSchema {
    string().datetime()
}

/// A datetime with explicit offset, precision and locality options.
///
/// ```rust,ignore
/// let stamp = iso::datetime_with(IsoOptions::new().offset().precision(3));
/// ```
#[must_use]
pub fn datetime_with(options: IsoOptions) -> StringSchema {
    string().datetime_with(options)
}

#[must_use]
pub fn date() -> StringSchema {
    string().date()
}

/// A time of day without a date or offset, e.g. `12:30:00`.
#[must_use]
pub fn time() -> StringSchema {
    string().time()
}

#[must_use]
pub fn time_with(options: IsoOptions) -> StringSchema {
    string().time_with(options)
}

#[must_use]
pub fn duration() -> StringSchema {
    string().duration()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-01T12:00:00Z", true)]
    #[case("2024-01-01T12:00:00.123Z", true)]
    #[case("2024-01-01T12:00:00+02:00", false)]
    #[case("2024-01-01", false)]
    fn utc_datetimes(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(datetime().safe_parse(input).unwrap().is_success(), ok);
    }

    #[test]
    fn offsets_when_enabled() {
        let s = datetime_with(IsoOptions::new().offset());
        assert!(s.safe_parse("2024-01-01T12:00:00+02:00").unwrap().is_success());
        assert!(s.safe_parse("2024-01-01T12:00:00Z").unwrap().is_success());
    }

    #[test]
    fn dates_times_durations() {
        assert!(date().safe_parse("2024-02-29").unwrap().is_success());
        assert!(!date().safe_parse("2024-13-01").unwrap().is_success());
        assert!(time().safe_parse("23:59:59").unwrap().is_success());
        assert!(duration().safe_parse("P3Y6M4DT12H30M5S").unwrap().is_success());
        assert!(!duration().safe_parse("P").unwrap().is_success());
    }

    #[test]
    fn format_issue_names_the_format() {
        let err = date().parse("yesterday").unwrap_err();
        assert_eq!(err.issues()[0].message, "Invalid ISO date");
    }
}
