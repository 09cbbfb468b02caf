//! String schemas
//!
//! Lengths count characters (Unicode scalar values), not bytes.

use regex::Regex;

use crate::foundation::checks::{Check, CheckKind, FormatCheck, Overwrite};
use crate::foundation::{Def, Format, Limit, Origin, Schema};
use crate::macros::schema_handle;
use crate::validators::formats::{self, IsoOptions};

schema_handle! {
    /// A string schema with string-specific builders.
    ///
    /// ```rust,ignore
    /// let handle = string().trim().min(3).max(20).regex(Regex::new("^[a-z_]+$")?);
    /// ```
    StringSchema
}

/// Accepts strings.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema::with_coerce(false)
}

impl StringSchema {
    pub(crate) fn with_coerce(coerce: bool) -> Self {
        Self(Schema::from_def(Def::String { coerce }))
    }

    fn check(&self, kind: CheckKind) -> Self {
        Self(self.0.with_check(Check::plain(kind)))
    }

    fn format(&self, check: FormatCheck) -> Self {
        self.check(CheckKind::Format(check))
    }

    // ==================== Length ====================

    /// At least `n` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: usize) -> Self {
        self.check(CheckKind::Min {
            origin: Origin::String,
            limit: Limit::Size(n),
            inclusive: true,
        })
    }

    /// At most `n` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: usize) -> Self {
        self.check(CheckKind::Max {
            origin: Origin::String,
            limit: Limit::Size(n),
            inclusive: true,
        })
    }

    /// Exactly `n` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(&self, n: usize) -> Self {
        self.check(CheckKind::Length {
            origin: Origin::String,
            exact: n,
        })
    }

    /// At least one character.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Returns the effective minimum length.
    #[must_use]
    pub fn min_length(&self) -> Option<usize> {
        self.0.bag().size_bounds().0
    }

    /// Returns the effective maximum length.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.0.bag().size_bounds().1
    }

    // ==================== Patterns ====================

    #[must_use = "builder methods must be chained or built"]
    pub fn regex(&self, regex: Regex) -> Self {
        self.check(CheckKind::Regex {
            regex,
            format: Format::Regex,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        self.check(CheckKind::StartsWith(prefix.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        self.check(CheckKind::EndsWith(suffix.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn includes(&self, needle: impl Into<String>) -> Self {
        self.check(CheckKind::Includes(needle.into()))
    }

    /// No uppercase ASCII letters.
    #[must_use = "builder methods must be chained or built"]
    pub fn lowercase(&self) -> Self {
        self.check(CheckKind::Regex {
            regex: formats::LOWERCASE.clone(),
            format: Format::Lowercase,
        })
    }

    /// No lowercase ASCII letters.
    #[must_use = "builder methods must be chained or built"]
    pub fn uppercase(&self) -> Self {
        self.check(CheckKind::Regex {
            regex: formats::UPPERCASE.clone(),
            format: Format::Uppercase,
        })
    }

    // ==================== Rewrites ====================

    /// Trims whitespace before the checks that follow.
    #[must_use = "builder methods must be chained or built"]
    pub fn trim(&self) -> Self {
        self.check(CheckKind::Overwrite(Overwrite::Trim))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_lower_case(&self) -> Self {
        self.check(CheckKind::Overwrite(Overwrite::Lowercase))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_upper_case(&self) -> Self {
        self.check(CheckKind::Overwrite(Overwrite::Uppercase))
    }

    // ==================== Formats ====================

    #[must_use = "builder methods must be chained or built"]
    pub fn email(&self) -> Self {
        self.format(formats::email())
    }

    /// Any RFC 9562 UUID, or the nil UUID.
    #[must_use = "builder methods must be chained or built"]
    pub fn uuid(&self) -> Self {
        self.format(formats::uuid())
    }

    /// A UUID of the given version (1 through 8).
    #[must_use = "builder methods must be chained or built"]
    pub fn uuid_version(&self, version: u8) -> Self {
        self.format(formats::uuid_version(version))
    }

    /// Any 8-4-4-4-12 hex identifier.
    #[must_use = "builder methods must be chained or built"]
    pub fn guid(&self) -> Self {
        self.format(formats::guid())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn url(&self) -> Self {
        self.format(formats::url())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn emoji(&self) -> Self {
        self.format(formats::emoji())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn nanoid(&self) -> Self {
        self.format(formats::nanoid())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn cuid(&self) -> Self {
        self.format(formats::cuid())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn cuid2(&self) -> Self {
        self.format(formats::cuid2())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ulid(&self) -> Self {
        self.format(formats::ulid())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ipv4(&self) -> Self {
        self.format(formats::ipv4())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ipv6(&self) -> Self {
        self.format(formats::ipv6())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn cidrv4(&self) -> Self {
        self.format(formats::cidrv4())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn cidrv6(&self) -> Self {
        self.format(formats::cidrv6())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn base64(&self) -> Self {
        self.format(formats::base64())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn base64url(&self) -> Self {
        self.format(formats::base64url())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn e164(&self) -> Self {
        self.format(formats::e164())
    }

    /// A three-part JWT whose header names an algorithm.
    #[must_use = "builder methods must be chained or built"]
    pub fn jwt(&self) -> Self {
        self.format(formats::jwt(None))
    }

    /// A JWT signed with `alg`.
    #[must_use = "builder methods must be chained or built"]
    pub fn jwt_alg(&self, alg: impl Into<String>) -> Self {
        self.format(formats::jwt(Some(alg.into())))
    }

    /// An ISO 8601 datetime in UTC (`Z`), any sub-second precision.
    #[must_use = "builder methods must be chained or built"]
    pub fn datetime(&self) -> Self {
        self.format(formats::iso_datetime(IsoOptions::default()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn datetime_with(&self, options: IsoOptions) -> Self {
        self.format(formats::iso_datetime(options))
    }

    /// An ISO 8601 calendar date, `YYYY-MM-DD`.
    #[must_use = "builder methods must be chained or built"]
    pub fn date(&self) -> Self {
        self.format(formats::iso_date())
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn time(&self) -> Self {
        self.format(formats::iso_time(IsoOptions::default()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn time_with(&self, options: IsoOptions) -> Self {
        self.format(formats::iso_time(options))
    }

    /// An ISO 8601 duration, e.g. `P3Y6M4DT12H30M5S`.
    #[must_use = "builder methods must be chained or built"]
    pub fn duration(&self) -> Self {
        self.format(formats::duration())
    }
}
