//! Date schemas

use chrono::{DateTime, Utc};

use crate::foundation::checks::{Check, CheckKind};
use crate::foundation::{Def, Limit, Origin, Schema};
use crate::macros::schema_handle;

schema_handle! {
    /// A date schema. Bounds are inclusive.
    DateSchema
}

/// Accepts dates.
#[must_use]
pub fn date() -> DateSchema {
    DateSchema::with_coerce(false)
}

impl DateSchema {
    pub(crate) fn with_coerce(coerce: bool) -> Self {
        Self(Schema::from_def(Def::Date { coerce }))
    }

    /// On or after `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, min: DateTime<Utc>) -> Self {
        Self(self.0.with_check(Check::plain(CheckKind::Min {
            origin: Origin::Date,
            limit: Limit::Date(min),
            inclusive: true,
        })))
    }

    /// On or before `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, max: DateTime<Utc>) -> Self {
        Self(self.0.with_check(Check::plain(CheckKind::Max {
            origin: Origin::Date,
            limit: Limit::Date(max),
            inclusive: true,
        })))
    }

    #[must_use]
    pub fn min_date(&self) -> Option<DateTime<Utc>> {
        match &self.0.bag().minimum {
            Some((Limit::Date(d), _)) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn max_date(&self) -> Option<DateTime<Utc>> {
        match &self.0.bag().maximum {
            Some((Limit::Date(d), _)) => Some(*d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let s = date().min(day(2)).max(day(5));
        assert!(s.safe_parse(day(2)).unwrap().is_success());
        assert!(s.safe_parse(day(5)).unwrap().is_success());
        let err = s.parse(day(1)).unwrap_err();
        assert_eq!(
            err.issues()[0].message,
            "Too small: expected date to be >=2024-01-02T00:00:00.000Z"
        );
    }

    #[test]
    fn later_min_tightens() {
        let s = date().min(day(2)).min(day(4)).min(day(3));
        assert_eq!(s.min_date(), Some(day(4)));
        assert_eq!(s.max_date(), None);
    }

    #[test]
    fn rejects_strings() {
        assert!(!date().safe_parse("2024-01-01").unwrap().is_success());
    }
}
