//! Arbitrary-precision integer schemas

use crate::foundation::checks::{Check, CheckKind};
use crate::foundation::{Def, Limit, Origin, Schema};
use crate::macros::schema_handle;

schema_handle! {
    /// A bigint schema.
    BigIntSchema
}

/// Accepts bigints.
#[must_use]
pub fn bigint() -> BigIntSchema {
    BigIntSchema::with_coerce(false)
}

impl BigIntSchema {
    pub(crate) fn with_coerce(coerce: bool) -> Self {
        Self(Schema::from_def(Def::BigInt { coerce }))
    }

    fn check(&self, kind: CheckKind) -> Self {
        Self(self.0.with_check(Check::plain(kind)))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn gt(&self, n: i128) -> Self {
        self.check(CheckKind::Min {
            origin: Origin::BigInt,
            limit: Limit::BigInt(n),
            inclusive: false,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn gte(&self, n: i128) -> Self {
        self.check(CheckKind::Min {
            origin: Origin::BigInt,
            limit: Limit::BigInt(n),
            inclusive: true,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: i128) -> Self {
        self.gte(n)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lt(&self, n: i128) -> Self {
        self.check(CheckKind::Max {
            origin: Origin::BigInt,
            limit: Limit::BigInt(n),
            inclusive: false,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lte(&self, n: i128) -> Self {
        self.check(CheckKind::Max {
            origin: Origin::BigInt,
            limit: Limit::BigInt(n),
            inclusive: true,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: i128) -> Self {
        self.lte(n)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn positive(&self) -> Self {
        self.gt(0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn nonnegative(&self) -> Self {
        self.gte(0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn negative(&self) -> Self {
        self.lt(0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn nonpositive(&self) -> Self {
        self.lte(0)
    }

    /// A multiple of `step`. A zero step rejects every value.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(&self, step: i128) -> Self {
        self.check(CheckKind::MultipleOf(Limit::BigInt(step)))
    }
}
