//! Number schemas

use crate::foundation::checks::{Check, CheckKind, MAX_SAFE_INTEGER};
use crate::foundation::{Def, Limit, Origin, Schema};
use crate::macros::schema_handle;

schema_handle! {
    /// A number schema. Rejects `NaN` and, unless
    /// [`allow_infinite`](NumberSchema::allow_infinite) is set, infinities.
    NumberSchema
}

/// Accepts finite numbers.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema::with_coerce(false)
}

/// Accepts integers in the safe integer range.
#[must_use]
pub fn int() -> NumberSchema {
    number().int()
}

/// Accepts 32-bit signed integers.
#[must_use]
pub fn int32() -> NumberSchema {
    number()
        .int()
        .gte(f64::from(i32::MIN))
        .lte(f64::from(i32::MAX))
}

impl NumberSchema {
    pub(crate) fn with_coerce(coerce: bool) -> Self {
        Self(Schema::from_def(Def::Number {
            coerce,
            allow_infinite: false,
        }))
    }

    fn check(&self, kind: CheckKind) -> Self {
        Self(self.0.with_check(Check::plain(kind)))
    }

    fn lower(&self, limit: f64, inclusive: bool) -> Self {
        self.check(CheckKind::Min {
            origin: Origin::Number,
            limit: Limit::Number(limit),
            inclusive,
        })
    }

    fn upper(&self, limit: f64, inclusive: bool) -> Self {
        self.check(CheckKind::Max {
            origin: Origin::Number,
            limit: Limit::Number(limit),
            inclusive,
        })
    }

    // ==================== Bounds ====================

    /// Greater than `n`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gt(&self, n: f64) -> Self {
        self.lower(n, false)
    }

    /// Greater than or equal to `n`.
    #[must_use = "builder methods must be chained or built"]
    pub fn gte(&self, n: f64) -> Self {
        self.lower(n, true)
    }

    /// Alias of [`gte`](Self::gte).
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: f64) -> Self {
        self.gte(n)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lt(&self, n: f64) -> Self {
        self.upper(n, false)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn lte(&self, n: f64) -> Self {
        self.upper(n, true)
    }

    /// Alias of [`lte`](Self::lte).
    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: f64) -> Self {
        self.lte(n)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn positive(&self) -> Self {
        self.gt(0.0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn nonnegative(&self) -> Self {
        self.gte(0.0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn negative(&self) -> Self {
        self.lt(0.0)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn nonpositive(&self) -> Self {
        self.lte(0.0)
    }

    /// Within `[-(2^53 - 1), 2^53 - 1]`.
    #[must_use = "builder methods must be chained or built"]
    pub fn safe(&self) -> Self {
        self.gte(-MAX_SAFE_INTEGER).lte(MAX_SAFE_INTEGER)
    }

    // ==================== Shape ====================

    /// A multiple of `step`. Decimal steps are compared exactly, so
    /// `0.3` is a multiple of `0.1`.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(&self, step: f64) -> Self {
        self.check(CheckKind::MultipleOf(Limit::Number(step)))
    }

    /// Alias of [`multiple_of`](Self::multiple_of).
    #[must_use = "builder methods must be chained or built"]
    pub fn step(&self, step: f64) -> Self {
        self.multiple_of(step)
    }

    /// Integral and within the safe integer range.
    #[must_use = "builder methods must be chained or built"]
    pub fn int(&self) -> Self {
        self.check(CheckKind::Int)
    }

    /// Rejects infinities. This is the default.
    #[must_use = "builder methods must be chained or built"]
    pub fn finite(&self) -> Self {
        self.set_allow_infinite(false)
    }

    /// Accepts `Infinity` and `-Infinity`.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_infinite(&self) -> Self {
        self.set_allow_infinite(true)
    }

    fn set_allow_infinite(&self, allow: bool) -> Self {
        Self(self.0.derive(|node| {
            if let Def::Number { allow_infinite, .. } = &mut node.def {
                *allow_infinite = allow;
            }
        }))
    }

    // ==================== Introspection ====================

    /// Returns the effective lower bound and whether it is inclusive.
    #[must_use]
    pub fn min_value(&self) -> Option<(f64, bool)> {
        match &self.0.bag().minimum {
            Some((Limit::Number(n), inclusive)) => Some((*n, *inclusive)),
            _ => None,
        }
    }

    /// Returns the effective upper bound and whether it is inclusive.
    #[must_use]
    pub fn max_value(&self) -> Option<(f64, bool)> {
        match &self.0.bag().maximum {
            Some((Limit::Number(n), inclusive)) => Some((*n, *inclusive)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_int(&self) -> bool {
        self.0.bag().int
    }
}
