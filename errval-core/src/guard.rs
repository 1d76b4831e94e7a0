//! Argument-gated call interception
//!
//! [`guard`] wraps a target operation so that, before the target runs, each
//! positional argument is checked against the error value's expectation
//! table. A hit short-circuits the call and hands the error value back in
//! the target's own error arm.
//!
//! The target must declare a result type that can carry an
//! [`ErrorValue`]; this is checked by the compiler through [`Substitute`].
//!
//! ```compile_fail
//! use errval_core::{guard, ErrorValue, ExpectationTable};
//! use std::any::Any;
//!
//! let error = ErrorValue::for_error::<std::fmt::Error>(ExpectationTable::new(), "no");
//! // `i32` has no room for an error value
//! let guarded = guard(&error, |_: &[&dyn Any]| 42i32);
//! let _ = guarded.call(&[]);
//! ```

use crate::error::{ContractError, Result};
use crate::value::ErrorValue;
use std::any::Any;

/// Result types that can stand in an [`ErrorValue`] for a real result
pub trait Substitute {
    /// Wrap `error` as this type's error arm
    fn substitute(error: ErrorValue) -> Self;
}

impl<T, E: From<ErrorValue>> Substitute for std::result::Result<T, E> {
    fn substitute(error: ErrorValue) -> Self {
        Err(E::from(error))
    }
}

/// Which membership outcome produces the error value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trigger {
    /// An argument whose type is listed at its position produces the error
    #[default]
    Listed,
    /// An argument whose type is missing from its position produces the error
    Unlisted,
}

impl Trigger {
    fn fires(self, listed: bool) -> bool {
        match self {
            Trigger::Listed => listed,
            Trigger::Unlisted => !listed,
        }
    }
}

/// A target operation wrapped by an error value
#[derive(Clone)]
pub struct Guarded<F> {
    error: ErrorValue,
    target: Option<F>,
    trigger: Trigger,
}

/// Wrap `target` with `error`
pub fn guard<F>(error: &ErrorValue, target: F) -> Guarded<F> {
    intercept(error, Some(target))
}

/// Wrap an optional `target` with `error`
///
/// Calls through a guard without a target do nothing.
pub fn intercept<F>(error: &ErrorValue, target: Option<F>) -> Guarded<F> {
    Guarded {
        error: error.clone(),
        target,
        trigger: Trigger::default(),
    }
}

impl<F> Guarded<F> {
    /// Select the membership polarity
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// The error value handed back on a hit
    pub fn error(&self) -> &ErrorValue {
        &self.error
    }

    /// Whether a target is attached
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

impl<F, R> Guarded<F>
where
    F: Fn(&[&dyn Any]) -> R,
    R: Substitute,
{
    /// Call the target with `args`, or return the error value in its place
    ///
    /// Returns `Ok(None)` when no target is attached. With no arguments the
    /// table is not consulted. Otherwise the table must guard exactly as
    /// many positions as there are arguments.
    pub fn call(&self, args: &[&dyn Any]) -> Result<Option<R>> {
        let Some(target) = &self.target else {
            return Ok(None);
        };

        if args.is_empty() {
            return Ok(Some(target(args)));
        }

        let expectation = self.error.expectation();
        if expectation.len() != args.len() {
            return Err(ContractError::ArityMismatch {
                expected: expectation.len(),
                found: args.len(),
            });
        }

        for position in expectation.positions() {
            let arg: &dyn Any = *args.get(position).ok_or_else(|| {
                ContractError::OutOfRange(format!(
                    "position {position} is past the end of {} arguments",
                    args.len()
                ))
            })?;

            if self.trigger.fires(expectation.is_listed(position, arg)) {
                log::debug!(
                    "argument {position} triggered error value: {}",
                    self.error
                );
                return Ok(Some(R::substitute(self.error.clone())));
            }
        }

        log::trace!("all {} arguments passed, calling target", args.len());
        Ok(Some(target(args)))
    }
}

impl ErrorValue {
    /// Wrap `target` with this error value
    pub fn guard<F>(&self, target: F) -> Guarded<F> {
        guard(self, target)
    }

    /// Wrap an optional `target` with this error value
    pub fn intercept<F>(&self, target: Option<F>) -> Guarded<F> {
        intercept(self, target)
    }
}
