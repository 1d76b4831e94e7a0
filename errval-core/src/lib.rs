//! Errors as values
//!
//! An [`ErrorValue`] describes an expected failure: an error kind, a
//! human-readable cause, and an [`ExpectationTable`] saying which argument
//! types produce it. Wrapping an operation with [`guard`] checks each call's
//! arguments against that table and returns the error value in the
//! operation's `Err` arm instead of calling it when a guarded type shows up.
//!
//! ```
//! use errval_core::{ErrorValue, ExpectationTable};
//! use std::any::Any;
//! use std::num::ParseIntError;
//!
//! let no_ints = ErrorValue::for_error::<ParseIntError>(
//!     ExpectationTable::new().with_type::<i32>(0),
//!     "already a number",
//! );
//!
//! let parse = no_ints.guard(|args: &[&dyn Any]| -> Result<i32, ErrorValue> {
//!     Ok(args[0].downcast_ref::<&str>().map_or(0, |s| s.len() as i32))
//! });
//!
//! assert_eq!(parse.call(&[&"abc"]).unwrap(), Some(Ok(3)));
//! assert!(matches!(parse.call(&[&7i32]).unwrap(), Some(Err(_))));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod guard;
pub mod table;
pub mod tag;
pub mod value;

pub use error::{ContractError, Result};
pub use guard::{guard, intercept, Guarded, Substitute, Trigger};
pub use table::{ExpectationTable, TypeSet};
pub use tag::TypeTag;
pub use value::{ErrorValue, Raised};
