//! The crate's error taxonomy and the thread-local last-error slot.

use std::cell::RefCell;

use thiserror::Error;
use uast_xpath1::XPathError;

#[derive(Error, Debug, Clone)]
pub enum UastError {
    /// The query string was empty.
    #[error("query string is empty")]
    EmptyQuery,

    /// XPath compile or evaluation failure.
    #[error("XPath error: {0}")]
    Query(#[from] XPathError),

    /// The query's actual result kind did not match what the caller asked for.
    #[error("Result of expression is not {expected} (is: {actual})")]
    ResultKindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A host node's `internal_type` returned an empty string. Treated as a
    /// projection failure rather than an assertion, since this is a `Result` a
    /// caller can recover from rather than a programmer-error abort.
    #[error("host node internal type must not be empty")]
    EmptyInternalType,
}

thread_local! {
    // Per-thread rather than a single process-wide buffer, so concurrent failing
    // calls on different threads never race on the same slot.
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(err: &UastError) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err.to_string()));
}

/// Returns a fresh copy of the last error recorded on this thread, if any.
///
/// Every public filter/iterator-construction call either succeeds and leaves this
/// slot untouched, or fails and overwrites it.
pub fn last_error() -> Option<String> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}
