//! Result handling for register reads
//!
//! Translation hooks read two kinds of registers:
//! - primary registers carry the value the caller asked for; their failures
//!   are the caller's failures ([`require`]),
//! - auxiliary registers only add detail bits to a status value; when they
//!   cannot be read the detail is simply missing ([`enrich`]).

use crate::error::Result;

/// Use an auxiliary read if it succeeded with a non-zero value
///
/// A failed read and a zero value both contribute nothing, so `None` is
/// returned for either.
pub fn enrich<T>(source: Result<T>) -> Option<T>
where
    T: Copy + PartialEq + Default,
{
    match source {
        Ok(value) if value != T::default() => Some(value),
        Ok(_) => None,
        Err(e) => {
            log::debug!("ignoring auxiliary status read failure: {}", e);
            None
        }
    }
}

/// Propagate a primary read failure unchanged
#[inline]
pub fn require<T>(source: Result<T>) -> Result<T> {
    source
}
