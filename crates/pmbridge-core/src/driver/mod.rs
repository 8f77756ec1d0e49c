//! Driver descriptor and collaborator traits
//!
//! This module provides the descriptor a chip driver hands to the framework
//! at bind time, and the traits connecting a driver to its transport and to
//! the framework.

mod info;
mod traits;

pub use info::*;
pub use traits::*;
