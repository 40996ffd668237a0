//! Desugaring passes around the type checker.
//!
//! - before: multi-parameter functions, multi-argument calls and return
//!   chains are reduced to single-parameter curried form
//! - after: parameter prologues are materialised as destructuring
//!   statements and declared annotations are erased

pub mod after;
pub mod before;

/// Name of the synthesized single parameter. `$` cannot start an
/// identifier, so it never collides with user names.
pub const ARGS_NAME: &str = "$args";
