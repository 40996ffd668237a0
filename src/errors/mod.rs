//! Error types and error handling for the compiler.
//!
//! This module defines the single error type shared by every stage of the
//! pipeline. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and type checking
//! - The exact diagnostic wording, produced through `thiserror`
//! - A separate kind for internal invariant violations

pub mod errors;

#[cfg(test)]
mod tests;
