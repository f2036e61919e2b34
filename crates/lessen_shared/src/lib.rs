//! Shared functionality
//!
//! This crate supplies the character streams and locations used by the lessen tokenizer.
//!

pub mod char_stream;
pub mod errors;
