//! # Shelfmark - THE BINARY (library surface)
//!
//! Library surface of the Shelfmark application, exposed so integration
//! tests can drive the HTTP router and CLI plumbing directly.

pub mod api;
pub mod cli;
pub mod persistence;
