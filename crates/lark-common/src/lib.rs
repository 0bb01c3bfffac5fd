//! Common utilities for the Lark HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated notices for unsupported features

pub mod warning;
