//! Parsers for the semi-structured text blocks specific commands emit.

pub mod simulate;
pub mod stats;
