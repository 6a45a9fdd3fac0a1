//! # ISA Unit Tests
//!
//! This module contains unit tests for the opcode table, the binary image codec, and the
//! hex listing.

/// Binary image encode/decode tests, including round-trip properties.
pub mod codec;
