//! # Assembler Tests
//!
//! Tests for the two-pass assembler, split by concern:
//! - **Labels**: Address fix-up, forward references, functions, and the entry point.
//! - **Variables**: Data placement after the code and variable addressing.
//! - **Literals**: Pooling of literals wider than the argument field.
//! - **Errors**: Every assembly failure and its reported position.




/// Assembly error reporting.
pub mod errors;
