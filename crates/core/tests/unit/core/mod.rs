//! # Processor Core Tests
//!
//! Tests for the virtual processor, split by component:
//! - **ALU**: Carry policy, floored division, logic and comparisons.
//! - **Datapath**: Stacks, memory, ports, and argument latching.
//! - **Microcode**: Per-tick sequencing observed through trace records.



/// Control unit sequencing.
pub mod microcode;
