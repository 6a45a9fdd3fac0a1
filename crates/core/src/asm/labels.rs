//! Symbol tables built during assembly.
//!
//! `LabelTable` maps label and function names to code addresses. It is filled with
//! provisional addresses during the first pass and corrected in the second. `VariableTable`
//! maps variable names to their data values in declaration order; their addresses are only
//! known once the code length is fixed.

use std::collections::HashMap;

use crate::common::AsmError;
use crate::isa::SourcePos;

/// Name to code address.
#[derive(Debug, Default, Clone)]
pub struct LabelTable {
    labels: HashMap<String, usize>,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a label at a provisional address.
    ///
    /// Fails with `DuplicateLabel` if the name is already declared.
    pub fn declare(&mut self, name: &str, addr: usize, pos: SourcePos) -> Result<(), AsmError> {
        if self.labels.contains_key(name) {
            return Err(AsmError::DuplicateLabel {
                name: name.to_string(),
                pos,
            });
        }
        let _ = self.labels.insert(name.to_string(), addr);
        Ok(())
    }

    /// Overwrites the address of an already declared label, returning the previous address.
    pub fn fix_up(&mut self, name: &str, addr: usize) -> Option<usize> {
        self.labels.get_mut(name).map(|slot| std::mem::replace(slot, addr))
    }

    /// Returns the address of `name`, if declared.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Returns true if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// Resolves `name`, failing with `UndefinedLabel` at `pos`.
    pub fn resolve(&self, name: &str, pos: SourcePos) -> Result<usize, AsmError> {
        self.get(name).ok_or_else(|| AsmError::UndefinedLabel {
            name: name.to_string(),
            pos,
        })
    }

    /// Returns the number of declared labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no label is declared.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Variables in declaration order.
#[derive(Debug, Default, Clone)]
pub struct VariableTable {
    slots: HashMap<String, usize>,
    values: Vec<i64>,
}

impl VariableTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable holding `value`, returning its slot index.
    pub fn declare(&mut self, name: &str, value: i64, pos: SourcePos) -> Result<usize, AsmError> {
        if self.slots.contains_key(name) {
            return Err(AsmError::DuplicateLabel {
                name: name.to_string(),
                pos,
            });
        }
        let slot = self.values.len();
        let _ = self.slots.insert(name.to_string(), slot);
        self.values.push(value);
        Ok(slot)
    }

    /// Returns true if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variable is declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the address of `name` given that data starts at `data_base`.
    pub fn address(&self, name: &str, data_base: usize) -> Option<usize> {
        self.slots.get(name).map(|slot| data_base + slot)
    }

    /// Consumes the table, returning the values in placement order.
    pub fn into_values(self) -> Vec<i64> {
        self.values
    }
}
