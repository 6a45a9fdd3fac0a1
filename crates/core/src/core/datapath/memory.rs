//! Unified code/data memory.
//!
//! Memory is a flat array of 64-bit cells shared by code and data. Loading a program
//! writes one cell per encoded byte of code (opcode byte, then argument bytes), followed by
//! one cell per data value.

use crate::common::SimError;
use crate::common::constants::ARG_MASK;
use crate::isa::Program;

/// Cell-addressed memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size],
        }
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if memory has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Loads a program at address 0.
    ///
    /// Arguments are written as their low 24 bits, matching the binary image.
    ///
    /// # Returns
    ///
    /// `ProgramTooLarge` if code and data do not fit.
    pub fn load(&mut self, program: &Program) -> Result<(), SimError> {
        let cells = program.cell_count();
        if cells > self.cells.len() {
            return Err(SimError::ProgramTooLarge {
                cells,
                capacity: self.cells.len(),
            });
        }

        let mut addr = 0;
        for instr in &program.instructions {
            self.cells[addr] = i64::from(instr.opcode.binary());
            addr += 1;
            if instr.opcode.has_argument() {
                let field = (instr.arg.unwrap_or(0) as u32) & ARG_MASK;
                for byte in &field.to_be_bytes()[1..] {
                    self.cells[addr] = i64::from(*byte);
                    addr += 1;
                }
            }
        }
        for &value in &program.data {
            self.cells[addr] = value;
            addr += 1;
        }
        Ok(())
    }

    fn index(&self, addr: i64) -> Result<usize, SimError> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(SimError::MemoryOutOfRange { addr })
    }

    /// Reads the cell at `addr`.
    pub fn read(&self, addr: i64) -> Result<i64, SimError> {
        let i = self.index(addr)?;
        Ok(self.cells[i])
    }

    /// Writes `value` to the cell at `addr`.
    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), SimError> {
        let i = self.index(addr)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}
