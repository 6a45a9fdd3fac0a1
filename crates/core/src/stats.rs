//! Simulation statistics collection and reporting.
//!
//! This module tracks per-run metrics for the simulator. It provides:
//! 1. **Ticks and Instructions:** Total ticks, retired instructions, and ticks per instruction.
//! 2. **Instruction mix:** Counts by category (stack, arithmetic, logic, comparison, control,
//!    memory, I/O, immediate).
//! 3. **Control flow:** Taken and not-taken `if` branches, calls, and returns.
//! 4. **I/O:** Reads that found the input buffer empty.

use std::time::Instant;

use crate::isa::{Category, Opcode};

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks (micro-operations) elapsed.
    pub ticks: u64,
    /// Number of instructions completed.
    pub instructions_retired: u64,

    /// `drop`, `dup`, `swap` retired.
    pub inst_stack: u64,
    /// `+ - * / mod negate` retired.
    pub inst_arith: u64,
    /// `and or xor invert` retired.
    pub inst_logic: u64,
    /// `= < >` retired.
    pub inst_compare: u64,
    /// `if jump call ret halt` retired.
    pub inst_control: u64,
    /// `! @` retired.
    pub inst_memory: u64,
    /// `in out` retired.
    pub inst_io: u64,
    /// `lit c` retired.
    pub inst_immediate: u64,

    /// `if` instructions that branched.
    pub branches_taken: u64,
    /// `if` instructions that fell through.
    pub branches_not_taken: u64,
    /// `call` instructions retired.
    pub calls: u64,
    /// `ret` instructions retired.
    pub returns: u64,

    /// `in` reads that found the input buffer empty.
    pub input_underflows: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            instructions_retired: 0,
            inst_stack: 0,
            inst_arith: 0,
            inst_logic: 0,
            inst_compare: 0,
            inst_control: 0,
            inst_memory: 0,
            inst_io: 0,
            inst_immediate: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            calls: 0,
            returns: 0,
            input_underflows: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"control"`, `"io"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "control", "io"];

impl SimStats {
    /// Records a retired instruction.
    ///
    /// # Arguments
    ///
    /// * `opcode` - The instruction that completed.
    /// * `branched` - For `if`, whether the branch was taken; ignored otherwise.
    pub const fn retire(&mut self, opcode: Opcode, branched: bool) {
        self.instructions_retired += 1;
        match opcode.category() {
            Category::Stack => self.inst_stack += 1,
            Category::Arithmetic => self.inst_arith += 1,
            Category::Logic => self.inst_logic += 1,
            Category::Comparison => self.inst_compare += 1,
            Category::Control => self.inst_control += 1,
            Category::Memory => self.inst_memory += 1,
            Category::Io => self.inst_io += 1,
            Category::Immediate => self.inst_immediate += 1,
        }
        match opcode {
            Opcode::If if branched => self.branches_taken += 1,
            Opcode::If => self.branches_not_taken += 1,
            Opcode::Call => self.calls += 1,
            Opcode::Ret => self.returns += 1,
            _ => {}
        }
    }

    /// Returns the count for one instruction category.
    pub const fn category_count(&self, category: Category) -> u64 {
        match category {
            Category::Stack => self.inst_stack,
            Category::Arithmetic => self.inst_arith,
            Category::Logic => self.inst_logic,
            Category::Comparison => self.inst_compare,
            Category::Control => self.inst_control,
            Category::Memory => self.inst_memory,
            Category::Io => self.inst_io,
            Category::Immediate => self.inst_immediate,
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"instruction_mix"`,
    /// `"control"`, or `"io"`. Pass an empty slice to print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let ticks = self.ticks.max(1);
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            let tpi = ticks as f64 / instr as f64;
            let khz = (self.ticks as f64 / seconds) / 1000.0;
            println!("\n==========================================================");
            println!("STACK MACHINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_ticks                {}", self.ticks);
            println!("sim_freq                 {khz:.2} kHz");
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ticks_per_inst       {tpi:.4}");
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let total = instr as f64;
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.stack", self.inst_stack),
                ("op.arith", self.inst_arith),
                ("op.logic", self.inst_logic),
                ("op.compare", self.inst_compare),
                ("op.control", self.inst_control),
                ("op.memory", self.inst_memory),
                ("op.io", self.inst_io),
                ("op.immediate", self.inst_immediate),
            ] {
                println!(
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / total) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("control") {
            let branches = self.branches_taken + self.branches_not_taken;
            let taken = if branches > 0 {
                100.0 * (self.branches_taken as f64 / branches as f64)
            } else {
                0.0
            };
            println!("CONTROL FLOW");
            println!("  if.total               {branches}");
            println!("  if.taken               {} ({taken:.2}%)", self.branches_taken);
            println!("  call                   {}", self.calls);
            println!("  ret                    {}", self.returns);
            println!("----------------------------------------------------------");
        }
        if want("io") {
            println!("I/O");
            println!("  in.underflows          {}", self.input_underflows);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
