//! I/O port buffers.
//!
//! Ports 0 and 1 are input queues filled before the run starts; ports 2 and 3 are output
//! sequences. Each output element is either a single printable character or the decimal
//! rendering of a value outside the printable range.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::common::SimError;
use crate::common::constants::{INPUT_PORTS, PORT_COUNT, PRINTABLE_MAX, PRINTABLE_MIN};

/// One port's buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortBuffer {
    /// Characters waiting to be read.
    Input(VecDeque<char>),
    /// Values written so far.
    Output(Vec<String>),
}

/// The four I/O ports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ports {
    buffers: [PortBuffer; PORT_COUNT],
    input_underflows: u64,
}

impl Default for Ports {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders an output value as stored in an output buffer.
pub fn render_output(value: i64) -> String {
    if (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&value) {
        char::from(value as u8).to_string()
    } else {
        value.to_string()
    }
}

impl Ports {
    /// Creates empty ports.
    pub fn new() -> Self {
        Self {
            buffers: std::array::from_fn(|port| {
                if INPUT_PORTS.contains(&port) {
                    PortBuffer::Input(VecDeque::new())
                } else {
                    PortBuffer::Output(Vec::new())
                }
            }),
            input_underflows: 0,
        }
    }

    fn buffer(&mut self, port: i64) -> Option<&mut PortBuffer> {
        usize::try_from(port).ok().and_then(|p| self.buffers.get_mut(p))
    }

    /// Appends text to an input port's queue. Ignored for output ports.
    pub fn feed(&mut self, port: usize, text: &str) {
        if let Some(PortBuffer::Input(queue)) = self.buffers.get_mut(port) {
            queue.extend(text.chars());
        }
    }

    /// Reads one character code from an input port.
    ///
    /// An exhausted queue yields 0 and logs a warning.
    ///
    /// # Returns
    ///
    /// `UnknownPort` if `port` is not an input port.
    pub fn read(&mut self, port: i64) -> Result<i64, SimError> {
        let Some(PortBuffer::Input(queue)) = self.buffer(port) else {
            return Err(SimError::UnknownPort {
                port,
                direction: "read",
            });
        };
        if let Some(ch) = queue.pop_front() {
            Ok(i64::from(u32::from(ch)))
        } else {
            self.input_underflows += 1;
            warn!(port, "input buffer empty");
            Ok(0)
        }
    }

    /// Writes a value to an output port.
    ///
    /// # Returns
    ///
    /// `UnknownPort` if `port` is not an output port.
    pub fn write(&mut self, port: i64, value: i64) -> Result<(), SimError> {
        let Some(PortBuffer::Output(out)) = self.buffer(port) else {
            return Err(SimError::UnknownPort {
                port,
                direction: "write",
            });
        };
        if !(PRINTABLE_MIN..=PRINTABLE_MAX).contains(&value) {
            debug!(port, value, "non-printable output recorded as decimal");
        }
        out.push(render_output(value));
        Ok(())
    }

    /// Returns the concatenated output of `port`, or an empty string for input ports.
    pub fn output(&self, port: usize) -> String {
        match self.buffers.get(port) {
            Some(PortBuffer::Output(out)) => out.concat(),
            _ => String::new(),
        }
    }

    /// Returns the number of characters left on `port`, or 0 for output ports.
    pub fn pending_input(&self, port: usize) -> usize {
        match self.buffers.get(port) {
            Some(PortBuffer::Input(queue)) => queue.len(),
            _ => 0,
        }
    }

    /// Returns the number of elements written to `port`, or 0 for input ports.
    pub fn output_len(&self, port: usize) -> usize {
        match self.buffers.get(port) {
            Some(PortBuffer::Output(out)) => out.len(),
            _ => 0,
        }
    }

    /// Returns how many reads found an empty queue.
    pub const fn input_underflows(&self) -> u64 {
        self.input_underflows
    }
}
