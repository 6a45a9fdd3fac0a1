//! Tick Logging Tests.
//!
//! Runs programs under a scoped subscriber that captures formatted events, and checks that
//! per-tick records appear exactly when debug events are enabled.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use pretty_assertions::assert_eq;
use stackcpu_core::{Config, assemble, simulate};
use tracing::Level;

/// In-memory writer shared between the subscriber and the test.
#[derive(Clone, Debug, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `source` with the default configuration under a subscriber capped at `level`.
fn run_logged(source: &str, level: Level) -> (String, u64) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let program = assemble(source).unwrap();
    let outcome = tracing::subscriber::with_default(subscriber, || {
        simulate(&program, "", &Config::default())
    })
    .unwrap();
    (captured.text(), outcome.ticks)
}

fn tick_lines(log: &str) -> usize {
    log.lines()
        .filter(|line| line.contains("core::trace: tick"))
        .count()
}

#[test]
fn debug_level_logs_every_tick() {
    let (log, ticks) = run_logged("lit 72 out 2 halt", Level::DEBUG);
    assert_eq!(ticks, 4);
    assert_eq!(tick_lines(&log), 4);
    assert!(log.contains("opcode=lit"));
    assert!(log.contains("micro_op="));
}

#[test]
fn info_level_logs_no_ticks() {
    let (log, ticks) = run_logged("lit 72 out 2 halt", Level::INFO);
    assert_eq!(ticks, 4);
    assert_eq!(tick_lines(&log), 0);
    assert!(log.contains("halted"));
}
