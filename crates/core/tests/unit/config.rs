//! Configuration Unit Tests.
//!
//! Verifies the defaults, partial JSON documents, rejection of unknown keys, and loading
//! from a file.

use std::fs;

use pretty_assertions::assert_eq;
use stackcpu_core::config::Config;
use stackcpu_core::{Error, Termination, simulate};
use tempfile::tempdir;

use crate::common::harness::TestContext;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.memory.size, 4096);
    assert_eq!(config.simulation.tick_limit, 200_000_000);
    assert!(!config.simulation.trace);
}

#[test]
fn empty_document_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json(r#"{ "memory": {} , "simulation": { "trace": true } }"#).unwrap();
    assert_eq!(config.memory.size, 4096);
    assert_eq!(config.simulation.tick_limit, 200_000_000);
    assert!(config.simulation.trace);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(Config::from_json(r#"{ "memroy": { "size": 1 } }"#).is_err());
    assert!(Config::from_json(r#"{ "simulation": { "ticks": 1 } }"#).is_err());
}

#[test]
fn from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sim.json");
    fs::write(&path, r#"{ "simulation": { "tick_limit": 10 } }"#).unwrap();
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.simulation.tick_limit, 10);

    let program = TestContext::new().assemble("loop: jump loop");
    let outcome = simulate(&program, "", &config).unwrap();
    assert_eq!(outcome.termination, Termination::TickLimitExceeded);
    assert_eq!(outcome.ticks, 10);
}

#[test]
fn from_file_errors() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("missing.json")),
        Err(Error::Io(_))
    ));

    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Config::from_file(&path), Err(Error::Json(_))));
}

#[test]
fn tracing_run_matches_untraced_run() {
    let mut traced = Config::default();
    traced.simulation.trace = true;
    let program = TestContext::new().assemble("lit 72 out 2 halt");
    let a = simulate(&program, "", &traced).unwrap();
    let b = simulate(&program, "", &Config::default()).unwrap();
    assert_eq!((a.output, a.ticks), (b.output, b.ticks));
}
