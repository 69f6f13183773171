//! Stress tests for concurrent emission and reconfiguration
//!
//! These tests verify:
//! - Emitting threads never observe a half-installed ruleset
//! - Callsite resolution happens once per site under contention
//! - Concurrent writers produce whole lines
//! - Derived loggers stay usable while the parent is reconfigured

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use vmodule_logger::handlers::{JsonHandler, SharedBuffer, TerminalHandler};
use vmodule_logger::prelude::*;

const THREADS: usize = 8;
const ITERATIONS: usize = 2_000;

/// Every record below the ceiling must come from a site some installed
/// ruleset admits; here both rulesets admit only `hot.rs`.
#[test]
fn test_reconfigure_while_emitting() {
    let buffer = SharedBuffer::new();
    let (logger, glog) = Logger::builder()
        .verbosity(Level::WARN)
        .vmodule("hot.rs=5")
        .handler(Arc::new(JsonHandler::new(buffer.clone())))
        .build()
        .expect("Failed to build logger");

    let hot = CallSite::new("src/engine/hot.rs", 1, 1);
    let cold = CallSite::new("src/engine/cold.rs", 1, 1);
    let stop = Arc::new(AtomicBool::new(false));
    let admitted = Arc::new(AtomicUsize::new(0));

    let emitters: Vec<_> = (0..THREADS)
        .map(|i| {
            let logger = logger.clone();
            let admitted = Arc::clone(&admitted);
            thread::spawn(move || {
                for n in 0..ITERATIONS {
                    let site = if (i + n) % 2 == 0 { hot } else { cold };
                    if logger.enabled_at(Level::DEBUG, &site) {
                        admitted.fetch_add(1, Ordering::Relaxed);
                    }
                    logger.write_at(Level::DEBUG, site, "tick", &kv!["thread", i, "n", n]);
                }
            })
        })
        .collect();

    let reconfigurer = {
        let glog = Arc::clone(&glog);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut flip = false;
            while !stop.load(Ordering::Relaxed) {
                let ruleset = if flip { "hot.rs=5" } else { "engine/hot.rs=4,nothing.rs=5" };
                glog.vmodule(ruleset).expect("valid ruleset");
                flip = !flip;
                thread::yield_now();
            }
        })
    };

    for handle in emitters {
        handle.join().expect("emitter panicked");
    }
    stop.store(true, Ordering::Relaxed);
    reconfigurer.join().expect("reconfigurer panicked");

    let lines = buffer.lines();
    assert!(!lines.is_empty());
    for line in &lines {
        let record: serde_json::Value = serde_json::from_str(line).expect("whole JSON line");
        let thread = record["thread"].as_u64().unwrap() as usize;
        let n = record["n"].as_u64().unwrap() as usize;
        assert_eq!((thread + n) % 2, 0, "cold callsite leaked: {}", line);
    }
    assert_eq!(lines.len(), admitted.load(Ordering::Relaxed));
    assert_eq!(logger.metrics().write_failures(), 0);
}

#[test]
fn test_single_resolution_per_site_under_contention() {
    let (logger, glog) = Logger::builder()
        .verbosity(Level::INFO)
        .vmodule("db/*=5")
        .handler(Arc::new(JsonHandler::new(std::io::sink())))
        .build()
        .expect("Failed to build logger");

    let sites: Vec<CallSite> = (1..=16)
        .map(|line| CallSite::new("src/db/pool.rs", line, 1))
        .collect();
    let sites = Arc::new(sites);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            let sites = Arc::clone(&sites);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    for site in sites.iter() {
                        assert!(logger.enabled_at(Level::TRACE, site));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(glog.site_resolutions(), 16);
    assert_eq!(glog.cached_sites(), 16);
}

#[test]
fn test_concurrent_terminal_writes_are_whole_lines() {
    let buffer = SharedBuffer::new();
    let (logger, _) = Logger::builder()
        .verbosity(Level::INFO)
        .handler(Arc::new(TerminalHandler::new(buffer.clone(), false)))
        .build()
        .expect("Failed to build logger");

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let logger = logger.clone();
            thread::spawn(move || {
                for n in 0..500 {
                    info!(logger, "message", "thread" => i, "n" => n);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * 500);
    for line in &lines {
        assert!(line.starts_with("[INFO ] ["), "torn line: {}", line);
        assert!(line.contains(" thread="));
        assert!(line.contains(" n="));
    }
    assert_eq!(logger.metrics().records_emitted(), (THREADS * 500) as u64);
}

#[test]
fn test_derived_loggers_during_reconfiguration() {
    let (logger, glog) = Logger::builder()
        .verbosity(Level::INFO)
        .vmodule("stress_tests.rs=5")
        .handler(Arc::new(JsonHandler::new(std::io::sink())))
        .build()
        .expect("Failed to build logger");

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let logger = logger.clone();
            let glog = Arc::clone(&glog);
            thread::spawn(move || {
                for n in 0..200 {
                    let child = logger.with(&kv!["worker", i]);
                    child.trace("derived", &kv!["n", n]);
                    if i == 0 && n % 10 == 0 {
                        glog.vmodule("stress_tests.rs=5").expect("valid ruleset");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    // every derived logger saw the same ruleset, so every trace was emitted
    assert_eq!(logger.metrics().records_emitted(), (THREADS * 200) as u64);
}
