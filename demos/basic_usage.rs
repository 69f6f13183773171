//! Basic logger usage example
//!
//! Demonstrates the terminal handler, the level ceiling and derived loggers.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;
use vmodule_logger::handlers::TerminalHandler;
use vmodule_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== vmodule_logger - Basic Usage Example ===\n");

    let (logger, verbosity) = Logger::builder()
        .verbosity(Level::TRACE)
        .handler(Arc::new(TerminalHandler::new(std::io::stdout(), true)))
        .build()?;

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Key/value context lines up across records:");
    info!(logger, "peer connected", "id" => "4f2a91", "addr" => "10.0.0.7:30303");
    info!(logger, "peer connected", "id" => "c1", "addr" => "10.0.0.12:30303");
    info!(logger, "nil values render as <nil>", "parent" => FieldValue::Null);
    logger.info("direct call with kv!", &kv!["blocks", 128u64, "elapsed", std::time::Duration::from_millis(412)]);

    println!("\n3. Derived loggers carry their context:");
    let sync = logger.with(&kv!["component", "sync"]);
    sync.info("starting", &kv!["target", 19_000_000u64]);

    println!("\n4. Raising the ceiling to WARN:");
    verbosity.set_verbosity(Level::WARN);
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\nRecords emitted: {}", logger.metrics().records_emitted());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
