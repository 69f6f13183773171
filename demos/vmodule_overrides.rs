//! Per-callsite verbosity overrides
//!
//! Keeps the global ceiling at INFO while turning on trace output for
//! selected source files, then swaps the ruleset at runtime.
//!
//! Run with: cargo run --example vmodule_overrides

use vmodule_logger::handlers::sink;
use vmodule_logger::prelude::*;

mod p2p {
    use vmodule_logger::prelude::*;

    pub fn dial(logger: &Logger, peer: &str) {
        // The callsite is this file, so rules match on `vmodule_overrides.rs`
        trace!(logger, "dialing", "peer" => peer);
    }
}

fn main() -> Result<()> {
    println!("=== vmodule_logger - Override Example ===\n");

    let config = LogConfig {
        verbosity: 3,
        format: OutputFormat::Logfmt,
        ..LogConfig::default()
    };
    let verbosity = config.install(sink(std::io::stdout()))?;
    let logger = vmodule_logger::new(&kv!["app", "demo"]);

    println!("1. No overrides: trace is hidden");
    p2p::dial(&logger, "enode://a");

    println!("\n2. vmodule=vmodule_overrides.rs=5: trace from this file is shown");
    verbosity.vmodule("vmodule_overrides.rs=5")?;
    let logger = vmodule_logger::new(&kv!["app", "demo"]);
    p2p::dial(&logger, "enode://b");

    println!("\n3. A malformed ruleset is rejected and the old one stays active");
    if let Err(e) = verbosity.vmodule("vmodule_overrides.rs=5,oops") {
        println!("   rejected: {}", e);
    }
    println!("   active rules: {:?}", verbosity.patterns());

    println!("\n4. Clearing the rules");
    verbosity.vmodule("")?;
    let logger = vmodule_logger::new(&kv!["app", "demo"]);
    p2p::dial(&logger, "enode://c");
    vmodule_logger::info("done", &kv!["resolutions", verbosity.site_resolutions()]);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
