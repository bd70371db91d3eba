//! Basic logger usage example
//!
//! Demonstrates leveled JSON logging to stdout, reference IDs and error detail.
//!
//! Run with: cargo run --example basic_usage

use chrono::{FixedOffset, TimeZone};
use leveled_logger::prelude::*;
use leveled_logger::{infof, trace_error};

fn load_profile(id: u32) -> std::result::Result<(), TracedError> {
    Err(trace_error!(std::io::Error::other(format!("profile {} not found", id))))
}

fn main() -> Result<()> {
    let mut logger = Logger::new()?;

    // Pin the clock so the output is reproducible
    let fixed = FixedOffset::west_opt(3 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(2021, 5, 21, 6, 0, 0).single())
        .ok_or_else(|| LoggerError::other("invalid demo timestamp"))?;
    logger.set_timestamp_func(move || fixed);

    println!("1. Default level is INFO:");
    logger.info("Log this!");
    logger.dbg("Debug message (hidden)");

    println!("\n2. Formatted messages:");
    infof!(logger, "Server listening on port {}", 8080);

    println!("\n3. Request-scoped logger with error detail:");
    let request = logger.with_ref_id("ad7ec2d7-d92d-4d02-a937-e0c477611ffd");
    if let Err(err) = load_profile(7) {
        request.error(Some(&err), "This is an error log!");
    }

    println!("\n4. Raising the threshold to TRACE:");
    logger.set_log_level("trace")?;
    logger.qry("SELECT 1");
    logger.trace("Everything is visible now");

    logger.flush()?;
    Ok(())
}
