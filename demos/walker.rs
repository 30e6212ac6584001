//! # Example: walker
//!
//! A filesystem walker feeding two independent workers through one [`CastLog`].
//!
//! Demonstrates how to:
//! - Share a log between a producer thread and consumer threads.
//! - Give every worker the full sequence (multicast, not work-splitting).
//! - End every worker by calling `complete_adding`.
//!
//! ## Flow
//! ```text
//! walker thread ── add(path) ──► CastLog ──► counter  (counts files)
//!               └─ complete_adding()     └─► sizer    (sums file sizes)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=castlog=debug cargo run --example walker -- src
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use castlog::{CastLog, LogConfig};
use tracing_subscriber::EnvFilter;

fn walk(dir: &Path, log: &CastLog<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, log)?;
        } else {
            log.add(path);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let root = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let log = CastLog::with_config(LogConfig::named("walker"));

    // 1. Start workers before the walk so they observe it while it grows.
    let counter = {
        let files = log.consume();
        thread::Builder::new()
            .name("counter".into())
            .spawn(move || files.count())?
    };
    let sizer = {
        let files = log.consume();
        thread::Builder::new().name("sizer".into()).spawn(move || {
            files
                .filter_map(|path| fs::metadata(&path).ok())
                .map(|meta| meta.len())
                .sum::<u64>()
        })?
    };

    // 2. Walk on a producer thread; always complete, even if the walk fails.
    let producer = {
        let log = log.clone();
        thread::Builder::new().name("walker".into()).spawn(move || {
            let res = walk(&root, &log);
            log.complete_adding();
            res
        })?
    };

    producer.join().map_err(|_| "walker thread panicked")??;
    let files = counter.join().map_err(|_| "counter thread panicked")?;
    let bytes = sizer.join().map_err(|_| "sizer thread panicked")?;

    println!("files: {files}");
    println!("bytes: {bytes}");
    println!("late snapshot agrees: {}", log.completed_items().len() == files);
    Ok(())
}
