//! Build script for FoodCalc
//!
//! Stamps the binary with a build number and a UTC build time. The number
//! lives in `build_number.txt` and goes up by one whenever `src/` changes;
//! setting `FOODCALC_BUILD_NUMBER` pins it instead (release builds).

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=FOODCALC_BUILD_NUMBER");

    let build_number = match std::env::var("FOODCALC_BUILD_NUMBER") {
        Ok(pinned) => pinned.trim().parse().unwrap_or(0),
        Err(_) => bump_counter(Path::new(COUNTER_FILE)),
    };
    let built_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    println!("cargo:rustc-env=FOODCALC_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=FOODCALC_BUILD_TIMESTAMP={}", built_at);
}

/// Read, increment, and store the counter; a missing or garbled file restarts at 1
fn bump_counter(path: &Path) -> u64 {
    let previous: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = previous + 1;

    // Read-only checkouts still build, just without a persistent counter
    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=could not update {}: {}", path.display(), e);
    }
    next
}
