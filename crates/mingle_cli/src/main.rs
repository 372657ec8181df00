//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mingle_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("mingle_core version={}", mingle_core::core_version());
}
