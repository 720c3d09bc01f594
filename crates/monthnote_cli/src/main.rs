//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `monthnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("monthnote_core ping={}", monthnote_core::ping());
    println!("monthnote_core version={}", monthnote_core::core_version());
}
