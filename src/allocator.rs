//! Global memory allocator configuration.
//!
//! The search loop allocates and frees one payload per stage per parameter
//! tuple across many threads; `mimalloc` keeps that churn cheap by
//! minimizing lock contention compared to the system allocator.

use mimalloc::MiMalloc;

/// The global allocator instance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
