//! Shared test utilities for MatchSync test suites
//!
//! This crate provides common testing utilities to eliminate code
//! duplication across test suites and ensure consistent fixtures.
//!
//! # Modules
//!
//! - [`fixtures`]: sample matchable entity types and the standard converter
//! - [`recording`]: interior-mutable logs for observing callback invocations
//! - [`logging`]: test logging configuration
//!
//! # Example
//!
//! ```rust
//! use match_sync_test_helpers::prelude::*;
//!
//! let source = vec![source_item("a", 1)];
//! let working = vec![working_item("a", 1)];
//! assert!(match_sync::is_match(&working, &source));
//! ```

pub mod fixtures;
pub mod logging;
pub mod recording;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::{
        ids, source_item, to_source, to_working, working_item, SourceItem, WorkingItem,
    };
    pub use crate::logging::{init_test_logging, suppress_logs};
    pub use crate::recording::CallLog;
}
