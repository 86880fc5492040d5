/// File utilities
pub mod files;

/// Summary statistics over slices of values
pub mod stats;

/// Utilities for classification tasks
pub mod classes;
