#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from facephoto for tests
pub use facephoto::{
    Classifiers, DetectionPipeline, ImageSet, LogEntry, Rect, ResultLogger, RunSummary, Session, Shell,
    ShellState,
};
