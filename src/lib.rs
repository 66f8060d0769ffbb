pub mod cascade;
pub mod detection;
pub mod models;
pub mod session;
pub mod shell;
pub mod source;
pub mod stats;
pub mod viewer;

pub use cascade::{CascadeModel, Classifiers, DetectParams, LoadError};
pub use detection::{DetectionPipeline, DetectionResult};
pub use models::{FaceDetection, LogEntry, NestedObject, Rect};
pub use session::{RunSummary, Session};
pub use shell::{LaunchAction, MenuChoice, Shell, ShellState};
pub use source::ImageSet;
pub use stats::ResultLogger;
pub use viewer::{SnapshotViewer, Viewer};
