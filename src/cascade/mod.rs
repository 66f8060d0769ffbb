pub mod seeta;
#[cfg(feature = "opencv")]
pub mod haar;

use std::path::{Path, PathBuf};

use image::GrayImage;
use thiserror::Error;

use crate::models::Rect;

/// Directory searched for model files that are not found at the given path.
pub const DATA_DIR_ENV: &str = "FACEPHOTO_DATA";

#[cfg(feature = "opencv")]
pub const DEFAULT_CASCADE: &str = "data/haarcascades/haarcascade_frontalface_alt.xml";
#[cfg(not(feature = "opencv"))]
pub const DEFAULT_CASCADE: &str = "data/seeta_fd_frontal_v1.0.bin";

pub const DEFAULT_NESTED_CASCADE: &str = "data/haarcascades/haarcascade_eye_tree_eyeglasses.xml";

/// Multi-scale search settings handed to every backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectParams {
    /// Ratio between two consecutive pyramid levels
    pub scale_factor: f64,
    /// Overlapping hits a candidate needs to be kept (OpenCV backend only)
    pub min_neighbors: i32,
    /// Smallest object reported, (width, height)
    pub min_size: (u32, u32),
    /// Scale the image instead of the detector windows
    pub scale_image: bool,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 2,
            min_size: (30, 30),
            scale_image: true,
        }
    }
}

/// A loaded cascade model. Read-only once loaded.
pub trait CascadeModel {
    /// Find objects in a grayscale image; rectangles are in `image` coordinates.
    fn detect(&self, image: &GrayImage, params: &DetectParams) -> anyhow::Result<Vec<Rect>>;

    /// Human-readable name for this model (used in log output)
    fn name(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("classifier file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{} is an OpenCV cascade but this build has no OpenCV support (rebuild with `--features opencv`)", .0.display())]
    Unsupported(PathBuf),

    #[error("failed to load classifier from {}: {reason}", .path.display())]
    Backend { path: PathBuf, reason: String },
}

/// Find a model file, falling back to `$FACEPHOTO_DATA/<path>` and `$FACEPHOTO_DATA/<file name>`.
pub fn resolve_path(path: &Path) -> Option<PathBuf> {
    let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    resolve_in(path, data_dir.as_deref())
}

fn resolve_in(path: &Path, data_dir: Option<&Path>) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let data_dir = data_dir?;
    let nested = data_dir.join(path);
    if nested.is_file() {
        return Some(nested);
    }
    let flat = data_dir.join(path.file_name()?);
    flat.is_file().then_some(flat)
}

fn is_opencv_cascade(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// Load one model, picking the backend from the file type.
pub fn load_model(path: &Path) -> Result<Box<dyn CascadeModel>, LoadError> {
    let resolved = resolve_path(path).ok_or_else(|| LoadError::NotFound(path.to_path_buf()))?;

    if is_opencv_cascade(&resolved) {
        return load_opencv(&resolved);
    }

    Ok(Box::new(seeta::SeetaCascade::load(&resolved)?))
}

#[cfg(feature = "opencv")]
fn load_opencv(path: &Path) -> Result<Box<dyn CascadeModel>, LoadError> {
    Ok(Box::new(haar::HaarCascade::load(path)?))
}

#[cfg(not(feature = "opencv"))]
fn load_opencv(path: &Path) -> Result<Box<dyn CascadeModel>, LoadError> {
    Err(LoadError::Unsupported(path.to_path_buf()))
}

/// Load the optional nested model. Failure only costs the nested detections.
pub fn load_nested(path: Option<&Path>) -> Option<Box<dyn CascadeModel>> {
    let path = path?;
    match load_model(path) {
        Ok(model) => {
            tracing::info!("nested classifier loaded: {}", model.name());
            Some(model)
        }
        Err(error) => {
            tracing::warn!("could not load classifier cascade for nested objects: {}", error);
            None
        }
    }
}

/// The primary model and the optional nested one, shared by every detection call
pub struct Classifiers {
    pub primary: Box<dyn CascadeModel>,
    pub nested: Option<Box<dyn CascadeModel>>,
}

impl Classifiers {
    pub fn new(primary: Box<dyn CascadeModel>, nested: Option<Box<dyn CascadeModel>>) -> Self {
        Self { primary, nested }
    }

    /// Load both models, nested first. Only a primary failure is an error.
    pub fn load(primary: &Path, nested: Option<&Path>) -> Result<Self, LoadError> {
        let nested = load_nested(nested);
        let primary = load_model(primary)?;
        tracing::info!("classifier loaded: {}", primary.name());
        Ok(Self { primary, nested })
    }

    pub fn has_nested(&self) -> bool {
        self.nested.is_some()
    }
}

pub(crate) fn model_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
