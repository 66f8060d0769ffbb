use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use image::{DynamicImage, GrayImage, ImageFormat};
use opencv::core::{Mat, Rect as CvRect, Size, Vector};
use opencv::imgcodecs;
use opencv::objdetect::{CASCADE_SCALE_IMAGE, CascadeClassifier};
use opencv::prelude::*;

use super::{CascadeModel, DetectParams, LoadError, model_name};
use crate::models::Rect;

/// Haar or LBP cascade loaded through OpenCV's `CascadeClassifier`.
///
/// `detect_multi_scale` needs `&mut self`, hence the mutex.
pub struct HaarCascade {
    name: String,
    classifier: Mutex<CascadeClassifier>,
}

impl HaarCascade {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let backend_error = |reason: String| LoadError::Backend {
            path: path.to_path_buf(),
            reason,
        };

        let filename = path
            .to_str()
            .ok_or_else(|| backend_error("path is not valid UTF-8".to_string()))?;
        let classifier = CascadeClassifier::new(filename).map_err(|e| backend_error(e.to_string()))?;
        // a file OpenCV cannot parse still yields a classifier, just an empty one
        if classifier.empty().map_err(|e| backend_error(e.to_string()))? {
            return Err(backend_error("not a cascade classifier".to_string()));
        }

        Ok(Self {
            name: model_name(path),
            classifier: Mutex::new(classifier),
        })
    }
}

impl CascadeModel for HaarCascade {
    fn detect(&self, image: &GrayImage, params: &DetectParams) -> anyhow::Result<Vec<Rect>> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(Vec::new());
        }

        let mat = to_mat(&DynamicImage::ImageLuma8(image.clone()), imgcodecs::IMREAD_GRAYSCALE)?;
        let flags = if params.scale_image { CASCADE_SCALE_IMAGE } else { 0 };
        let mut found = Vector::<CvRect>::new();

        self.classifier
            .lock()
            .map_err(|_| anyhow!("classifier {} is poisoned", self.name))?
            .detect_multi_scale(
                &mat,
                &mut found,
                params.scale_factor,
                params.min_neighbors,
                flags,
                Size::new(params.min_size.0 as i32, params.min_size.1 as i32),
                Size::default(),
            )
            .with_context(|| format!("{} failed to run", self.name))?;

        Ok(found
            .iter()
            .map(|r| Rect::new(r.x, r.y, r.width, r.height))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Hand an image to OpenCV through an in-memory PNG.
pub(crate) fn to_mat(image: &DynamicImage, flags: i32) -> anyhow::Result<Mat> {
    let mut encoded = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .context("Failed to encode image for OpenCV")?;
    let mat = imgcodecs::imdecode(&Vector::<u8>::from_slice(&encoded), flags)
        .context("OpenCV could not decode the image")?;
    Ok(mat)
}
