use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::GrayImage;

use super::{CascadeModel, DetectParams, LoadError, model_name};
use crate::models::Rect;

/// rustface rejects smaller windows
const MIN_WINDOW: u32 = 20;
const SCORE_THRESHOLD: f64 = 2.0;
const WINDOW_STEP: u32 = 4;

/// Face detector backed by the `rustface` crate (SeetaFace funnel cascade).
///
/// The parsed model is kept and a fresh detector is built for every call, so
/// detection only needs `&self`.
pub struct SeetaCascade {
    name: String,
    model: rustface::Model,
}

impl SeetaCascade {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let backend_error = |reason: String| LoadError::Backend {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| backend_error(e.to_string()))?;
        let model = rustface::read_model(BufReader::new(file)).map_err(|e| backend_error(e.to_string()))?;

        Ok(Self {
            name: model_name(path),
            model,
        })
    }
}

impl CascadeModel for SeetaCascade {
    fn detect(&self, image: &GrayImage, params: &DetectParams) -> anyhow::Result<Vec<Rect>> {
        let (width, height) = image.dimensions();
        let (min_width, min_height) = params.min_size;
        if width < min_width.max(MIN_WINDOW) || height < min_height.max(MIN_WINDOW) {
            return Ok(Vec::new());
        }

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(min_width.min(min_height).max(MIN_WINDOW));
        detector.set_score_thresh(SCORE_THRESHOLD);
        // rustface shrinks by this factor per pyramid level
        detector.set_pyramid_scale_factor((1.0 / params.scale_factor.max(1.01)) as f32);
        detector.set_slide_window_step(WINDOW_STEP, WINDOW_STEP);

        let faces = detector.detect(&rustface::ImageData::new(image.as_raw(), width, height));

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Rect::new(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32)
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
