pub mod draw;
pub mod filter;
pub mod preprocessing;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use image::{DynamicImage, GrayImage};

use crate::cascade::{CascadeModel, Classifiers, DetectParams};
use crate::models::{FaceDetection, NestedObject, Rect};

/// Where intermediate images are written when debugging
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Outcome of one detection call
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Accepted faces in original-image coordinates, in drawing order
    pub faces: Vec<FaceDetection>,
    /// Candidates dropped by the aspect-ratio filter
    pub rejected: usize,
    /// The input image with every accepted face drawn on it
    pub annotated: DynamicImage,
    pub elapsed: Duration,
}

impl DetectionResult {
    /// Number of accepted faces, the figure that gets logged
    pub fn count(&self) -> usize {
        self.faces.len()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.faces.iter().map(|face| face.bbox).collect()
    }
}

/// Face detection and annotation for a single image
///
/// Detection runs on a grayscale working copy shrunk by `scale`; every
/// reported coordinate is mapped back to the original image.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    pub scale: f64,
    pub try_flip: bool,
    pub params: DetectParams,
    debug: Option<DebugConfig>,
}

impl DetectionPipeline {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            try_flip: false,
            params: DetectParams::default(),
            debug: None,
        }
    }

    /// Scales below 1 (and NaN) fall back to 1
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale >= 1.0 { scale } else { 1.0 };
        self
    }

    /// Also detect on the mirrored image
    pub fn with_try_flip(mut self, try_flip: bool) -> Self {
        self.try_flip = try_flip;
        self
    }

    pub fn with_params(mut self, params: DetectParams) -> Self {
        self.params = params;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Detect faces in `image` and draw them.
    ///
    /// `name` identifies the image in log lines and debug file names.
    pub fn detect(&self, name: &str, image: &DynamicImage, classifiers: &Classifiers) -> Result<DetectionResult> {
        let start = Instant::now();

        let gray = preprocessing::to_grayscale(image);
        let working = preprocessing::downscale(&gray, self.scale);
        let equalized = preprocessing::equalize(&working);
        if self.debug.is_some() {
            self.save_debug(1, "working", name, &DynamicImage::ImageLuma8(working))?;
            self.save_debug(2, "equalized", name, &DynamicImage::ImageLuma8(equalized.clone()))?;
        }

        let candidates = self.find_candidates(classifiers.primary.as_ref(), &equalized)?;
        let kept = filter::filter_faces(&candidates);
        tracing::debug!(
            "{}: {} candidates, {} kept after the aspect filter",
            name,
            candidates.len(),
            kept.len()
        );

        let mut annotated = image.to_rgb8();
        let mut faces = Vec::with_capacity(kept.len());
        for (index, rect) in kept.iter().enumerate() {
            let color = draw::palette_color(index);

            let nested = match &classifiers.nested {
                Some(model) => self.find_nested(model.as_ref(), &equalized, rect)?,
                None => Vec::new(),
            };

            let bbox = rect.scaled(self.scale);
            draw::draw_box(&mut annotated, &bbox, color);
            for object in &nested {
                draw::draw_circle(&mut annotated, object, color);
            }

            faces.push(FaceDetection {
                bbox,
                color_index: draw::palette_index(index),
                nested,
            });
        }

        let annotated = DynamicImage::ImageRgb8(annotated);
        self.save_debug(3, "annotated", name, &annotated)?;

        let elapsed = start.elapsed();
        tracing::info!(
            "{}: {} face(s), detection time = {:.1} ms",
            name,
            faces.len(),
            elapsed.as_secs_f64() * 1000.0
        );

        Ok(DetectionResult {
            rejected: candidates.len() - kept.len(),
            faces,
            annotated,
            elapsed,
        })
    }

    /// Primary pass, then the mirrored pass mapped back, in that order
    fn find_candidates(&self, model: &dyn CascadeModel, equalized: &GrayImage) -> Result<Vec<Rect>> {
        let mut candidates = model.detect(equalized, &self.params)?;

        if self.try_flip {
            let flipped = preprocessing::mirror(equalized);
            let mirrored = model.detect(&flipped, &self.params)?;
            candidates.extend(mirrored.iter().map(|rect| rect.mirrored(flipped.width())));
        }

        Ok(candidates)
    }

    /// Run the nested model inside one face of the working copy
    fn find_nested(&self, model: &dyn CascadeModel, equalized: &GrayImage, face: &Rect) -> Result<Vec<NestedObject>> {
        let Some(region) = face.clipped(equalized.width(), equalized.height()) else {
            return Ok(Vec::new());
        };

        let roi = image::imageops::crop_imm(
            equalized,
            region.x as u32,
            region.y as u32,
            region.width as u32,
            region.height as u32,
        )
        .to_image();

        let found = model.detect(&roi, &self.params)?;
        Ok(found
            .iter()
            .map(|rect| {
                let (center_x, center_y) = rect.translated(region.x, region.y).center();
                NestedObject {
                    center_x: (center_x * self.scale).round_ties_even() as i32,
                    center_y: (center_y * self.scale).round_ties_even() as i32,
                    radius: ((rect.width + rect.height) as f64 * 0.25 * self.scale).round_ties_even() as i32,
                }
            })
            .collect())
    }

    fn save_debug(&self, stage: usize, stage_name: &str, name: &str, image: &DynamicImage) -> Result<()> {
        let Some(debug_config) = &self.debug else {
            return Ok(());
        };
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        let stage_dir = debug_config.output_dir.join(format!("{:02}_{}", stage, stage_name));
        std::fs::create_dir_all(&stage_dir)?;
        let output_path = stage_dir.join(format!("{}.png", name));
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        tracing::debug!("saved {}", output_path.display());
        Ok(())
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
