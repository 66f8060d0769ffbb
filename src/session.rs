use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, ImageReader};

use crate::cascade::Classifiers;
use crate::detection::DetectionPipeline;
use crate::models::LogEntry;
use crate::shell::LaunchAction;
use crate::source::ImageSet;
use crate::stats::ResultLogger;
use crate::viewer::Viewer;

/// Totals for one pass over the input folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: Vec<LogEntry>,
    /// Images that could not be decoded or failed detection
    pub failed: usize,
}

impl RunSummary {
    pub fn images(&self) -> usize {
        self.entries.len()
    }

    pub fn faces(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

/// Everything a launch needs, loaded once for the process lifetime
pub struct Session<V: Viewer> {
    classifiers: Classifiers,
    pipeline: DetectionPipeline,
    logger: ResultLogger,
    viewer: V,
    input_dir: PathBuf,
}

impl<V: Viewer> Session<V> {
    pub fn new(
        classifiers: Classifiers,
        pipeline: DetectionPipeline,
        logger: ResultLogger,
        viewer: V,
        input_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            classifiers,
            pipeline,
            logger,
            viewer,
            input_dir: input_dir.into(),
        }
    }

    /// Scan the input folder and process every image in it
    pub fn run_once(&mut self) -> Result<RunSummary> {
        let images = ImageSet::scan(&self.input_dir)?;
        tracing::info!("{} image(s) in {}", images.len(), self.input_dir.display());

        let result = self.process_all(&images);
        self.viewer.close()?;
        result
    }

    fn process_all(&mut self, images: &ImageSet) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for path in images {
            let (entry, ok) = self.process(path)?;
            if !ok {
                summary.failed += 1;
            }
            summary.entries.push(entry);
        }
        Ok(summary)
    }

    /// Detect, log, then show one image. Unreadable images count zero faces.
    fn process(&mut self, path: &Path) -> Result<(LogEntry, bool)> {
        let name = display_name(path);

        let detection = load_image(path).and_then(|image| self.pipeline.detect(&name, &image, &self.classifiers));
        let (count, annotated) = match detection {
            Ok(result) => (Some(result.count()), Some(result.annotated)),
            Err(error) => {
                tracing::warn!("{}: {:#}", path.display(), error);
                (None, None)
            }
        };

        let entry = LogEntry::new(path, count.unwrap_or(0));
        self.logger.append(&entry)?;

        if let Some(annotated) = annotated {
            self.viewer.show(&name, &annotated)?;
        }

        Ok((entry, count.is_some()))
    }
}

impl<V: Viewer> LaunchAction for Session<V> {
    fn launch(&mut self) -> Result<()> {
        let summary = self.run_once()?;
        tracing::info!(
            "processed {} image(s), {} face(s), {} failed, statistics in {}",
            summary.images(),
            summary.faces(),
            summary.failed,
            self.logger.path().display()
        );
        Ok(())
    }
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    Ok(image)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
