use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use image::DynamicImage;

pub const WINDOW_TITLE: &str = "FacePhoto";

/// How long each annotated image stays on screen unless a key is pressed
pub const DISPLAY_TIMEOUT: Duration = Duration::from_secs(3);

pub const DEFAULT_OUTPUT_DIR: &str = "detected";

/// Presents annotated images to the user
pub trait Viewer {
    fn show(&mut self, name: &str, image: &DynamicImage) -> Result<()>;

    /// Called once after the last image of a launch
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes every annotated image to a folder as `<name>.png`
pub struct SnapshotViewer {
    output_dir: PathBuf,
}

impl SnapshotViewer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Viewer for SnapshotViewer {
    fn show(&mut self, name: &str, image: &DynamicImage) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{}.png", name));
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        tracing::info!("annotated image written to {}", output_path.display());
        Ok(())
    }
}

/// OpenCV window; each image blocks until a key press or the timeout
#[cfg(feature = "opencv")]
pub struct WindowViewer {
    title: String,
    timeout: Duration,
    open: bool,
}

#[cfg(feature = "opencv")]
impl WindowViewer {
    pub fn new() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            timeout: DISPLAY_TIMEOUT,
            open: false,
        }
    }
}

#[cfg(feature = "opencv")]
impl Default for WindowViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "opencv")]
impl Viewer for WindowViewer {
    fn show(&mut self, _name: &str, image: &DynamicImage) -> Result<()> {
        use opencv::{highgui, imgcodecs};

        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }

        let frame = crate::cascade::haar::to_mat(image, imgcodecs::IMREAD_COLOR)?;
        highgui::imshow(&self.title, &frame)?;
        self.open = true;
        highgui::wait_key(self.timeout.as_millis() as i32)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.open {
            opencv::highgui::destroy_window(&self.title)?;
            self.open = false;
        }
        Ok(())
    }
}
