use std::path::{Path, PathBuf};

use facephoto::{CascadeModel, Classifiers, DetectParams, Rect, Viewer};
use image::{DynamicImage, GrayImage, ImageBuffer, Rgb};

/// Writes a 120x100 gray test image to `path`.
pub fn write_test_image(path: &Path) {
    let img = ImageBuffer::from_fn(120, 100, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128u8]));
    img.save_with_format(path, image::ImageFormat::Png)
        .expect("Failed to save test image");
}

/// Creates an input folder holding `count` images named `photo_<i>.png`.
/// The folder is removed when the returned TempDir drops.
pub fn create_image_dir(count: usize) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    for i in 0..count {
        write_test_image(&dir.path().join(format!("photo_{}.png", i)));
    }
    dir
}

/// Cascade that reports the same rectangles for every image
pub struct FakeCascade {
    pub rects: Vec<Rect>,
}

impl CascadeModel for FakeCascade {
    fn detect(&self, _image: &GrayImage, _params: &DetectParams) -> anyhow::Result<Vec<Rect>> {
        Ok(self.rects.clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// One face-shaped and one wide detection: exactly one survives the filter
pub fn one_face_one_wide() -> Vec<Rect> {
    vec![Rect::new(10, 10, 40, 40), Rect::new(50, 50, 60, 20)]
}

pub fn fake_classifiers(rects: Vec<Rect>, nested: Option<Vec<Rect>>) -> Classifiers {
    Classifiers::new(
        Box::new(FakeCascade { rects }),
        nested.map(|rects| Box::new(FakeCascade { rects }) as Box<dyn CascadeModel>),
    )
}

/// Remembers what would have been displayed
#[derive(Default)]
pub struct RecordingViewer {
    pub shown: Vec<String>,
    pub closed: usize,
}

impl Viewer for RecordingViewer {
    fn show(&mut self, name: &str, _image: &DynamicImage) -> anyhow::Result<()> {
        self.shown.push(name.to_string());
        Ok(())
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.closed += 1;
        Ok(())
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn stats_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("statistics.txt")
}
