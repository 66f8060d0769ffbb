use std::fmt;
use std::path::PathBuf;

/// Axis-aligned rectangle in pixel coordinates.
///
/// Signed like the rectangles detection backends report: a window near the
/// border may start at a negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Mirror the rectangle inside an image of width `image_width`.
    pub fn mirrored(&self, image_width: u32) -> Self {
        Self {
            x: image_width as i32 - self.x - self.width,
            ..*self
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Map a rectangle from the working copy back to the original image.
    ///
    /// Both corners are scaled and rounded separately, so the far edge lands on
    /// `round((x + width - 1) * scale)`, with ties going to the even neighbour.
    pub fn scaled(&self, scale: f64) -> Self {
        let x0 = (self.x as f64 * scale).round_ties_even() as i32;
        let y0 = (self.y as f64 * scale).round_ties_even() as i32;
        let x1 = ((self.x + self.width - 1) as f64 * scale).round_ties_even() as i32;
        let y1 = ((self.y + self.height - 1) as f64 * scale).round_ties_even() as i32;
        Self {
            x: x0,
            y: y0,
            width: x1 - x0 + 1,
            height: y1 - y0 + 1,
        }
    }

    /// Intersection with the `width` x `height` image, `None` if nothing is left.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        let clipped = Self::new(x0, y0, x1 - x0, y1 - y0);
        if clipped.is_empty() { None } else { Some(clipped) }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 * 0.5,
            self.y as f64 + self.height as f64 * 0.5,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{} from ({}, {})]", self.width, self.height, self.x, self.y)
    }
}

/// A nested object found inside a face, kept as a circle like the annotation draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedObject {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

/// One accepted face, in original-image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDetection {
    pub bbox: Rect,
    /// Index into the annotation palette
    pub color_index: usize,
    pub nested: Vec<NestedObject>,
}

/// Line appended to the statistics log for one processed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub path: PathBuf,
    pub count: usize,
}

impl LogEntry {
    pub const LABEL: &'static str = "number of faces found ->";

    pub fn new(path: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            path: path.into(),
            count,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.path.display(), Self::LABEL, self.count)
    }
}
