use crate::models::Rect;

/// Bounds on width / height for a detection to count as a face, both exclusive
pub const MIN_ASPECT_RATIO: f64 = 0.75;
pub const MAX_ASPECT_RATIO: f64 = 1.3;

pub fn is_face_shaped(rect: &Rect) -> bool {
    let aspect = rect.aspect_ratio();
    MIN_ASPECT_RATIO < aspect && aspect < MAX_ASPECT_RATIO
}

/// Keep near-square detections, preserving their order
pub fn filter_faces(candidates: &[Rect]) -> Vec<Rect> {
    candidates
        .iter()
        .filter(|rect| !rect.is_empty() && is_face_shaped(rect))
        .copied()
        .collect()
}
