//! Landmark geometry: reduces a face mesh to interpretable scalars.
//!
//! The mesh is the ordered 3-D point list produced by the external
//! landmark detector. Only two signals are derived from it: a
//! width-normalized mouth-open ratio and an eye-openness height.

use crate::constants::EYES_OPEN_SENTINEL;

/// Upper lip center
pub const TOP_LIP: usize = 13;
/// Lower lip center
pub const BOTTOM_LIP: usize = 14;
/// Left mouth corner, with a front-of-mesh fallback
pub const LEFT_CORNER: usize = 61;
pub const LEFT_CORNER_FALLBACK: usize = 0;
/// Right mouth corner, with a front-of-mesh fallback
pub const RIGHT_CORNER: usize = 291;
pub const RIGHT_CORNER_FALLBACK: usize = 16;

/// Left upper / lower eyelid centers
pub const LEFT_EYE_TOP: usize = 159;
pub const LEFT_EYE_BOTTOM: usize = 145;
/// Right upper / lower eyelid centers
pub const RIGHT_EYE_TOP: usize = 386;
pub const RIGHT_EYE_BOTTOM: usize = 374;

/// A single mesh landmark: x, y, z in detector units
pub type MeshPoint = [f64; 3];

/// Vertical lip separation divided by mouth corner-to-corner width.
///
/// Width-normalized so the ratio is resilient to the user's distance
/// from the camera. Returns `0.0` when the mesh is too short, required
/// points are missing, or the corner width is zero. Never panics.
#[must_use]
pub fn mouth_open_ratio(mesh: &[MeshPoint]) -> f64 {
    let (Some(top), Some(bottom)) = (mesh.get(TOP_LIP), mesh.get(BOTTOM_LIP)) else {
        return 0.0;
    };
    let Some(left) = mesh.get(LEFT_CORNER).or_else(|| mesh.get(LEFT_CORNER_FALLBACK)) else {
        return 0.0;
    };
    let Some(right) = mesh.get(RIGHT_CORNER).or_else(|| mesh.get(RIGHT_CORNER_FALLBACK)) else {
        return 0.0;
    };

    let mouth_height = (bottom[1] - top[1]).abs();
    let mouth_width = (right[0] - left[0]).abs();

    if mouth_width > 0.0 {
        mouth_height / mouth_width
    } else {
        0.0
    }
}

/// Average of the left and right eyelid vertical separations.
///
/// When eye landmarks are unavailable this returns the fully-open
/// sentinel: the system fails toward "eyes open / no blink" rather than
/// signaling blinks while detection is degraded.
#[must_use]
pub fn eye_openness(mesh: &[MeshPoint]) -> f64 {
    let points = (
        mesh.get(LEFT_EYE_TOP),
        mesh.get(LEFT_EYE_BOTTOM),
        mesh.get(RIGHT_EYE_TOP),
        mesh.get(RIGHT_EYE_BOTTOM),
    );
    match points {
        (Some(lt), Some(lb), Some(rt), Some(rb)) => {
            let left = (lb[1] - lt[1]).abs();
            let right = (rb[1] - rt[1]).abs();
            (left + right) / 2.0
        }
        _ => EYES_OPEN_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_with(points: &[(usize, MeshPoint)]) -> Vec<MeshPoint> {
        let size = points.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        let mut mesh = vec![[0.0; 3]; size];
        for (i, p) in points {
            mesh[*i] = *p;
        }
        mesh
    }

    #[test]
    fn test_mouth_ratio_normalized_by_width() {
        let mesh = mesh_with(&[
            (TOP_LIP, [20.0, 10.0, 0.0]),
            (BOTTOM_LIP, [20.0, 30.0, 0.0]),
            (LEFT_CORNER, [0.0, 20.0, 0.0]),
            (RIGHT_CORNER, [40.0, 20.0, 0.0]),
        ]);
        assert!((mouth_open_ratio(&mesh) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mouth_ratio_short_mesh_is_zero() {
        assert_eq!(mouth_open_ratio(&[]), 0.0);
        assert_eq!(mouth_open_ratio(&[[1.0, 2.0, 3.0]; 10]), 0.0);
    }

    #[test]
    fn test_mouth_ratio_zero_width_is_zero() {
        // All corners collapsed on one vertical line
        let mesh = mesh_with(&[
            (TOP_LIP, [5.0, 10.0, 0.0]),
            (BOTTOM_LIP, [5.0, 30.0, 0.0]),
            (LEFT_CORNER, [5.0, 20.0, 0.0]),
            (RIGHT_CORNER, [5.0, 20.0, 0.0]),
        ]);
        let ratio = mouth_open_ratio(&mesh);
        assert_eq!(ratio, 0.0);
        assert!(!ratio.is_nan());
    }

    #[test]
    fn test_mouth_ratio_uses_corner_fallbacks() {
        // Mesh long enough for lips and fallbacks but not index 291
        let mesh = mesh_with(&[
            (LEFT_CORNER_FALLBACK, [0.0, 20.0, 0.0]),
            (TOP_LIP, [10.0, 10.0, 0.0]),
            (BOTTOM_LIP, [10.0, 20.0, 0.0]),
            (RIGHT_CORNER_FALLBACK, [20.0, 20.0, 0.0]),
        ]);
        assert!((mouth_open_ratio(&mesh) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_eye_openness_averages_both_eyes() {
        let mesh = mesh_with(&[
            (LEFT_EYE_TOP, [10.0, 10.0, 0.0]),
            (LEFT_EYE_BOTTOM, [10.0, 18.0, 0.0]),
            (RIGHT_EYE_TOP, [30.0, 10.0, 0.0]),
            (RIGHT_EYE_BOTTOM, [30.0, 14.0, 0.0]),
        ]);
        assert!((eye_openness(&mesh) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_eye_openness_missing_landmarks_is_open() {
        assert_eq!(eye_openness(&[]), EYES_OPEN_SENTINEL);
        assert_eq!(eye_openness(&[[0.0; 3]; 200]), EYES_OPEN_SENTINEL);
    }
}
