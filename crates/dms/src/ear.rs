//! Eye Aspect Ratio (EAR) estimation
//!
//! EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)
//!
//! An open eye sits around 0.25-0.3 and drops towards 0 as the lids close.

use serde::{Deserialize, Serialize};

/// 2D landmark coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// Six contour points of one eye.
///
/// Order: outer corner, upper lid 1, upper lid 2, inner corner,
/// lower lid 1, lower lid 2. The formula indexes by position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks(pub [Point; 6]);

impl EyeLandmarks {
    pub const fn new(points: [Point; 6]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 6] {
        &self.0
    }

    /// Eye aspect ratio.
    ///
    /// 0.0 when the corners coincide or any coordinate is non-finite, so a
    /// bad measurement reads as closed rather than poisoning the history.
    pub fn aspect_ratio(&self) -> f32 {
        let [p0, p1, p2, p3, p4, p5] = self.0;

        let vertical_1 = p1.distance(p5);
        let vertical_2 = p2.distance(p4);
        let horizontal = p0.distance(p3);

        if !horizontal.is_normal() || !(vertical_1 + vertical_2).is_finite() {
            return 0.0;
        }

        let ear = (vertical_1 + vertical_2) / (2.0 * horizontal);
        if ear.is_finite() {
            ear
        } else {
            0.0
        }
    }

    /// Scale normalized [0, 1] coordinates to frame pixels
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self(self.0.map(|p| Point::new(p.x * w, p.y * h)))
    }

    /// Reflect every point across the vertical line `x = axis_x`
    pub fn mirrored(&self, axis_x: f32) -> Self {
        Self(self.0.map(|p| Point::new(2.0 * axis_x - p.x, p.y)))
    }
}

/// Free-function form of [`EyeLandmarks::aspect_ratio`]
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> f32 {
    eye.aspect_ratio()
}

/// Unweighted mean of the two per-eye ratios
pub fn combined_ear(left: f32, right: f32) -> f32 {
    (left + right) / 2.0
}

/// Per-eye and combined EAR for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarReading {
    pub left: f32,
    pub right: f32,
    pub combined: f32,
}

impl EarReading {
    /// Measure both eyes (pixel coordinates)
    pub fn measure(left: &EyeLandmarks, right: &EyeLandmarks) -> Self {
        let left = left.aspect_ratio();
        let right = right.aspect_ratio();
        Self {
            left,
            right,
            combined: combined_ear(left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Eye 40px wide with lids `gap` px apart
    fn eye_with_gap(gap: f32) -> EyeLandmarks {
        let half = gap / 2.0;
        EyeLandmarks::new([
            Point::new(100.0, 50.0),
            Point::new(113.0, 50.0 - half),
            Point::new(127.0, 50.0 - half),
            Point::new(140.0, 50.0),
            Point::new(127.0, 50.0 + half),
            Point::new(113.0, 50.0 + half),
        ])
    }

    #[test]
    fn test_open_eye() {
        // Vertical gaps are half the horizontal span
        let ear = eye_with_gap(20.0).aspect_ratio();
        assert!((ear - 0.5).abs() < 1e-6, "ear = {ear}");
    }

    #[test]
    fn test_closed_eye() {
        let ear = eye_with_gap(0.0).aspect_ratio();
        assert_eq!(ear, 0.0);
    }

    #[test]
    fn test_zero_width_eye_is_zero() {
        let p = Point::new(3.0, 4.0);
        let eye = EyeLandmarks::new([
            p,
            Point::new(3.0, 1.0),
            Point::new(3.0, 2.0),
            p,
            Point::new(3.0, 8.0),
            Point::new(3.0, 9.0),
        ]);
        assert_eq!(eye.aspect_ratio(), 0.0);
        assert_eq!(eye_aspect_ratio(&EyeLandmarks::new([Point::default(); 6])), 0.0);
    }

    #[test]
    fn test_non_finite_coordinates_are_zero() {
        let mut nan_corner = eye_with_gap(20.0);
        nan_corner.0[0] = Point::new(f32::NAN, 50.0);
        assert_eq!(nan_corner.aspect_ratio(), 0.0);

        let mut nan_lid = eye_with_gap(20.0);
        nan_lid.0[1] = Point::new(113.0, f32::NAN);
        assert_eq!(nan_lid.aspect_ratio(), 0.0);

        let mut far_lid = eye_with_gap(20.0);
        far_lid.0[5] = Point::new(113.0, f32::INFINITY);
        assert_eq!(far_lid.aspect_ratio(), 0.0);

        let all_nan = EyeLandmarks::new([Point::new(f32::NAN, 0.5); 6]);
        assert_eq!(all_nan.aspect_ratio(), 0.0);
    }

    #[test]
    fn test_scaling_uses_frame_axes() {
        let eye = EyeLandmarks::new([
            Point::new(0.25, 0.5),
            Point::new(0.3, 0.45),
            Point::new(0.35, 0.45),
            Point::new(0.4, 0.5),
            Point::new(0.35, 0.55),
            Point::new(0.3, 0.55),
        ]);
        let px = eye.scaled(640, 480);
        assert_eq!(px.points()[0], Point::new(160.0, 240.0));
        assert_eq!(px.points()[3], Point::new(256.0, 240.0));

        // Non-square frames change the ratio, so scaling must precede EAR
        assert!((px.aspect_ratio() - eye.aspect_ratio()).abs() > 1e-3);
    }

    #[test]
    fn test_reading_averages_eyes() {
        let reading = EarReading::measure(&eye_with_gap(20.0), &eye_with_gap(0.0));
        assert!((reading.left - 0.5).abs() < 1e-6);
        assert_eq!(reading.right, 0.0);
        assert!((reading.combined - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_mirror_about_origin_is_exact() {
        let eye = eye_with_gap(12.0);
        assert_eq!(eye.mirrored(0.0).aspect_ratio(), eye.aspect_ratio());
    }

    fn point() -> impl Strategy<Value = Point> {
        (0.0f32..640.0, 0.0f32..480.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_mirror_symmetry(
            points in proptest::array::uniform6(point()),
            axis in 0.0f32..640.0,
        ) {
            let [p0, p1, p2, p3, p4, p5] = points;
            prop_assume!(p0.distance(p3) >= 10.0);
            prop_assume!(p1.distance(p5) + p2.distance(p4) >= 10.0);

            let eye = EyeLandmarks::new(points);
            let a = eye.aspect_ratio();
            let b = eye.mirrored(axis).aspect_ratio();
            prop_assert!((a - b).abs() <= 1e-4 * a, "{} vs {}", a, b);
        }

        #[test]
        fn prop_non_negative_and_finite(points in proptest::array::uniform6(point())) {
            let ear = EyeLandmarks::new(points).aspect_ratio();
            prop_assert!(ear >= 0.0);
            prop_assert!(ear.is_finite());
        }
    }
}
