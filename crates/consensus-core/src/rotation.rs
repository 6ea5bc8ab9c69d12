use nalgebra::{Point2, Rotation2};

/// Rotation that maps a line with the given slope (degrees) onto the x axis.
pub fn rotation_for_slope(slope_deg: f64) -> Rotation2<f64> {
    Rotation2::new(-slope_deg.to_radians())
}

/// Rotate `points` by `angle_deg` about the origin, returning new points.
///
/// Uses the standard counter-clockwise matrix `[[c, -s], [s, c]]`; in image
/// coordinates (y down) this turns clockwise on screen.
pub fn rotate_points(points: &[Point2<f64>], angle_deg: f64) -> Vec<Point2<f64>> {
    let rot = Rotation2::new(angle_deg.to_radians());
    points.iter().map(|p| rot * p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_restores_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(120.5, -3.25),
            Point2::new(-40.0, 900.0),
            Point2::new(1e4, 1e4),
        ];
        for theta in (0..360).step_by(15).map(f64::from).chain([359.999, 0.001]) {
            let back = rotate_points(&rotate_points(&points, -theta), theta);
            for (a, b) in points.iter().zip(&back) {
                assert_relative_eq!(*a, *b, epsilon = 1e-9, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn slope_rotation_flattens_line() {
        let slope = 30.0f64;
        let (s, c) = slope.to_radians().sin_cos();
        let on_line: Vec<Point2<f64>> = (0..5)
            .map(|k| Point2::new(10.0 + c * k as f64 * 50.0, 20.0 + s * k as f64 * 50.0))
            .collect();
        let rot = rotation_for_slope(slope);
        let flat: Vec<Point2<f64>> = on_line.iter().map(|p| rot * p).collect();
        for p in &flat[1..] {
            assert_relative_eq!(p.y, flat[0].y, epsilon = 1e-9);
        }
        assert!(flat.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn quarter_turn() {
        let rotated = rotate_points(&[Point2::new(1.0, 0.0)], 90.0);
        assert_relative_eq!(rotated[0], Point2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn input_is_untouched() {
        let points = vec![Point2::new(3.0, 4.0)];
        let _ = rotate_points(&points, 45.0);
        assert_eq!(points[0], Point2::new(3.0, 4.0));
    }
}
