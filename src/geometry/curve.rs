use glam::Vec3;

/// Sample a quadratic Bezier curve at `divisions + 1` evenly spaced
/// parameter values, endpoints included.
#[must_use]
pub fn quadratic_bezier(
    start: Vec3,
    control: Vec3,
    end: Vec3,
    divisions: u32,
) -> Vec<Vec3> {
    let divisions = divisions.max(1);
    (0..=divisions)
        .map(|i| {
            let t = i as f32 / divisions as f32;
            let omt = 1.0 - t;
            start * (omt * omt) + control * (2.0 * omt * t) + end * (t * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let a = Vec3::new(0.0, 9.0, 0.0);
        let b = Vec3::new(3.0, 11.0, 0.0);
        let c = Vec3::new(6.0, 6.0, 0.0);
        let pts = quadratic_bezier(a, b, c, 10);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], a);
        assert_eq!(pts[10], c);
    }

    #[test]
    fn midpoint_blends_control() {
        let pts = quadratic_bezier(Vec3::ZERO, Vec3::Y * 4.0, Vec3::X * 2.0, 2);
        // B(0.5) = 0.5·P1 + 0.25·P2
        assert!((pts[1] - Vec3::new(0.5, 2.0, 0.0)).length() < 1e-6);
    }
}
