use crate::math::{point::Point, vector::Vector};

use super::shape::SurfaceHit;

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Self {
        assert!(radius > 0., "sphere radius must be positive, got {radius}");
        Self { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Entry and exit distances along the ray line, `t0 <= t1`.
    /// Either may be negative when the sphere lies (partly) behind the origin.
    pub fn intersection_distances(&self, origin: Point, direction: Vector) -> Option<(f64, f64)> {
        let l = self.center - origin;
        let tca = l.dot(direction);

        // distance from the center to the ray line
        let d2 = (l.dot(l) - tca * tca).max(0.);
        let d = d2.sqrt();
        if d > self.radius {
            return None;
        }

        let thc = (self.radius * self.radius - d2).max(0.).sqrt();
        Some((tca - thc, tca + thc))
    }

    pub fn intersect(&self, origin: Point, direction: Vector) -> Option<SurfaceHit> {
        let (t0, t1) = self.intersection_distances(origin, direction)?;

        let distance = if t0 < 0. { t1 } else { t0 };
        if distance < 0. {
            return None;
        }

        let point = origin + direction * distance;
        let normal = (point - self.center).normalize();

        Some(SurfaceHit {
            point,
            normal,
            distance,
            tex_coords: normal.spherical_uv(),
        })
    }
}
