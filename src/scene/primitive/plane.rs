use crate::math::{approx_eq::EPSILON, point::Point, tuple::Tuple, vector::Vector};

use super::shape::SurfaceHit;

/// Infinite plane through `point`, oriented by `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point,
    normal: Vector,
    tangent: Vector,
    bitangent: Vector,
}

impl Plane {
    pub fn new(point: Point, normal: Vector) -> Self {
        assert!(normal.magnitude() > 0., "plane normal must be non-zero");
        let normal = normal.normalize();

        let helper = if normal.x().abs() > 0.9 {
            Vector::new(0., 1., 0.)
        } else {
            Vector::new(1., 0., 0.)
        };
        let tangent = normal.cross(helper).normalize();
        let bitangent = normal.cross(tangent);

        Self {
            point,
            normal,
            tangent,
            bitangent,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn intersect(&self, origin: Point, direction: Vector) -> Option<SurfaceHit> {
        let denom = self.normal.dot(direction);
        if denom.abs() < EPSILON {
            return None;
        }

        let distance = (self.point - origin).dot(self.normal) / denom;
        if distance < 0. {
            return None;
        }

        let point = origin + direction * distance;
        // both sides are visible
        let normal = if denom > 0. { -self.normal } else { self.normal };

        let offset = point - self.point;
        let tex_coords = (
            offset.dot(self.tangent).rem_euclid(1.),
            offset.dot(self.bitangent).rem_euclid(1.),
        );

        Some(SurfaceHit {
            point,
            normal,
            distance,
            tex_coords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq_low_prec;

    fn floor() -> Plane {
        Plane::new(Point::new(0., -1., 0.), Vector::new(0., 1., 0.))
    }

    #[test]
    fn ray_intersecting_plane_from_above() {
        let hit = floor()
            .intersect(Point::new(0., 1., 0.), Vector::new(0., -1., 0.))
            .unwrap();

        assert_approx_eq_low_prec!(hit.distance, 2.);
        assert_approx_eq_low_prec!(hit.point, Point::new(0., -1., 0.));
        assert_approx_eq_low_prec!(hit.normal, Vector::new(0., 1., 0.));
    }

    #[test]
    fn ray_intersecting_plane_from_below_sees_flipped_normal() {
        let hit = floor()
            .intersect(Point::new(0., -3., 0.), Vector::new(0., 1., 0.))
            .unwrap();

        assert_approx_eq_low_prec!(hit.distance, 2.);
        assert_approx_eq_low_prec!(hit.normal, Vector::new(0., -1., 0.));
    }

    #[test]
    fn parallel_ray_misses() {
        let hit = floor().intersect(Point::new(0., 1., 0.), Vector::new(0., 0., 1.));
        assert!(hit.is_none());
    }

    #[test]
    fn plane_behind_ray_misses() {
        let hit = floor().intersect(Point::new(0., 1., 0.), Vector::new(0., 1., 0.));
        assert!(hit.is_none());
    }

    #[test]
    fn normal_is_normalized() {
        let plane = Plane::new(Point::zero(), Vector::new(0., 0., 10.));
        assert_approx_eq_low_prec!(plane.normal(), Vector::new(0., 0., 1.));
    }

    #[test]
    fn texture_coordinates_wrap_into_unit_square() {
        let plane = floor();
        for x in [-3.7, -0.2, 0., 1.5, 12.25] {
            let hit = plane
                .intersect(Point::new(x, 2., x * 0.5), Vector::new(0., -1., 0.))
                .unwrap();
            let (u, v) = hit.tex_coords;
            assert!((0. ..=1.).contains(&u), "u = {u}");
            assert!((0. ..=1.).contains(&v), "v = {v}");
        }
    }
}
