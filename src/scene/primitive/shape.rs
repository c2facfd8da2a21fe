use crate::math::{point::Point, vector::Vector};

use super::{plane::Plane, sphere::Sphere};

/// Intersection data a shape reports before it is tied to its primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Point,
    pub normal: Vector,
    pub distance: f64,
    pub tex_coords: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    /// Two-sided infinite plane
    Plane(Plane),
}

impl Shape {
    pub fn sphere(center: Point, radius: f64) -> Self {
        Shape::Sphere(Sphere::new(center, radius))
    }

    pub fn plane(point: Point, normal: Vector) -> Self {
        Shape::Plane(Plane::new(point, normal))
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Sphere(sphere) => sphere.center(),
            Shape::Plane(plane) => plane.point(),
        }
    }

    /// `direction` must be a unit vector.
    pub fn intersect(&self, origin: Point, direction: Vector) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(origin, direction),
            Shape::Plane(plane) => plane.intersect(origin, direction),
        }
    }
}
