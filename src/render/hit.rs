use crate::{
    math::{point::Point, vector::Vector},
    scene::primitive::Primitive,
};

/// A successful ray-primitive intersection.
///
/// Borrows the primitive it was produced by, so it cannot outlive the scene
/// it was cast against.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    point: Point,
    normal: Vector,
    distance: f64,
    tex_coords: (f64, f64),
    ray_direction: Vector,
    primitive: &'a Primitive,
}

impl<'a> HitRecord<'a> {
    pub fn new(
        point: Point,
        normal: Vector,
        distance: f64,
        tex_coords: (f64, f64),
        ray_direction: Vector,
        primitive: &'a Primitive,
    ) -> Self {
        Self {
            point,
            normal,
            distance,
            tex_coords,
            ray_direction,
            primitive,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// Unit surface normal at the hit point.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `(u, v)`, both in `[0, 1]`.
    pub fn tex_coords(&self) -> (f64, f64) {
        self.tex_coords
    }

    pub fn ray_direction(&self) -> Vector {
        self.ray_direction
    }

    pub fn primitive(&self) -> &'a Primitive {
        self.primitive
    }
}
