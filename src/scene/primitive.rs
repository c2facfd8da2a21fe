pub mod plane;
pub mod shape;
pub mod sphere;

use std::rc::Rc;

use shape::Shape;

use crate::{
    math::{point::Point, vector::Vector},
    render::hit::HitRecord,
    scene::material::Material,
};

/// A renderable shape paired with the material that shades it.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Rc<dyn Material>,
}

impl Primitive {
    pub fn new(shape: Shape, material: Rc<dyn Material>) -> Self {
        Self { shape, material }
    }

    pub fn sphere(center: Point, radius: f64, material: Rc<dyn Material>) -> Self {
        Self::new(Shape::sphere(center, radius), material)
    }

    pub fn plane(point: Point, normal: Vector, material: Rc<dyn Material>) -> Self {
        Self::new(Shape::plane(point, normal), material)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> Point {
        self.shape.position()
    }

    pub fn material(&self) -> &dyn Material {
        self.material.as_ref()
    }

    pub fn intersect(&self, origin: Point, direction: Vector) -> Option<HitRecord<'_>> {
        self.shape.intersect(origin, direction).map(|hit| {
            HitRecord::new(
                hit.point,
                hit.normal,
                hit.distance,
                hit.tex_coords,
                direction,
                self,
            )
        })
    }
}
