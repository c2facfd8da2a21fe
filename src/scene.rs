pub mod camera;
pub mod environment;
pub mod io;
pub mod light;
pub mod material;
pub mod primitive;

use light::PointLight;
use primitive::Primitive;

use crate::{
    math::{point::Point, vector::Vector},
    render::hit::HitRecord,
};

/// Bound on chained dependent casts (shadow, reflection, refraction rays).
pub const MAX_RECURSION_DEPTH: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new(primitives: Vec<Primitive>, lights: Vec<PointLight>) -> Self {
        Self { primitives, lights }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Finds the nearest primitive hit along `direction` (a unit vector).
    ///
    /// `exclude` is compared by identity and skipped, so secondary rays
    /// leaving a surface don't hit it again right at their origin.
    /// Returns `None` once `depth` reaches [`MAX_RECURSION_DEPTH`].
    /// On equal distances the primitive added first wins.
    pub fn cast(
        &self,
        origin: Point,
        direction: Vector,
        exclude: Option<&Primitive>,
        depth: usize,
    ) -> Option<HitRecord<'_>> {
        if depth >= MAX_RECURSION_DEPTH {
            return None;
        }

        self.primitives
            .iter()
            .filter(|primitive| exclude.is_none_or(|excluded| !std::ptr::eq(*primitive, excluded)))
            .filter_map(|primitive| primitive.intersect(origin, direction))
            .fold(None, |nearest: Option<HitRecord>, hit| match nearest {
                Some(nearest) if nearest.distance() <= hit.distance() => Some(nearest),
                _ => Some(hit),
            })
    }
}
