use std::{fmt::Debug, rc::Rc};

use crate::{
    math::color::Color,
    render::{hit::HitRecord, renderer::Renderer, texture::Texture},
};

/// Resolves the color seen at a hit.
///
/// The renderer is handed in so that a material can cast further rays
/// (shadows, reflections) against the same scene through [`Renderer::cast`].
pub trait Material: Debug {
    fn surface_color(&self, hit: &HitRecord, renderer: &Renderer) -> Color;
}

/// Unlit constant color.
#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    color: Color,
}

impl Flat {
    pub fn new(color: Color) -> Self {
        Self {
            color: color.clamp(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Material for Flat {
    fn surface_color(&self, _hit: &HitRecord, _renderer: &Renderer) -> Color {
        self.color
    }
}

/// Unlit image lookup at the hit's texture coordinates.
#[derive(Debug, Clone)]
pub struct Textured {
    texture: Rc<Texture>,
}

impl Textured {
    pub fn new(texture: Rc<Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Textured {
    fn surface_color(&self, hit: &HitRecord, _renderer: &Renderer) -> Color {
        let (u, v) = hit.tex_coords();
        self.texture.sample(u, v)
    }
}

/// Lambertian surface lit by the scene's point lights, with hard shadows.
#[derive(Debug, Clone, PartialEq)]
pub struct Diffuse {
    color: Color,
    ambient: f64,
}

impl Diffuse {
    pub const DEFAULT_AMBIENT: f64 = 0.1;
    /// Shadow rays are one level below the primary ray.
    const SHADOW_RAY_DEPTH: usize = 1;

    pub fn new(color: Color, ambient: f64) -> Self {
        Self {
            color: color.clamp(),
            ambient: ambient.clamp(0., 1.),
        }
    }

    pub fn with_color(color: Color) -> Self {
        Self::new(color, Self::DEFAULT_AMBIENT)
    }
}

impl Material for Diffuse {
    fn surface_color(&self, hit: &HitRecord, renderer: &Renderer) -> Color {
        let mut color = self.color * self.ambient;

        for light in renderer.scene().lights() {
            let to_light = light.position() - hit.point();
            let distance = to_light.magnitude();
            if distance == 0. {
                continue;
            }
            let direction = to_light / distance;

            let lambert = hit.normal().dot(direction);
            if lambert <= 0. {
                continue;
            }

            let shadowed = renderer
                .cast(
                    hit.point(),
                    direction,
                    Some(hit.primitive()),
                    Self::SHADOW_RAY_DEPTH,
                )
                .is_some_and(|blocker| blocker.distance() < distance);
            if shadowed {
                continue;
            }

            color = color + self.color * light.intensity() * lambert;
        }

        color.clamp()
    }
}
