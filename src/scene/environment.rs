use std::fmt::Debug;

use crate::{math::color::Color, render::texture::Texture};

/// Background queried with spherical texture coordinates of a ray direction.
pub trait Environment: Debug {
    fn color_at(&self, u: f64, v: f64) -> Color;
}

impl Environment for Texture {
    fn color_at(&self, u: f64, v: f64) -> Color {
        self.sample(u, v)
    }
}

/// Same color in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform(pub Color);

impl Environment for Uniform {
    fn color_at(&self, _u: f64, _v: f64) -> Color {
        self.0
    }
}
