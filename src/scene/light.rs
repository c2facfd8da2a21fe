use crate::math::{color::Color, point::Point};

#[derive(PartialEq, Debug, Clone)]
pub struct PointLight {
    position: Point,
    intensity: Color,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Point::zero(),
            intensity: Color::white(),
        }
    }
}

impl PointLight {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn position(&self) -> Point {
        self.position
    }
}
