use crate::math::point::Point;

/// The eye of the renderer. It has no rotation; rays leave it toward -z.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Camera {
    translation: Point,
}

impl Camera {
    pub fn new(translation: Point) -> Self {
        Self { translation }
    }

    pub fn translation(&self) -> Point {
        self.translation
    }
}
