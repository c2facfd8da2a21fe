use crate::math::{tuple::Tuple, vector::Vector};

/// Pixel rectangle of the canvas that gets rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub near: f64,
    /// Kept for configuration; nothing is clipped against it.
    pub far: f64,
    pub fov_degrees: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.,
            fov_degrees: 60.,
        }
    }
}

impl Projection {
    pub fn new(near: f64, far: f64, fov_degrees: f64) -> Self {
        Self {
            near,
            far,
            fov_degrees,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.near <= 0. {
            return Err(format!("near plane must be positive, got {}", self.near));
        }
        if self.far <= self.near {
            return Err(format!(
                "far plane ({}) must lie beyond the near plane ({})",
                self.far, self.near
            ));
        }
        if self.fov_degrees <= 0. || self.fov_degrees >= 180. {
            return Err(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            ));
        }
        Ok(())
    }
}

/// Half extents of the near plane, derived from a viewport and a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    near: f64,
    top_edge: f64,
    right_edge: f64,
}

impl Frustum {
    pub fn new(viewport: &Viewport, projection: &Projection) -> Self {
        assert!(viewport.height > 0, "viewport height must be positive");

        let fov = projection.fov_degrees.to_radians();
        let top_edge = (fov / 2.).tan() * projection.near;
        let right_edge = top_edge * viewport.aspect_ratio();

        Self {
            near: projection.near,
            top_edge,
            right_edge,
        }
    }

    pub fn top_edge(&self) -> f64 {
        self.top_edge
    }

    pub fn right_edge(&self) -> f64 {
        self.right_edge
    }

    // camera looks toward -z, +y is up
    pub fn pixel_to_ray(&self, viewport: &Viewport, x: f64, y: f64) -> Vector {
        let ndc_x = ((x + 0.5 - viewport.x as f64) / viewport.width as f64) * 2. - 1.;
        let ndc_y = ((y + 0.5 - viewport.y as f64) / viewport.height as f64) * 2. - 1.;

        Vector::new(
            ndc_x * self.right_edge,
            ndc_y * self.top_edge,
            -self.near,
        )
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_eq_low_prec, math::approx_eq::ApproxEq};

    #[test]
    fn default_projection_is_valid() {
        assert!(Projection::default().check().is_ok());
    }

    #[test]
    fn invalid_projections_are_rejected() {
        assert!(Projection::new(0., 10., 60.).check().is_err());
        assert!(Projection::new(1., 1., 60.).check().is_err());
        assert!(Projection::new(0.1, 10., 180.).check().is_err());
        assert!(Projection::new(0.1, 10., 0.).check().is_err());
    }

    #[test]
    fn edges_for_square_viewport() {
        let frustum = Frustum::new(&Viewport::full(100, 100), &Projection::new(1., 100., 90.));

        assert_approx_eq_low_prec!(frustum.top_edge(), 1.);
        assert_approx_eq_low_prec!(frustum.right_edge(), 1.);
    }

    #[test]
    fn right_edge_follows_aspect_ratio() {
        let projection = Projection::new(0.1, 1000., 60.);
        let frustum = Frustum::new(&Viewport::full(200, 100), &projection);

        let expected_top = (30_f64).to_radians().tan() * 0.1;
        assert_approx_eq_low_prec!(frustum.top_edge(), expected_top);
        assert_approx_eq_low_prec!(frustum.right_edge(), expected_top * 2.);
    }

    #[test]
    fn ray_through_viewport_center() {
        let viewport = Viewport::full(101, 101);
        let frustum = Frustum::new(&viewport, &Projection::new(1., 100., 90.));

        assert_approx_eq_low_prec!(
            frustum.pixel_to_ray(&viewport, 50., 50.),
            Vector::new(0., 0., -1.)
        );
    }

    #[test]
    fn ray_through_bottom_left_corner() {
        let viewport = Viewport::full(2, 2);
        let frustum = Frustum::new(&viewport, &Projection::new(1., 100., 90.));

        // pixel center (0.5, 0.5) lands on ndc (-0.5, -0.5)
        let expected = Vector::new(-0.5, -0.5, -1.).normalize();
        assert_approx_eq_low_prec!(frustum.pixel_to_ray(&viewport, 0., 0.), expected);
    }

    #[test]
    fn offset_viewport_is_centered_on_its_own_pixels() {
        let viewport = Viewport::new(40, 10, 21, 21);
        let frustum = Frustum::new(&viewport, &Projection::default());

        let direction = frustum.pixel_to_ray(&viewport, 50., 20.);
        assert_approx_eq_low_prec!(direction, Vector::new(0., 0., -1.));
    }

    #[test]
    fn rays_are_unit_length() {
        let viewport = Viewport::full(64, 48);
        let frustum = Frustum::new(&viewport, &Projection::new(0.5, 10., 120.));
        for (x, y) in [(0., 0.), (63., 47.), (10., 30.)] {
            assert!(frustum.pixel_to_ray(&viewport, x, y).magnitude().approx_eq(&1.));
        }
    }

    #[test]
    #[should_panic]
    fn zero_height_viewport_panics() {
        Frustum::new(&Viewport::full(10, 0), &Projection::default());
    }
}
