use std::time::Instant;

use derive_builder::Builder;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{debug, info};
use rand::{Rng, seq::SliceRandom};

use crate::{
    math::{color::Color, point::Point, vector::Vector},
    render::{
        canvas::Canvas,
        hit::HitRecord,
        projection::{Frustum, Projection, Viewport},
    },
    scene::{Scene, camera::Camera, environment::Environment, primitive::Primitive},
};

/// Everything needed to set up a [`Renderer`] besides the scene and camera.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(derive(Debug), build_fn(validate = "Self::validate"))]
pub struct RendererConfig {
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Defaults to the whole canvas
    #[builder(setter(strip_option), default)]
    pub viewport: Option<Viewport>,
    #[builder(default)]
    pub projection: Projection,
    #[builder(default = "Color::black()")]
    pub clear_color: Color,
    #[builder(default = "Color::white()")]
    pub draw_color: Color,
    #[builder(default = "false")]
    pub use_progress_bar: bool,
}

impl RendererConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err("canvas dimensions must be positive".to_string());
        }
        if let Some(Some(viewport)) = &self.viewport {
            if viewport.width == 0 || viewport.height == 0 {
                return Err(format!(
                    "viewport dimensions must be positive, got {}x{}",
                    viewport.width, viewport.height
                ));
            }
        }
        if let Some(projection) = &self.projection {
            projection.check()?;
        }
        Ok(())
    }
}

/// Owns the scene, the camera, the projection state and the canvas,
/// and drives rendering of a frame.
#[derive(Debug)]
pub struct Renderer {
    canvas: Canvas,
    scene: Scene,
    camera: Camera,
    viewport: Viewport,
    projection: Projection,
    frustum: Frustum,
    clear_color: Color,
    draw_color: Color,
    environment: Option<Box<dyn Environment>>,
    use_progress_bar: bool,
}

impl Renderer {
    pub fn new(config: RendererConfig, scene: Scene, camera: Camera) -> Self {
        let viewport = config
            .viewport
            .unwrap_or_else(|| Viewport::full(config.width, config.height));
        let clear_color = config.clear_color.clamp();

        Self {
            canvas: Canvas::with_color(config.width, config.height, clear_color),
            scene,
            camera,
            viewport,
            projection: config.projection,
            frustum: Frustum::new(&viewport, &config.projection),
            clear_color,
            draw_color: config.draw_color.clamp(),
            environment: None,
            use_progress_bar: config.use_progress_bar,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn set_environment(&mut self, environment: Option<Box<dyn Environment>>) {
        self.environment = environment;
    }

    pub fn set_viewport(&mut self, x: usize, y: usize, width: usize, height: usize) {
        assert!(width > 0 && height > 0, "viewport dimensions must be positive");
        self.viewport = Viewport::new(x, y, width, height);
        self.frustum = Frustum::new(&self.viewport, &self.projection);
    }

    pub fn set_projection(&mut self, near: f64, far: f64, fov_degrees: f64) {
        self.projection = Projection::new(near, far, fov_degrees);
        debug_assert!(self.projection.check().is_ok());
        self.frustum = Frustum::new(&self.viewport, &self.projection);
    }

    pub fn set_color(&mut self, r: f64, g: f64, b: f64) {
        self.draw_color = Color::clamped(r, g, b);
    }

    pub fn set_clear_color(&mut self, r: f64, g: f64, b: f64) {
        self.clear_color = Color::clamped(r, g, b);
    }

    pub fn clear(&mut self) {
        self.canvas.fill(self.clear_color);
    }

    // canvas rows grow downward, renderer y grows upward
    fn canvas_row(&self, y: usize) -> usize {
        debug_assert!(y < self.canvas.height());
        self.canvas.height() - 1 - y
    }

    /// Writes one pixel with `y` growing upward. Uses the draw color when
    /// `color` is `None`; coordinates outside the canvas are ignored.
    pub fn point(&mut self, x: usize, y: usize, color: Option<Color>) {
        if !self.canvas.contains(x, y) {
            return;
        }
        let row = self.canvas_row(y);
        self.canvas
            .write_pixel(x, row, color.unwrap_or(self.draw_color));
    }

    /// `None` outside the canvas.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if !self.canvas.contains(x, y) {
            return None;
        }
        Some(self.canvas.pixel_at(x, self.canvas_row(y)))
    }

    pub fn pixel_to_ray(&self, x: usize, y: usize) -> Vector {
        self.frustum
            .pixel_to_ray(&self.viewport, x as f64, y as f64)
    }

    pub fn cast(
        &self,
        origin: Point,
        direction: Vector,
        exclude: Option<&Primitive>,
        depth: usize,
    ) -> Option<HitRecord<'_>> {
        self.scene.cast(origin, direction, exclude, depth)
    }

    /// Background seen along `direction` when nothing is hit.
    pub fn environment_color(&self, direction: Vector) -> Color {
        match &self.environment {
            Some(environment) => {
                let (u, v) = direction.spherical_uv();
                environment.color_at(u, v)
            }
            None => self.clear_color,
        }
    }

    pub fn color_at_pixel(&self, x: usize, y: usize) -> Color {
        let direction = self.pixel_to_ray(x, y);
        match self.cast(self.camera.translation(), direction, None, 0) {
            Some(hit) => hit.primitive().material().surface_color(&hit, self),
            None => self.environment_color(direction),
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.use_progress_bar {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} pixels shaded: {human_pos}/{human_len} {percent}% ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        ProgressBar::new(len as u64).with_style(style)
    }

    pub fn render(&mut self) -> &Canvas {
        self.render_with_rng(&mut rand::thread_rng())
    }

    /// Renders every viewport pixel in an order shuffled by `rng`.
    pub fn render_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Canvas {
        let viewport = self.viewport;
        let mut pixels: Vec<(usize, usize)> = (0..viewport.width)
            .flat_map(|i| (0..viewport.height).map(move |j| (i, j)))
            .collect();
        pixels.shuffle(rng);

        info!(
            "rendering {}x{} viewport at ({}, {}) onto {}x{} canvas",
            viewport.width,
            viewport.height,
            viewport.x,
            viewport.y,
            self.canvas.width(),
            self.canvas.height()
        );
        info!("rendering {} primitives", self.scene.primitives().len());

        let now = Instant::now();
        let progress_bar = self.progress_bar(pixels.len());
        let mut skipped = 0;

        for (i, j) in pixels.into_iter().progress_with(progress_bar) {
            let (Some(x), Some(y)) = (i.checked_add(viewport.x), j.checked_add(viewport.y))
            else {
                skipped += 1;
                continue;
            };
            if !self.canvas.contains(x, y) {
                skipped += 1;
                continue;
            }
            let color = self.color_at_pixel(x, y);
            self.point(x, y, Some(color));
        }

        if skipped > 0 {
            debug!("skipped {} pixels outside the canvas", skipped);
        }
        let elapsed = now.elapsed();
        let ray_count = viewport.pixel_count() - skipped;
        info!("render time: {:?}", elapsed);
        info!(
            "rays per second: {}",
            (ray_count as f64 / elapsed.as_secs_f64().max(f64::EPSILON)).round()
        );

        &self.canvas
    }
}
