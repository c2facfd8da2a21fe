use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, warn};
use saphyr::Yaml;
use thiserror::Error;

use crate::{
    math::{color::Color, point::Point, tuple::Tuple, vector::Vector},
    render::{
        canvas::ImageError,
        projection::{Projection, Viewport},
        renderer::RendererConfigBuilder,
        texture::Texture,
    },
    scene::{
        Scene,
        camera::Camera,
        light::PointLight,
        material::{Diffuse, Flat, Material, Textured},
        primitive::Primitive,
    },
};

#[derive(Debug, Error)]
pub enum SceneParseError {
    #[error("invalid yaml syntax: {0}")]
    Syntax(String),
    #[error("scene files must contain a single yaml document")]
    MultipleDocuments,
    #[error("expected a list of operations, got {0}")]
    UnexpectedValue(String),
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("invalid field `{0}`")]
    InvalidField(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("unknown define `{0}`")]
    UnknownDefine(String),
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    #[error("failed to read `{}`: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to load image `{}`: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: ImageError,
    },
}

/// The output of the parser. Renderer options are kept apart from the
/// builder, because the cli options can override the values in the yaml file.
#[derive(Debug, Default)]
pub struct SceneConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub viewport: Option<Viewport>,
    pub projection: Option<Projection>,
    pub clear_color: Option<Color>,
    pub draw_color: Option<Color>,
    pub camera: Camera,
    pub scene: Scene,
    pub environment: Option<Texture>,
}

impl SceneConfig {
    /// Builder seeded with every renderer option the scene file set.
    pub fn renderer_builder(&self) -> RendererConfigBuilder {
        let mut builder = RendererConfigBuilder::default();
        if let Some(width) = self.width {
            builder.width(width);
        }
        if let Some(height) = self.height {
            builder.height(height);
        }
        if let Some(viewport) = self.viewport {
            builder.viewport(viewport);
        }
        if let Some(projection) = self.projection {
            builder.projection(projection);
        }
        if let Some(color) = self.clear_color {
            builder.clear_color(color);
        }
        if let Some(color) = self.draw_color {
            builder.draw_color(color);
        }
        builder
    }
}

const PREDEFINED_DEFINES: &str = r#"
- define: PI
  value: 3.141592653589793
- define: WHITE
  value: [ 1, 1, 1 ]
- define: BLACK
  value: [ 0, 0, 0 ]
- define: RED
  value: [ 1, 0, 0 ]
- define: GREEN
  value: [ 0, 1, 0 ]
- define: BLUE
  value: [ 0, 0, 1 ]
"#;

pub struct YamlParser<'a> {
    yaml: &'a Yaml,
    input_path: Option<&'a Path>,
    result: SceneConfig,
    defines: HashMap<String, Yaml>,
    // named materials are shared by every primitive that uses them
    materials: HashMap<String, Rc<dyn Material>>,
}

type YamlParseResult<T> = Result<T, SceneParseError>;

/// Upper bound for canvas and viewport sizes and offsets.
const MAX_PIXEL_COORD: u32 = u32::MAX;

fn field_error(field: &str) -> SceneParseError {
    SceneParseError::InvalidField(field.to_string())
}

impl<'a> YamlParser<'a> {
    fn new(yaml: &'a Yaml, input_path: Option<&'a Path>, defines: HashMap<String, Yaml>) -> Self {
        Self {
            yaml,
            input_path,
            result: SceneConfig::default(),
            defines,
            materials: HashMap::new(),
        }
    }

    pub fn with_predefined_defines(
        yaml: &'a Yaml,
        input_path: Option<&'a Path>,
    ) -> YamlParseResult<Self> {
        let predefined = str_to_yaml(PREDEFINED_DEFINES)?;
        let mut predefined_parser = YamlParser::new(&predefined, None, HashMap::new());
        predefined_parser.parse()?;

        Ok(YamlParser::new(yaml, input_path, predefined_parser.defines))
    }

    fn lookup_define(&self, name: &str) -> YamlParseResult<&Yaml> {
        self.defines
            .get(name)
            .ok_or_else(|| SceneParseError::UnknownDefine(name.to_string()))
    }

    fn parse_num(&self, value: &Yaml) -> YamlParseResult<f64> {
        match value {
            Yaml::Integer(value) => Ok(*value as f64),
            Yaml::Real(value) => value
                .parse()
                .map_err(|_| SceneParseError::InvalidValue(format!("`{value}` is not a number"))),
            Yaml::String(name) => {
                if let Some(name) = name.strip_prefix('-') {
                    return self.parse_num(self.lookup_define(name)?).map(|v| -v);
                }
                self.parse_num(self.lookup_define(name)?)
            }
            other => Err(SceneParseError::InvalidValue(format!(
                "expected a number, got {other:?}"
            ))),
        }
    }

    fn parse_field_num(&self, body: &Yaml, field: &str) -> YamlParseResult<f64> {
        match &body[field] {
            Yaml::BadValue => Err(SceneParseError::MissingField(field.to_string())),
            value => self.parse_num(value),
        }
    }

    fn parse_field_usize(&self, body: &Yaml, field: &str) -> YamlParseResult<usize> {
        let value = self.parse_field_num(body, field)?;
        if !(0. ..=MAX_PIXEL_COORD as f64).contains(&value) || value.fract() != 0. {
            return Err(SceneParseError::InvalidValue(format!(
                "`{field}` must be an integer in [0, {MAX_PIXEL_COORD}], got {value}"
            )));
        }
        Ok(value as usize)
    }

    fn parse_vec3(&self, value: &Yaml) -> YamlParseResult<(f64, f64, f64)> {
        let vec = value.as_vec().ok_or_else(|| {
            SceneParseError::InvalidValue(format!("expected a list of 3 numbers, got {value:?}"))
        })?;
        if vec.len() != 3 {
            return Err(SceneParseError::InvalidValue(format!(
                "expected a list of 3 numbers, got {} values",
                vec.len()
            )));
        }
        Ok((
            self.parse_num(&vec[0])?,
            self.parse_num(&vec[1])?,
            self.parse_num(&vec[2])?,
        ))
    }

    fn parse_color(&self, value: &Yaml) -> YamlParseResult<Color> {
        if let Yaml::String(name) = value {
            return self.parse_color(self.lookup_define(name)?);
        }
        let (r, g, b) = self.parse_vec3(value)?;
        Ok(Color::new(r, g, b))
    }

    fn parse_point(&self, value: &Yaml) -> YamlParseResult<Point> {
        let (x, y, z) = self.parse_vec3(value)?;
        Ok(Point::new(x, y, z))
    }

    fn parse_vector(&self, value: &Yaml) -> YamlParseResult<Vector> {
        let (x, y, z) = self.parse_vec3(value)?;
        Ok(Vector::new(x, y, z))
    }

    fn parse_field_point(&self, body: &Yaml, field: &str) -> YamlParseResult<Point> {
        match &body[field] {
            Yaml::BadValue => Err(SceneParseError::MissingField(field.to_string())),
            value => self.parse_point(value),
        }
    }

    fn resolve_path_from_scene(&self, path: &Path) -> PathBuf {
        let input_dir = match self.input_path {
            Some(input_path) => input_path.parent().unwrap_or_else(|| Path::new(".")),
            None => Path::new("."),
        };

        input_dir.join(path)
    }

    fn load_texture(&self, body: &Yaml) -> YamlParseResult<Texture> {
        let file_path = body["file"]
            .as_str()
            .ok_or_else(|| SceneParseError::MissingField("file".to_string()))?;
        let path = self.resolve_path_from_scene(Path::new(file_path));
        debug!("loading texture {}", path.display());

        Texture::load_png(&path).map_err(|source| SceneParseError::Image { path, source })
    }

    fn draw_color(&self) -> Color {
        self.result.draw_color.unwrap_or_else(Color::white)
    }

    fn parse_material_body(&self, body: &Yaml) -> YamlParseResult<Rc<dyn Material>> {
        if body.as_hash().is_none() {
            return Err(SceneParseError::InvalidValue(format!(
                "expected a material, got {body:?}"
            )));
        }
        let kind = match &body["type"] {
            Yaml::BadValue => "diffuse",
            value => value.as_str().ok_or_else(|| field_error("type"))?,
        };
        let color = match &body["color"] {
            Yaml::BadValue => self.draw_color(),
            value => self.parse_color(value)?,
        };

        Ok(match kind {
            "flat" => Rc::new(Flat::new(color)),
            "diffuse" => {
                let ambient = match &body["ambient"] {
                    Yaml::BadValue => Diffuse::DEFAULT_AMBIENT,
                    value => self.parse_num(value)?,
                };
                if !(0. ..=1.).contains(&ambient) {
                    return Err(SceneParseError::InvalidValue(format!(
                        "ambient must be in [0, 1], got {ambient}"
                    )));
                }
                Rc::new(Diffuse::new(color, ambient))
            }
            "texture" => Rc::new(Textured::new(Rc::new(self.load_texture(body)?))),
            other => return Err(SceneParseError::UnknownVariant(other.to_string())),
        })
    }

    fn parse_material(&mut self, body: &Yaml) -> YamlParseResult<Rc<dyn Material>> {
        match body {
            Yaml::BadValue => Ok(Rc::new(Flat::new(self.draw_color()))),
            Yaml::String(name) => {
                if let Some(material) = self.materials.get(name) {
                    return Ok(Rc::clone(material));
                }
                let material = self.parse_material_body(self.lookup_define(name)?)?;
                self.materials.insert(name.clone(), Rc::clone(&material));
                Ok(material)
            }
            body => self.parse_material_body(body),
        }
    }

    fn parse_sphere(&mut self, body: &Yaml) -> YamlParseResult<Primitive> {
        let center = self.parse_field_point(body, "at")?;
        let radius = self.parse_field_num(body, "radius")?;
        if radius <= 0. {
            return Err(SceneParseError::InvalidValue(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        let material = self.parse_material(&body["material"])?;

        Ok(Primitive::sphere(center, radius, material))
    }

    fn parse_plane(&mut self, body: &Yaml) -> YamlParseResult<Primitive> {
        let point = self.parse_field_point(body, "at")?;
        let normal = match &body["normal"] {
            Yaml::BadValue => Vector::new(0., 1., 0.),
            value => self.parse_vector(value)?,
        };
        if normal.magnitude() == 0. {
            return Err(SceneParseError::InvalidValue(
                "plane normal must be non-zero".to_string(),
            ));
        }
        let material = self.parse_material(&body["material"])?;

        Ok(Primitive::plane(point, normal, material))
    }

    fn parse_light(&self, body: &Yaml) -> YamlParseResult<PointLight> {
        let at = self.parse_field_point(body, "at")?;
        let intensity = match &body["intensity"] {
            Yaml::BadValue => Color::white(),
            value => self.parse_color(value)?,
        };

        Ok(PointLight::new(at, intensity))
    }

    fn parse_add(&mut self, what: &str, body: &Yaml) -> YamlParseResult<()> {
        match what {
            "sphere" => {
                let sphere = self.parse_sphere(body)?;
                self.result.scene.add_primitive(sphere);
            }
            "plane" => {
                let plane = self.parse_plane(body)?;
                self.result.scene.add_primitive(plane);
            }
            "light" => {
                let light = self.parse_light(body)?;
                self.result.scene.add_light(light);
            }
            other => return Err(SceneParseError::UnknownVariant(other.to_string())),
        }
        Ok(())
    }

    /// Stores a define with any top level alias already resolved,
    /// so later lookups cannot loop.
    fn parse_define(&mut self, name: &str, body: &Yaml) -> YamlParseResult<()> {
        let value = match body {
            Yaml::BadValue => return Err(SceneParseError::MissingField("value".to_string())),
            Yaml::String(alias) if alias.starts_with('-') => {
                Yaml::Real(self.parse_num(body)?.to_string())
            }
            Yaml::String(alias) => self.lookup_define(alias)?.clone(),
            body => body.clone(),
        };
        if self.defines.insert(name.to_string(), value).is_some() {
            warn!("define `{name}` shadows an earlier define");
        }
        // a redefined material must not reuse the cached one
        self.materials.remove(name);
        Ok(())
    }

    fn parse_canvas(&mut self, body: &Yaml) -> YamlParseResult<()> {
        let width = self.parse_field_usize(body, "width")?;
        let height = self.parse_field_usize(body, "height")?;
        if width == 0 || height == 0 {
            return Err(SceneParseError::InvalidValue(
                "canvas dimensions must be positive".to_string(),
            ));
        }
        self.result.width = Some(width);
        self.result.height = Some(height);
        Ok(())
    }

    fn parse_viewport(&mut self, body: &Yaml) -> YamlParseResult<()> {
        let x = self.parse_field_usize(body, "x")?;
        let y = self.parse_field_usize(body, "y")?;
        let width = self.parse_field_usize(body, "width")?;
        let height = self.parse_field_usize(body, "height")?;
        if width == 0 || height == 0 {
            return Err(SceneParseError::InvalidValue(
                "viewport dimensions must be positive".to_string(),
            ));
        }
        self.result.viewport = Some(Viewport::new(x, y, width, height));
        Ok(())
    }

    fn parse_projection(&mut self, body: &Yaml) -> YamlParseResult<()> {
        let mut projection = Projection::default();
        match &body["near"] {
            Yaml::BadValue => {}
            value => projection.near = self.parse_num(value)?,
        }
        match &body["far"] {
            Yaml::BadValue => {}
            value => projection.far = self.parse_num(value)?,
        }
        match &body["fov"] {
            Yaml::BadValue => {}
            value => projection.fov_degrees = self.parse_num(value)?,
        }
        projection.check().map_err(SceneParseError::InvalidValue)?;

        self.result.projection = Some(projection);
        Ok(())
    }

    fn parse_camera(&mut self, body: &Yaml) -> YamlParseResult<()> {
        let position = self.parse_field_point(body, "position")?;
        self.result.camera = Camera::new(position);
        Ok(())
    }

    fn parse_environment(&mut self, body: &Yaml) -> YamlParseResult<()> {
        self.result.environment = Some(self.load_texture(body)?);
        Ok(())
    }

    fn parse_operation(&mut self, yaml_obj: &Yaml) -> YamlParseResult<()> {
        let unexpected = || SceneParseError::UnexpectedValue(format!("{yaml_obj:?}"));
        let Yaml::Hash(hash) = yaml_obj else {
            return Err(unexpected());
        };
        let Some((Yaml::String(operation), body)) = hash.front() else {
            return Err(unexpected());
        };

        match (operation.as_str(), body) {
            ("add", Yaml::String(what)) => self.parse_add(what, yaml_obj),
            ("define", Yaml::String(name)) => self.parse_define(name, &yaml_obj["value"]),
            ("add" | "define", _) => Err(field_error(operation)),
            ("canvas", body) => self.parse_canvas(body),
            ("viewport", body) => self.parse_viewport(body),
            ("projection", body) => self.parse_projection(body),
            ("clear-color", body) => {
                self.result.clear_color = Some(self.parse_color(body)?.clamp());
                Ok(())
            }
            ("draw-color", body) => {
                self.result.draw_color = Some(self.parse_color(body)?.clamp());
                Ok(())
            }
            ("camera", body) => self.parse_camera(body),
            ("environment", body) => self.parse_environment(body),
            (other, _) => Err(SceneParseError::UnknownVariant(other.to_string())),
        }
    }

    fn parse(&mut self) -> YamlParseResult<()> {
        let yaml = self.yaml;
        match yaml {
            Yaml::Array(operations) => operations
                .iter()
                .try_for_each(|operation| self.parse_operation(operation)),
            Yaml::Null => Ok(()),
            other => Err(SceneParseError::UnexpectedValue(format!("{other:?}"))),
        }
    }

    fn parse_consume(mut self) -> YamlParseResult<SceneConfig> {
        self.parse()?;
        debug!(
            "parsed {} primitives and {} lights",
            self.result.scene.primitives().len(),
            self.result.scene.lights().len()
        );
        Ok(self.result)
    }
}

fn str_to_yaml(source: &str) -> YamlParseResult<Yaml> {
    let mut docs =
        Yaml::load_from_str(source).map_err(|err| SceneParseError::Syntax(err.to_string()))?;
    match docs.len() {
        1 => Ok(std::mem::replace(&mut docs[0], Yaml::BadValue)),
        0 => Ok(Yaml::Array(vec![])),
        _ => Err(SceneParseError::MultipleDocuments),
    }
}

fn parse(source: &str, input_path: Option<&Path>) -> YamlParseResult<SceneConfig> {
    let yaml = str_to_yaml(source)?;
    YamlParser::with_predefined_defines(&yaml, input_path)?.parse_consume()
}

pub fn parse_str(source: &str) -> YamlParseResult<SceneConfig> {
    parse(source, None)
}

/// Parses a scene file. Relative paths inside it resolve against its directory.
pub fn parse_file(input_path: &Path) -> YamlParseResult<SceneConfig> {
    let source = std::fs::read_to_string(input_path).map_err(|source| {
        SceneParseError::FileRead {
            path: input_path.to_path_buf(),
            source,
        }
    })?;
    parse(&source, Some(input_path))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{assert_approx_eq_low_prec, scene::primitive::shape::Shape};

    fn sphere_radius(primitive: &Primitive) -> f64 {
        match primitive.shape() {
            Shape::Sphere(sphere) => sphere.radius(),
            other => panic!("expected a sphere, got {other:?}"),
        }
    }

    #[test]
    fn empty_document() {
        let config = parse_str("").unwrap();

        assert!(config.scene.primitives().is_empty());
        assert_eq!(config.width, None);
        assert_eq!(config.camera, Camera::default());
    }

    #[test]
    fn renderer_options() {
        const SOURCE: &str = r#"
- canvas: { width: 400, height: 300 }
- viewport: { x: 10, y: 20, width: 200, height: 100 }
- projection: { near: 0.5, far: 50, fov: 90 }
- clear-color: [ 0, 0, 2 ]
- draw-color: RED
- camera: { position: [ 0, 1, 5 ] }
"#;
        let config = parse_str(SOURCE).unwrap();

        assert_eq!(config.width, Some(400));
        assert_eq!(config.height, Some(300));
        assert_eq!(config.viewport, Some(Viewport::new(10, 20, 200, 100)));
        assert_eq!(config.projection, Some(Projection::new(0.5, 50., 90.)));
        assert_approx_eq_low_prec!(config.clear_color.unwrap(), Color::blue());
        assert_approx_eq_low_prec!(config.draw_color.unwrap(), Color::red());
        assert_eq!(config.camera, Camera::new(Point::new(0., 1., 5.)));

        let renderer_config = config.renderer_builder().build().unwrap();
        assert_eq!(renderer_config.width, 400);
        assert_eq!(renderer_config.viewport, Some(Viewport::new(10, 20, 200, 100)));
    }

    #[test]
    fn projection_defaults_missing_fields() {
        let config = parse_str("- projection: { fov: 45 }").unwrap();

        assert_eq!(config.projection, Some(Projection::new(0.1, 1000., 45.)));
    }

    #[test]
    fn add_primitives_and_lights() {
        const SOURCE: &str = r#"
- add: sphere
  at: [ 0, 0, -1 ]
  radius: 0.5
- add: plane
  at: [ 0, -1, 0 ]
  normal: [ 0, 2, 0 ]
- add: light
  at: [ 5, 5, 5 ]
  intensity: [ 0.5, 0.5, 0.5 ]
"#;
        let config = parse_str(SOURCE).unwrap();
        let primitives = config.scene.primitives();

        assert_eq!(primitives.len(), 2);
        assert_approx_eq_low_prec!(primitives[0].position(), Point::new(0., 0., -1.));
        assert_approx_eq_low_prec!(sphere_radius(&primitives[0]), 0.5);
        match primitives[1].shape() {
            Shape::Plane(plane) => {
                assert_approx_eq_low_prec!(plane.normal(), Vector::new(0., 1., 0.))
            }
            other => panic!("expected a plane, got {other:?}"),
        }
        assert_eq!(
            config.scene.lights(),
            &[PointLight::new(
                Point::new(5., 5., 5.),
                Color::new(0.5, 0.5, 0.5)
            )]
        );
    }

    #[test]
    fn numeric_defines() {
        const SOURCE: &str = r#"
- define: r
  value: 2
- define: minus-pi
  value: -PI
- add: sphere
  at: [ 0, minus-pi, -PI ]
  radius: r
"#;
        let config = parse_str(SOURCE).unwrap();
        let sphere = &config.scene.primitives()[0];

        assert_approx_eq_low_prec!(sphere_radius(sphere), 2.);
        assert_approx_eq_low_prec!(sphere.position(), Point::new(0., -PI, -PI));
    }

    #[test]
    fn named_materials_are_shared() {
        const SOURCE: &str = r#"
- define: red
  value: { type: flat, color: RED }
- add: sphere
  at: [ 0, 0, 0 ]
  radius: 1
  material: red
- add: sphere
  at: [ 2, 0, 0 ]
  radius: 1
  material: red
- add: sphere
  at: [ 4, 0, 0 ]
  radius: 1
  material: { type: flat, color: RED }
"#;
        let config = parse_str(SOURCE).unwrap();
        let primitives = config.scene.primitives();

        assert!(std::ptr::addr_eq(
            primitives[0].material(),
            primitives[1].material()
        ));
        assert!(!std::ptr::addr_eq(
            primitives[0].material(),
            primitives[2].material()
        ));
    }

    #[test]
    fn alias_defines_resolve_eagerly() {
        const SOURCE: &str = r#"
- define: a
  value: 1
- define: b
  value: a
- define: a
  value: b
- add: sphere
  at: [ 0, 0, 0 ]
  radius: a
"#;
        let config = parse_str(SOURCE).unwrap();

        assert_approx_eq_low_prec!(sphere_radius(&config.scene.primitives()[0]), 1.);
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            parse_str("- add: [ sphere"),
            Err(SceneParseError::Syntax(_))
        ));
    }

    #[test]
    fn multiple_documents() {
        assert!(matches!(
            parse_str("- canvas: { width: 1, height: 1 }\n---\n- canvas: { width: 1, height: 1 }"),
            Err(SceneParseError::MultipleDocuments)
        ));
    }

    #[test]
    fn unknown_define() {
        const SOURCE: &str = r#"
- add: sphere
  at: [ 0, 0, 0 ]
  radius: huge
"#;
        assert!(matches!(
            parse_str(SOURCE),
            Err(SceneParseError::UnknownDefine(name)) if name == "huge"
        ));
    }

    #[test]
    fn missing_field() {
        assert!(matches!(
            parse_str("- add: sphere\n  at: [ 0, 0, 0 ]"),
            Err(SceneParseError::MissingField(field)) if field == "radius"
        ));
    }

    #[test]
    fn unknown_operations() {
        assert!(matches!(
            parse_str("- add: cube"),
            Err(SceneParseError::UnknownVariant(name)) if name == "cube"
        ));
        assert!(matches!(
            parse_str("- animate: { frames: 10 }"),
            Err(SceneParseError::UnknownVariant(name)) if name == "animate"
        ));
        assert!(matches!(
            parse_str("- 42"),
            Err(SceneParseError::UnexpectedValue(_))
        ));
    }

    #[test]
    fn invalid_values() {
        for source in [
            "- add: sphere\n  at: [ 0, 0, 0 ]\n  radius: 0",
            "- add: plane\n  at: [ 0, 0, 0 ]\n  normal: [ 0, 0, 0 ]",
            "- add: light\n  at: [ 0, 0 ]",
            "- canvas: { width: 0, height: 10 }",
            "- canvas: { width: 10.5, height: 10 }",
            "- viewport: { x: -1, y: 0, width: 10, height: 10 }",
            "- viewport: { x: 1e30, y: 0, width: 4, height: 4 }",
            "- viewport: { x: 0, y: 0, width: 4, height: 4294967296 }",
            "- canvas: { width: .inf, height: 10 }",
            "- projection: { near: 1, far: 0.5 }",
            "- projection: { fov: 180 }",
            "- add: sphere\n  at: [ 0, 0, 0 ]\n  radius: 1\n  material: { ambient: 2 }",
        ] {
            assert!(
                matches!(parse_str(source), Err(SceneParseError::InvalidValue(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn largest_viewport_offset_is_accepted() {
        let config =
            parse_str("- viewport: { x: 4294967295, y: 0, width: 4, height: 4 }").unwrap();

        assert_eq!(config.viewport, Some(Viewport::new(4294967295, 0, 4, 4)));
    }

    #[test]
    fn missing_files_are_reported() {
        let result = parse_file(Path::new("no/such/scene.yaml"));
        assert!(matches!(result, Err(SceneParseError::FileRead { .. })));

        let result = parse_str("- environment: { file: no/such/sky.png }");
        assert!(matches!(result, Err(SceneParseError::Image { .. })));
    }

    #[test]
    fn environment_texture_resolves_relative_to_scene() {
        let dir = std::env::temp_dir().join(format!("raycaster-yaml-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut canvas = crate::render::canvas::Canvas::new(2, 1);
        canvas.write_pixel(1, 0, Color::green());
        let file = std::fs::File::create(dir.join("sky.png")).unwrap();
        canvas.write_png(file).unwrap();

        let scene_path = dir.join("scene.yaml");
        std::fs::write(&scene_path, "- environment: { file: sky.png }\n").unwrap();

        let config = parse_file(&scene_path).unwrap();
        let environment = config.environment.unwrap();
        assert_eq!((environment.width(), environment.height()), (2, 1));
        assert_approx_eq_low_prec!(environment.sample(0.9, 0.5), Color::green());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
