use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Mints a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a layer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Text,
    Image,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Polygon,
    Arrow,
    Line,
    Ellipse,
    Group,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Text => "text",
            LayerKind::Image => "image",
            LayerKind::Rectangle => "rectangle",
            LayerKind::Circle => "circle",
            LayerKind::Triangle => "triangle",
            LayerKind::Star => "star",
            LayerKind::Polygon => "polygon",
            LayerKind::Arrow => "arrow",
            LayerKind::Line => "line",
            LayerKind::Ellipse => "ellipse",
            LayerKind::Group => "group",
        }
    }

    /// Human readable label used for default layer names
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Text => "Text",
            LayerKind::Image => "Image",
            LayerKind::Rectangle => "Rectangle",
            LayerKind::Circle => "Circle",
            LayerKind::Triangle => "Triangle",
            LayerKind::Star => "Star",
            LayerKind::Polygon => "Polygon",
            LayerKind::Arrow => "Arrow",
            LayerKind::Line => "Line",
            LayerKind::Ellipse => "Ellipse",
            LayerKind::Group => "Group",
        }
    }

    /// Default box size for a freshly created layer of this kind
    pub fn default_size(&self) -> Vec2 {
        match self {
            LayerKind::Text => Vec2::new(200.0, 40.0),
            LayerKind::Line => Vec2::new(150.0, 4.0),
            LayerKind::Arrow => Vec2::new(150.0, 60.0),
            _ => Vec2::new(100.0, 100.0),
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position, size and rotation of a layer in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredGeometry")]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees around the box center. Not normalized.
    pub rotation: f32,
}

impl Geometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            rotation: 0.0,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }

    /// Unrotated bounding box
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// Geometry as written in saved designs, before sizes are clamped
#[derive(Deserialize)]
struct StoredGeometry {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    rotation: f32,
}

impl From<StoredGeometry> for Geometry {
    fn from(stored: StoredGeometry) -> Self {
        Self {
            rotation: stored.rotation,
            ..Self::new(stored.x, stored.y, stored.width, stored.height)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in [0, 1]
    pub offset: f32,
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Angle in degrees, 0 runs left to right, 90 top to bottom
    Linear { angle: f32 },
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn linear(angle: f32, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Linear { angle },
            stops,
        }
    }

    pub fn radial(stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Radial,
            stops,
        }
    }

    /// Color at position `t` along the gradient.
    ///
    /// Stops are assumed sorted by offset. Positions before the first stop or
    /// after the last one take that stop's color.
    pub fn sample(&self, t: f32) -> Color32 {
        let Some(first) = self.stops.first() else {
            return Color32::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span <= f32::EPSILON {
                    1.0
                } else {
                    (t - a.offset) / span
                };
                return lerp_color(a.color, b.color, local);
            }
        }
        self.stops.last().map_or(first.color, |stop| stop.color)
    }

    /// Gradient position of `point` inside `rect`, in [0, 1]
    pub fn position_in(&self, rect: Rect, point: Pos2) -> f32 {
        let center = rect.center();
        let t = match self.kind {
            GradientKind::Linear { angle } => {
                let dir = Vec2::angled(angle.to_radians());
                // Half the extent of the box projected on the gradient axis
                let half = 0.5 * (rect.width() * dir.x.abs() + rect.height() * dir.y.abs());
                if half <= f32::EPSILON {
                    0.0
                } else {
                    0.5 + (point - center).dot(dir) / (2.0 * half)
                }
            }
            GradientKind::Radial => {
                let radii = rect.size() * 0.5;
                if radii.x <= f32::EPSILON || radii.y <= f32::EPSILON {
                    0.0
                } else {
                    let d = point - center;
                    ((d.x / radii.x).powi(2) + (d.y / radii.y).powi(2)).sqrt()
                }
            }
        };
        t.clamp(0.0, 1.0)
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Solid(Color32),
    Gradient(Gradient),
}

impl Fill {
    /// A single representative color, used where gradients cannot be drawn
    pub fn base_color(&self) -> Color32 {
        match self {
            Fill::Solid(color) => *color,
            Fill::Gradient(gradient) => gradient.sample(0.0),
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Solid(Color32::from_rgb(59, 130, 246))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    /// Dash and gap lengths; solid when absent
    pub dash: Option<(f32, f32)>,
}

impl StrokeStyle {
    pub const NONE: StrokeStyle = StrokeStyle {
        color: Color32::TRANSPARENT,
        width: 0.0,
        dash: None,
    };

    pub fn solid(width: f32, color: Color32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.a() > 0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub content: String,
    pub font_family: String,
    pub font_size: f32,
    pub align: TextAlign,
    pub color: Color32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            content: "Add your text".to_owned(),
            font_family: "Inter".to_owned(),
            font_size: 24.0,
            align: TextAlign::Left,
            color: Color32::from_rgb(17, 24, 39),
        }
    }
}

/// Parameters for the generated shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// Number of star points
    pub points: u32,
    /// Inner radius of a star as a fraction of the outer radius
    pub inner_radius: f32,
    /// Number of polygon sides
    pub sides: u32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            points: 5,
            inner_radius: 0.5,
            sides: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub geometry: Geometry,
    pub fill: Fill,
    pub stroke: StrokeStyle,
    pub opacity: f32,
    pub visible: bool,
    pub locked: bool,
    pub text: Option<TextStyle>,
    pub shape: ShapeParams,
    pub image_src: Option<String>,
}

impl Layer {
    pub fn new(kind: LayerKind, geometry: Geometry) -> Self {
        let text = (kind == LayerKind::Text).then(TextStyle::default);
        let (fill, stroke) = match kind {
            LayerKind::Text | LayerKind::Image => (Fill::Solid(Color32::TRANSPARENT), StrokeStyle::NONE),
            LayerKind::Line | LayerKind::Arrow => (
                Fill::Solid(Color32::from_rgb(17, 24, 39)),
                StrokeStyle::solid(4.0, Color32::from_rgb(17, 24, 39)),
            ),
            LayerKind::Group => (
                Fill::Solid(Color32::TRANSPARENT),
                StrokeStyle {
                    color: Color32::GRAY,
                    width: 1.0,
                    dash: Some((4.0, 4.0)),
                },
            ),
            _ => (Fill::default(), StrokeStyle::NONE),
        };

        Self {
            id: LayerId::new(),
            name: kind.label().to_owned(),
            kind,
            geometry,
            fill,
            stroke,
            opacity: 1.0,
            visible: true,
            locked: false,
            text,
            shape: ShapeParams::default(),
            image_src: None,
        }
    }

    /// A layer of `kind` with its default size, centered on `center`
    pub fn centered_at(kind: LayerKind, center: Pos2) -> Self {
        let size = kind.default_size();
        let min = center - size * 0.5;
        Self::new(kind, Geometry::new(min.x, min.y, size.x, size.y))
    }

    pub fn new_image(src: impl Into<String>, geometry: Geometry) -> Self {
        let mut layer = Self::new(LayerKind::Image, geometry);
        layer.image_src = Some(src.into());
        layer
    }

    pub fn with_id(mut self, id: LayerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    /// Applies every field present in `patch`
    pub fn apply_patch(&mut self, patch: &LayerPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            self.geometry.x = x;
        }
        if let Some(y) = patch.y {
            self.geometry.y = y;
        }
        if let Some(width) = patch.width {
            self.geometry.width = width.max(0.0);
        }
        if let Some(height) = patch.height {
            self.geometry.height = height.max(0.0);
        }
        if let Some(rotation) = patch.rotation {
            self.geometry.rotation = rotation;
        }
        if let Some(fill) = &patch.fill {
            self.fill = fill.clone();
        }
        if let Some(stroke) = patch.stroke {
            self.stroke = stroke;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(text) = &patch.text {
            self.text = Some(text.clone());
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(src) = &patch.image_src {
            self.image_src = Some(src.clone());
        }
    }
}

/// A partial set of layer fields, merged over a layer by `UpdateLayer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
    pub fill: Option<Fill>,
    pub stroke: Option<StrokeStyle>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub text: Option<TextStyle>,
    pub shape: Option<ShapeParams>,
    pub image_src: Option<String>,
}

impl LayerPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.min.x),
            y: Some(rect.min.y),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Patch holding every field that differs between `before` and `after`
    pub fn between(before: &Layer, after: &Layer) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }
        let (g0, g1) = (&before.geometry, &after.geometry);
        Self {
            name: changed(&before.name, &after.name),
            x: changed(&g0.x, &g1.x),
            y: changed(&g0.y, &g1.y),
            width: changed(&g0.width, &g1.width),
            height: changed(&g0.height, &g1.height),
            rotation: changed(&g0.rotation, &g1.rotation),
            fill: changed(&before.fill, &after.fill),
            stroke: changed(&before.stroke, &after.stroke),
            opacity: changed(&before.opacity, &after.opacity),
            visible: changed(&before.visible, &after.visible),
            locked: changed(&before.locked, &after.locked),
            text: if before.text != after.text { after.text.clone() } else { None },
            shape: changed(&before.shape, &after.shape),
            image_src: if before.image_src != after.image_src { after.image_src.clone() } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_geometry_is_clamped() {
        let geometry: Geometry =
            serde_json::from_str(r#"{ "x": 1.0, "y": 2.0, "width": -5.0, "height": 8.0, "rotation": 30.0 }"#).unwrap();
        assert_eq!(geometry.width, 0.0);
        assert_eq!(geometry.height, 8.0);
        assert_eq!(geometry.rotation, 30.0);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut layer = Layer::new(LayerKind::Rectangle, Geometry::new(10.0, 20.0, 30.0, 40.0));
        let before = layer.clone();

        layer.apply_patch(&LayerPatch::position(5.0, 6.0));

        assert_eq!(layer.geometry.x, 5.0);
        assert_eq!(layer.geometry.y, 6.0);
        assert_eq!(layer.geometry.width, before.geometry.width);
        assert_eq!(layer.fill, before.fill);
        assert_eq!(layer.id, before.id);
    }

    #[test]
    fn patch_between_round_trips_edits() {
        let before = Layer::new(LayerKind::Star, Geometry::default());
        let mut after = before.clone();
        after.geometry.rotation = 30.0;
        after.shape.points = 7;

        let patch = LayerPatch::between(&before, &after);
        assert_eq!(patch.rotation, Some(30.0));
        assert_eq!(patch.x, None);

        let mut patched = before.clone();
        patched.apply_patch(&patch);
        assert_eq!(patched, after);
    }

    #[test]
    fn patch_never_makes_size_negative() {
        let mut layer = Layer::new(LayerKind::Circle, Geometry::default());
        layer.apply_patch(&LayerPatch {
            width: Some(-5.0),
            height: Some(-1.0),
            ..Default::default()
        });
        assert_eq!(layer.geometry.width, 0.0);
        assert_eq!(layer.geometry.height, 0.0);
    }

    #[test]
    fn gradient_sampling_interpolates_between_stops() {
        let gradient = Gradient::linear(
            0.0,
            vec![
                GradientStop { offset: 0.0, color: Color32::from_rgb(0, 0, 0) },
                GradientStop { offset: 1.0, color: Color32::from_rgb(200, 100, 50) },
            ],
        );
        assert_eq!(gradient.sample(-1.0), Color32::from_rgb(0, 0, 0));
        assert_eq!(gradient.sample(0.5), Color32::from_rgb(100, 50, 25));
        assert_eq!(gradient.sample(2.0), Color32::from_rgb(200, 100, 50));
    }

    #[test]
    fn linear_gradient_position_spans_the_box() {
        let gradient = Gradient::linear(0.0, vec![]);
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 50.0));
        assert!((gradient.position_in(rect, Pos2::new(0.0, 25.0)) - 0.0).abs() < 1e-5);
        assert!((gradient.position_in(rect, Pos2::new(50.0, 0.0)) - 0.5).abs() < 1e-5);
        assert!((gradient.position_in(rect, Pos2::new(100.0, 10.0)) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn text_layers_get_text_style() {
        let layer = Layer::centered_at(LayerKind::Text, Pos2::new(100.0, 100.0));
        assert!(layer.text.is_some());
        assert_eq!(layer.geometry.x, 0.0);
        assert_eq!(layer.geometry.y, 80.0);
    }
}
