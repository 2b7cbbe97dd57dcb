//! Layer rendering.
//!
//! [`render_layer`] is a pure mapping from a layer to the vector primitive
//! that draws it, in canvas coordinates and before rotation. [`paint_layer`]
//! turns that primitive into egui shapes for one frame. Nothing is cached
//! between frames.

use crate::geometry::shapes::{
    ELLIPSE_SEGMENTS, arrow_points, ellipse_points, fill_triangles, line_points, polygon_points, rect_points,
    rotate_about, star_points, triangle_points,
};
use crate::layer::{Fill, Layer, LayerKind, StrokeStyle, TextAlign, TextStyle};
use crate::texture_manager::TextureManager;
use crate::viewport::Viewport;
use egui::epaint::{Mesh, TextShape, Vertex, WHITE_UV};
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, pos2};

const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(229, 231, 235);
const PLACEHOLDER_TEXT: Color32 = Color32::from_rgb(107, 114, 128);

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled outline of a simple polygon, in canvas coordinates
    Outline { points: Vec<Pos2>, closed: bool },
    /// Open stroke, used for lines. `thickness` applies when the layer has no stroke.
    Path { points: Vec<Pos2>, thickness: f32 },
    Text { rect: Rect, style: TextStyle },
    Image { rect: Rect, src: Option<String> },
}

/// What to draw for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayer {
    pub primitive: Primitive,
    pub fill: Fill,
    pub stroke: StrokeStyle,
    /// Degrees, clockwise, about `pivot`
    pub rotation: f32,
    pub pivot: Pos2,
    pub opacity: f32,
}

/// Primitive for `layer`, or `None` when it is hidden
pub fn render_layer(layer: &Layer) -> Option<RenderedLayer> {
    if !layer.visible {
        return None;
    }

    let rect = layer.rect();
    let size = rect.size();
    let offset = |points: Vec<Pos2>| -> Vec<Pos2> { points.into_iter().map(|p| p + rect.min.to_vec2()).collect() };
    let outline = |points: Vec<Pos2>| Primitive::Outline {
        points: offset(points),
        closed: true,
    };

    let primitive = match layer.kind {
        LayerKind::Rectangle => outline(rect_points(size)),
        LayerKind::Circle | LayerKind::Ellipse => outline(ellipse_points(size, ELLIPSE_SEGMENTS)),
        LayerKind::Triangle => outline(triangle_points(size)),
        LayerKind::Star => outline(star_points(size, layer.shape.points.max(2), layer.shape.inner_radius)),
        LayerKind::Polygon => outline(polygon_points(size, layer.shape.sides.max(3))),
        LayerKind::Arrow => outline(arrow_points(size)),
        LayerKind::Line => Primitive::Path {
            points: offset(line_points(size).to_vec()),
            thickness: size.y.max(1.0),
        },
        LayerKind::Text => Primitive::Text {
            rect,
            style: layer.text.clone().unwrap_or_default(),
        },
        LayerKind::Image => Primitive::Image {
            rect,
            src: layer.image_src.clone(),
        },
        LayerKind::Group => Primitive::Outline {
            points: offset(rect_points(size)),
            closed: false,
        },
    };

    Some(RenderedLayer {
        primitive,
        fill: layer.fill.clone(),
        stroke: layer.stroke,
        rotation: layer.geometry.rotation,
        pivot: rect.center(),
        opacity: layer.opacity,
    })
}

/// Paints every visible layer back to front
pub fn paint_layers(painter: &Painter, layers: &[Layer], view: &Viewport, textures: &mut TextureManager) {
    for layer in layers {
        paint_layer(painter, layer, view, textures);
    }
}

pub fn paint_layer(painter: &Painter, layer: &Layer, view: &Viewport, textures: &mut TextureManager) {
    let Some(rendered) = render_layer(layer) else {
        return;
    };
    painter.extend(to_shapes(&rendered, painter, view, textures));
}

fn to_shapes(layer: &RenderedLayer, painter: &Painter, view: &Viewport, textures: &mut TextureManager) -> Vec<Shape> {
    let place = |p: Pos2| view.to_screen(rotate_about(p, layer.pivot, layer.rotation));
    let fade = |color: Color32| color.gamma_multiply(layer.opacity);
    let stroke_width = layer.stroke.width * view.zoom;
    let mut shapes = Vec::new();

    match &layer.primitive {
        Primitive::Outline { points, closed } => {
            // `closed: false` marks a group frame, which has no fill of its own
            if *closed {
                shapes.push(Shape::mesh(fill_mesh(points, layer, &place, &fade)));
            }
            if layer.stroke.is_visible() {
                let screen: Vec<Pos2> = points.iter().map(|p| place(*p)).collect();
                shapes.extend(outline_shapes(screen, true, stroke_width, fade(layer.stroke.color), layer.stroke.dash, view.zoom));
            }
        }

        Primitive::Path { points, thickness } => {
            let screen: Vec<Pos2> = points.iter().map(|p| place(*p)).collect();
            let (color, width) = if layer.stroke.is_visible() {
                (layer.stroke.color, stroke_width)
            } else {
                (layer.fill.base_color(), thickness * view.zoom)
            };
            shapes.extend(outline_shapes(screen, false, width, fade(color), layer.stroke.dash, view.zoom));
        }

        Primitive::Text { rect, style } => {
            let font = FontId::proportional((style.font_size * view.zoom).max(1.0));
            let galley = painter.layout_no_wrap(style.content.clone(), font, fade(style.color));
            let size = galley.size() / view.zoom;
            let x = match style.align {
                TextAlign::Left => rect.left(),
                TextAlign::Center => rect.center().x - size.x * 0.5,
                TextAlign::Right => rect.right() - size.x,
            };
            let anchor = pos2(x, rect.center().y - size.y * 0.5);
            shapes.push(
                TextShape::new(place(anchor), galley, fade(style.color))
                    .with_angle(layer.rotation.to_radians())
                    .into(),
            );
        }

        Primitive::Image { rect, src } => {
            let corners = rect_points(rect.size()).into_iter().map(|p| place(p + rect.min.to_vec2()));
            let texture = src.as_deref().and_then(|src| textures.get(src));
            match texture {
                Some(texture) => {
                    let mut mesh = Mesh::with_texture(texture);
                    let uvs = [pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(1.0, 1.0), pos2(0.0, 1.0)];
                    for (pos, uv) in corners.zip(uvs) {
                        mesh.vertices.push(Vertex {
                            pos,
                            uv,
                            color: fade(Color32::WHITE),
                        });
                    }
                    mesh.add_triangle(0, 1, 2);
                    mesh.add_triangle(0, 2, 3);
                    shapes.push(Shape::mesh(mesh));
                }
                None => {
                    let points: Vec<Pos2> = corners.collect();
                    shapes.push(Shape::convex_polygon(points, fade(PLACEHOLDER_FILL), Stroke::NONE));
                    let label = painter.layout_no_wrap("Image".to_owned(), FontId::proportional(12.0), fade(PLACEHOLDER_TEXT));
                    let pos = view.to_screen(layer.pivot) - label.size() * 0.5;
                    shapes.push(Shape::galley(pos, label, fade(PLACEHOLDER_TEXT)));
                }
            }
            if layer.stroke.is_visible() {
                let screen: Vec<Pos2> = rect_points(rect.size())
                    .into_iter()
                    .map(|p| place(p + rect.min.to_vec2()))
                    .collect();
                shapes.extend(outline_shapes(screen, true, stroke_width, fade(layer.stroke.color), layer.stroke.dash, view.zoom));
            }
        }
    }

    shapes
}

/// Triangulated fill, colored per vertex so gradients show
fn fill_mesh(
    points: &[Pos2],
    layer: &RenderedLayer,
    place: &impl Fn(Pos2) -> Pos2,
    fade: &impl Fn(Color32) -> Color32,
) -> Mesh {
    let mut mesh = Mesh::default();
    if points.len() < 3 {
        return mesh;
    }

    let bounds = Rect::from_points(points);
    let color_at = |p: Pos2| {
        fade(match &layer.fill {
            Fill::Solid(color) => *color,
            Fill::Gradient(gradient) => gradient.sample(gradient.position_in(bounds, p)),
        })
    };

    // The pivot goes last, where `fill_triangles` expects the center
    for p in points.iter().chain(std::iter::once(&layer.pivot)) {
        mesh.vertices.push(Vertex {
            pos: place(*p),
            uv: WHITE_UV,
            color: color_at(*p),
        });
    }
    for [a, b, c] in fill_triangles(points, layer.pivot) {
        mesh.add_triangle(a, b, c);
    }
    mesh
}

fn outline_shapes(
    mut points: Vec<Pos2>,
    closed: bool,
    width: f32,
    color: Color32,
    dash: Option<(f32, f32)>,
    zoom: f32,
) -> Vec<Shape> {
    let stroke = Stroke::new(width, color);
    match dash {
        Some((dash, gap)) if dash > 0.0 => {
            if closed {
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
            }
            Shape::dashed_line(&points, stroke, dash * zoom, gap.max(0.0) * zoom)
        }
        _ if closed => vec![Shape::closed_line(points, stroke)],
        _ => vec![Shape::line(points, stroke)],
    }
}
