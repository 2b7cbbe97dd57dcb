//! Vertex generation for the layer kinds that are not plain boxes.
//!
//! All functions return points relative to the layer box's top-left corner,
//! in canvas units, before rotation.

use egui::{Pos2, Vec2, pos2};
use std::f32::consts::{PI, TAU};

/// Segments used when an ellipse has to be drawn as a polygon
pub const ELLIPSE_SEGMENTS: usize = 64;

/// Star outline: `points * 2` vertices alternating between the outer radius
/// (half the box) and `inner_radius` times that, starting straight up.
pub fn star_points(size: Vec2, points: u32, inner_radius: f32) -> Vec<Pos2> {
    let center = (size * 0.5).to_pos2();
    let outer = size * 0.5;
    let inner = outer * inner_radius;
    let steps = points as usize * 2;

    (0..steps)
        .map(|i| {
            let angle = -PI / 2.0 + i as f32 * PI / points as f32;
            let radius = if i % 2 == 0 { outer } else { inner };
            pos2(
                center.x + radius.x * angle.cos(),
                center.y + radius.y * angle.sin(),
            )
        })
        .collect()
}

/// Regular polygon with `sides` vertices, the first one straight up
pub fn polygon_points(size: Vec2, sides: u32) -> Vec<Pos2> {
    let center = (size * 0.5).to_pos2();
    let radius = size * 0.5;

    (0..sides)
        .map(|i| {
            let angle = -PI / 2.0 + i as f32 * TAU / sides as f32;
            pos2(
                center.x + radius.x * angle.cos(),
                center.y + radius.y * angle.sin(),
            )
        })
        .collect()
}

/// Isosceles triangle pointing up
pub fn triangle_points(size: Vec2) -> Vec<Pos2> {
    vec![
        pos2(size.x * 0.5, 0.0),
        pos2(size.x, size.y),
        pos2(0.0, size.y),
    ]
}

/// Right-pointing arrow: a shaft of half the box height and a head taking
/// the last third of the width
pub fn arrow_points(size: Vec2) -> Vec<Pos2> {
    let head_start = size.x * (2.0 / 3.0);
    let shaft_top = size.y * 0.25;
    let shaft_bottom = size.y * 0.75;
    vec![
        pos2(0.0, shaft_top),
        pos2(head_start, shaft_top),
        pos2(head_start, 0.0),
        pos2(size.x, size.y * 0.5),
        pos2(head_start, size.y),
        pos2(head_start, shaft_bottom),
        pos2(0.0, shaft_bottom),
    ]
}

/// Horizontal line through the middle of the box
pub fn line_points(size: Vec2) -> [Pos2; 2] {
    [pos2(0.0, size.y * 0.5), pos2(size.x, size.y * 0.5)]
}

/// Ellipse inscribed in the box
pub fn ellipse_points(size: Vec2, segments: usize) -> Vec<Pos2> {
    let center = (size * 0.5).to_pos2();
    let radius = size * 0.5;
    (0..segments)
        .map(|i| {
            let angle = i as f32 * TAU / segments as f32;
            pos2(
                center.x + radius.x * angle.cos(),
                center.y + radius.y * angle.sin(),
            )
        })
        .collect()
}

/// Box corners, clockwise from the top-left
pub fn rect_points(size: Vec2) -> Vec<Pos2> {
    vec![
        pos2(0.0, 0.0),
        pos2(size.x, 0.0),
        pos2(size.x, size.y),
        pos2(0.0, size.y),
    ]
}

/// Triangles covering the simple polygon `points`, as vertex indices.
///
/// When every edge faces `center` the result is a fan around it, with index
/// `points.len()` standing for `center`, so radial fills keep their middle
/// color. Other outlines (arrows) are ear-clipped and never use that index.
pub fn fill_triangles(points: &[Pos2], center: Pos2) -> Vec<[u32; 3]> {
    let n = points.len();
    let orientation = signed_area(points).signum();
    if n < 3 || orientation == 0.0 {
        return Vec::new();
    }

    let edges = || (0..n).map(|i| (points[i], points[(i + 1) % n]));
    if edges().all(|(a, b)| cross(b - a, center - a) * orientation >= 0.0) {
        let n = n as u32;
        return (0..n).map(|i| [n, i, (i + 1) % n]).collect();
    }
    ear_clip(points, orientation)
}

fn ear_clip(points: &[Pos2], orientation: f32) -> Vec<[u32; 3]> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let n = remaining.len();
        let corner = |i: usize| (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
        let ear = (0..n).find(|&i| {
            let (a, b, c) = corner(i);
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            cross(pb - pa, pc - pb) * orientation > 0.0
                && remaining
                    .iter()
                    .filter(|&&j| j != a && j != b && j != c)
                    .all(|&j| !in_triangle(points[j], pa, pb, pc))
        });
        // Only degenerate outlines run out of ears; fan whatever is left
        let Some(i) = ear else { break };
        let (a, b, c) = corner(i);
        triangles.push([a as u32, b as u32, c as u32]);
        remaining.remove(i);
    }

    for pair in remaining.windows(2).skip(1) {
        triangles.push([remaining[0] as u32, pair[0] as u32, pair[1] as u32]);
    }
    triangles
}

/// Twice the signed area; positive for clockwise outlines on screen
fn signed_area(points: &[Pos2]) -> f32 {
    (0..points.len())
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % points.len()]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Inclusive of the edges
fn in_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Rotates `point` by `degrees` (clockwise on screen) around `pivot`
pub fn rotate_about(point: Pos2, pivot: Pos2, degrees: f32) -> Pos2 {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - pivot;
    pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}
