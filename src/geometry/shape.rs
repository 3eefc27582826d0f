use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// Number of segments used when a circular clip has to be turned into a polygon
pub const CIRCLE_SEGMENTS: usize = 64;

/// Clip shape applied to an overlay image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Rectangle, Shape::Circle, Shape::Triangle];

    pub fn label(self) -> &'static str {
        match self {
            Shape::Rectangle => "Rectangle",
            Shape::Circle => "Circle",
            Shape::Triangle => "Triangle",
        }
    }
}

/// The area an overlay image stays visible in
#[derive(Debug, Clone, PartialEq)]
pub enum ClipRegion {
    /// The full destination box is drawn.
    Unclipped,
    Circle { center: Pos2, radius: f32 },
    Triangle([Pos2; 3]),
}

/// Computes the clip region for a bounding box and shape.
///
/// The circle radius is half the box *width*, so a box that is wider than it
/// is tall gets a circle that spills past its top and bottom edges.
pub fn clip_region(bounds: Rect, shape: Shape) -> ClipRegion {
    let (x, y, w, h) = (bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
    match shape {
        Shape::Rectangle => ClipRegion::Unclipped,
        Shape::Circle => ClipRegion::Circle {
            center: Pos2::new(x + w / 2.0, y + h / 2.0),
            radius: w / 2.0,
        },
        Shape::Triangle => ClipRegion::Triangle([
            Pos2::new(x + w / 2.0, y),
            Pos2::new(x, y + h),
            Pos2::new(x + w, y + h),
        ]),
    }
}

/// Rectangular containment used for hit-testing every shape, edges included.
pub fn point_in_bounds(bounds: Rect, point: Pos2) -> bool {
    point.x >= bounds.min.x
        && point.x <= bounds.max.x
        && point.y >= bounds.min.y
        && point.y <= bounds.max.y
}

impl ClipRegion {
    /// The visible outline of an image drawn into `dest` under this clip, as a
    /// convex polygon in drawing order. Empty when nothing would be visible.
    pub fn visible_polygon(&self, dest: Rect) -> Vec<Pos2> {
        let outline = match self {
            ClipRegion::Unclipped => vec![
                dest.left_top(),
                dest.right_top(),
                dest.right_bottom(),
                dest.left_bottom(),
            ],
            ClipRegion::Circle { center, radius } => (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                    Pos2::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    )
                })
                .collect(),
            ClipRegion::Triangle(points) => points.to_vec(),
        };
        clip_convex_to_rect(&outline, dest)
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Left(f32),
    Right(f32),
    Top(f32),
    Bottom(f32),
}

impl Edge {
    fn inside(self, p: Pos2) -> bool {
        match self {
            Edge::Left(x) => p.x >= x,
            Edge::Right(x) => p.x <= x,
            Edge::Top(y) => p.y >= y,
            Edge::Bottom(y) => p.y <= y,
        }
    }

    fn intersect(self, a: Pos2, b: Pos2) -> Pos2 {
        match self {
            Edge::Left(x) | Edge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Pos2::new(x, a.y + t * (b.y - a.y))
            }
            Edge::Top(y) | Edge::Bottom(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Pos2::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Sutherland-Hodgman clipping of a convex polygon against an axis-aligned rectangle.
pub fn clip_convex_to_rect(polygon: &[Pos2], rect: Rect) -> Vec<Pos2> {
    let mut output = polygon.to_vec();

    let edges = [
        Edge::Left(rect.min.x),
        Edge::Right(rect.max.x),
        Edge::Top(rect.min.y),
        Edge::Bottom(rect.max.y),
    ];

    for edge in edges {
        let Some(&last) = output.last() else {
            break;
        };
        let input = std::mem::take(&mut output);
        let mut previous = last;
        for &current in &input {
            match (edge.inside(current), edge.inside(previous)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(edge.intersect(previous, current));
                    output.push(current);
                }
                (false, true) => output.push(edge.intersect(previous, current)),
                (false, false) => {}
            }
            previous = current;
        }
    }

    if output.len() < 3 { Vec::new() } else { output }
}
