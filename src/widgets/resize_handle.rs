use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

/// Screen-space radius of a resize handle, also used for hit testing
pub const HANDLE_RADIUS: f32 = 8.0;

const HANDLE_FILL: Color32 = Color32::WHITE;
const HANDLE_STROKE: Color32 = Color32::from_rgb(30, 120, 255);

/// One of the eight resize handles around a selected layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::North => "n",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::East => "e",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::South => "s",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::West => "w",
        }
    }

    /// Which edges this handle drags: (left, top, right, bottom)
    pub fn edges(&self) -> (bool, bool, bool, bool) {
        match self {
            ResizeHandle::NorthWest => (true, true, false, false),
            ResizeHandle::North => (false, true, false, false),
            ResizeHandle::NorthEast => (false, true, true, false),
            ResizeHandle::East => (false, false, true, false),
            ResizeHandle::SouthEast => (false, false, true, true),
            ResizeHandle::South => (false, false, false, true),
            ResizeHandle::SouthWest => (true, false, false, true),
            ResizeHandle::West => (true, false, false, false),
        }
    }

    /// Where this handle sits on `rect`
    pub fn position(&self, rect: Rect) -> Pos2 {
        let center = rect.center();
        match self {
            ResizeHandle::NorthWest => rect.left_top(),
            ResizeHandle::North => Pos2::new(center.x, rect.top()),
            ResizeHandle::NorthEast => rect.right_top(),
            ResizeHandle::East => Pos2::new(rect.right(), center.y),
            ResizeHandle::SouthEast => rect.right_bottom(),
            ResizeHandle::South => Pos2::new(center.x, rect.bottom()),
            ResizeHandle::SouthWest => rect.left_bottom(),
            ResizeHandle::West => Pos2::new(rect.left(), center.y),
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ResizeHandle::NorthWest | ResizeHandle::SouthEast => CursorIcon::ResizeNwSe,
            ResizeHandle::NorthEast | ResizeHandle::SouthWest => CursorIcon::ResizeNeSw,
            ResizeHandle::North | ResizeHandle::South => CursorIcon::ResizeVertical,
            ResizeHandle::East | ResizeHandle::West => CursorIcon::ResizeHorizontal,
        }
    }

    /// Draw the handle as a small square centered on `center`
    pub fn draw(&self, painter: &Painter, center: Pos2, hovered: bool) {
        let handle = Rect::from_center_size(center, Vec2::splat(HANDLE_RADIUS));
        let fill = if hovered { HANDLE_STROKE } else { HANDLE_FILL };
        painter.rect_filled(handle, 2.0, fill);
        painter.rect_stroke(handle, 2.0, Stroke::new(1.5, HANDLE_STROKE));
    }
}
