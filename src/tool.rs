use crate::layer::LayerKind;
use serde::{Deserialize, Serialize};

/// The active editor tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Text,
    Rectangle,
    Circle,
    Ellipse,
    Triangle,
    Star,
    Polygon,
    Arrow,
    Line,
}

impl Tool {
    pub const ALL: [Tool; 10] = [
        Tool::Select,
        Tool::Text,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Ellipse,
        Tool::Triangle,
        Tool::Star,
        Tool::Polygon,
        Tool::Arrow,
        Tool::Line,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Text => "Text",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Ellipse => "Ellipse",
            Tool::Triangle => "Triangle",
            Tool::Star => "Star",
            Tool::Polygon => "Polygon",
            Tool::Arrow => "Arrow",
            Tool::Line => "Line",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Select => "⬉",
            Tool::Text => "T",
            Tool::Rectangle => "◻",
            Tool::Circle => "○",
            Tool::Ellipse => "⬭",
            Tool::Triangle => "△",
            Tool::Star => "☆",
            Tool::Polygon => "⬡",
            Tool::Arrow => "➡",
            Tool::Line => "╱",
        }
    }

    /// The layer kind this tool creates, `None` for the select tool
    pub fn layer_kind(&self) -> Option<LayerKind> {
        match self {
            Tool::Select => None,
            Tool::Text => Some(LayerKind::Text),
            Tool::Rectangle => Some(LayerKind::Rectangle),
            Tool::Circle => Some(LayerKind::Circle),
            Tool::Ellipse => Some(LayerKind::Ellipse),
            Tool::Triangle => Some(LayerKind::Triangle),
            Tool::Star => Some(LayerKind::Star),
            Tool::Polygon => Some(LayerKind::Polygon),
            Tool::Arrow => Some(LayerKind::Arrow),
            Tool::Line => Some(LayerKind::Line),
        }
    }

    pub fn creates_layers(&self) -> bool {
        self.layer_kind().is_some()
    }
}
