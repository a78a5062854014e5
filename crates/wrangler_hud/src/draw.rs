//! Backend-agnostic draw lists.
//!
//! The HUD never talks to a graphics API. Each overlay produces a
//! [`DrawList`] which the host replays with its own line and text drawing.

use glam::{Vec2, Vec3, Vec4};
use smallvec::SmallVec;
use wrangler_scene::DrawStage;

/// Depth comparison for 3D lines. `Greater` draws only occluded parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthTest {
    Always,
    LessEqual,
    Greater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent segments, two vertices each.
    Lines,
    LineStrip,
}

/// Vertices of one batch. Most batches are a single segment.
pub type Vertices = SmallVec<[Vec3; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Lines3d {
        topology: Topology,
        vertices: Vertices,
        color: Vec4,
        depth: DepthTest,
    },
    Text2d {
        position: Vec2,
        text: String,
        color: Vec4,
        size: f32,
    },
    Rect2d {
        min: Vec2,
        max: Vec2,
        color: Vec4,
        corner_radius: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub stage: DrawStage,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    #[must_use]
    pub fn new(stage: DrawStage) -> Self {
        Self {
            stage,
            commands: Vec::new(),
        }
    }

    pub fn lines(&mut self, vertices: impl IntoIterator<Item = Vec3>, color: Vec4, depth: DepthTest) {
        self.push_3d(Topology::Lines, vertices, color, depth);
    }

    pub fn line_strip(&mut self, vertices: impl IntoIterator<Item = Vec3>, color: Vec4, depth: DepthTest) {
        self.push_3d(Topology::LineStrip, vertices, color, depth);
    }

    /// A segment drawn solid where visible and faint where occluded.
    pub fn segment_with_xray(&mut self, a: Vec3, b: Vec3, color: Vec4, xray: Vec4) {
        self.lines([a, b], color, DepthTest::LessEqual);
        self.lines([a, b], xray, DepthTest::Greater);
    }

    fn push_3d(&mut self, topology: Topology, vertices: impl IntoIterator<Item = Vec3>, color: Vec4, depth: DepthTest) {
        let vertices: Vertices = vertices.into_iter().collect();
        if vertices.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Lines3d {
            topology,
            vertices,
            color,
            depth,
        });
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, color: Vec4, size: f32) {
        self.commands.push(DrawCommand::Text2d {
            position,
            text: text.into(),
            color,
            size,
        });
    }

    pub fn rect(&mut self, min: Vec2, max: Vec2, color: Vec4, corner_radius: f32) {
        self.commands.push(DrawCommand::Rect2d {
            min,
            max,
            color,
            corner_radius,
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text2d { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of 3D batches using `depth`.
    #[must_use]
    pub fn count_depth(&self, depth: DepthTest) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Lines3d { depth: d, .. } if *d == depth))
            .count()
    }
}
