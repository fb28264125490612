use crate::geometry::Color;
use crate::math::Point2;

use super::Renderer;

/// A single call received by a [`RecordingPen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    MoveTo(Point2),
    LineTo(Point2),
    SetColor(Color),
    Show,
    Hide,
}

/// An in-memory renderer that keeps every command since the last clear.
///
/// Used by headless hosts and tests.
#[derive(Debug, Clone)]
pub struct RecordingPen {
    commands: Vec<PenCommand>,
    color: Color,
    visible: bool,
    clears: usize,
}

impl Default for RecordingPen {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            color: Color::BLACK,
            visible: true,
            clears: 0,
        }
    }
}

impl RecordingPen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received since the last [`Renderer::clear`].
    #[must_use]
    pub fn commands(&self) -> &[PenCommand] {
        &self.commands
    }

    /// Current pen colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the pen cursor is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many times the drawing has been cleared.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Last position the pen was moved or drawn to.
    #[must_use]
    pub fn position(&self) -> Option<Point2> {
        self.commands.iter().rev().find_map(|c| match c {
            PenCommand::MoveTo(p) | PenCommand::LineTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Connected polylines: each `MoveTo` starts a new stroke.
    ///
    /// Segments drawn before any `MoveTo` start from the origin.
    #[must_use]
    pub fn strokes(&self) -> Vec<Vec<Point2>> {
        let mut strokes: Vec<Vec<Point2>> = Vec::new();
        for command in &self.commands {
            match *command {
                PenCommand::MoveTo(p) => strokes.push(vec![p]),
                PenCommand::LineTo(p) => match strokes.last_mut() {
                    Some(stroke) => stroke.push(p),
                    None => strokes.push(vec![Point2::origin(), p]),
                },
                _ => {}
            }
        }
        strokes
    }

    /// Number of segments drawn since the last clear.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PenCommand::LineTo(_)))
            .count()
    }
}

impl Renderer for RecordingPen {
    fn move_to(&mut self, point: Point2) {
        self.commands.push(PenCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point2) {
        self.commands.push(PenCommand::LineTo(point));
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.commands.push(PenCommand::SetColor(color));
    }

    fn show(&mut self) {
        self.visible = true;
        self.commands.push(PenCommand::Show);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.commands.push(PenCommand::Hide);
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }
}
