use crate::scene::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FillRect { rect: Rect, brush: Brush },
    FillRoundedRect { rrect: RoundedRect, brush: Brush },
    FillPath { path: Path, brush: Brush },
    /// Start an offscreen layer; everything until the matching `PopLayer` is
    /// composited back with `alpha`.
    PushLayer { bounds: Rect, alpha: f32 },
    PopLayer,
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub commands: Vec<Command>,
}

impl DisplayList {
    /// Number of offscreen layers opened in this list.
    pub fn layer_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::PushLayer { .. }))
            .count()
    }
}
