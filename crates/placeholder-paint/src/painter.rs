use crate::display_list::{Command, DisplayList, Viewport};
use crate::scene::*;

pub struct Painter {
    list: DisplayList,
    layer_depth: usize,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                commands: Vec::new(),
            },
            layer_depth: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.list.viewport
    }

    pub fn rect(&mut self, rect: Rect, brush: Brush) {
        self.list.commands.push(Command::FillRect { rect, brush });
    }

    pub fn rounded_rect(&mut self, rrect: RoundedRect, brush: Brush) {
        self.list
            .commands
            .push(Command::FillRoundedRect { rrect, brush });
    }

    pub fn fill_path(&mut self, path: Path, brush: Brush) {
        self.list.commands.push(Command::FillPath { path, brush });
    }

    /// Fill an outline, picking the cheapest command for its kind.
    pub fn outline(&mut self, outline: &Outline, brush: Brush) {
        match outline {
            Outline::Rectangle(rect) => self.rect(*rect, brush),
            Outline::Rounded(rrect) => self.rounded_rect(*rrect, brush),
            Outline::Generic(path) => self.fill_path(path.clone(), brush),
        }
    }

    pub fn push_layer(&mut self, bounds: Rect, alpha: f32) {
        self.layer_depth += 1;
        self.list.commands.push(Command::PushLayer { bounds, alpha });
    }

    pub fn pop_layer(&mut self) {
        if self.layer_depth > 0 {
            self.layer_depth -= 1;
            self.list.commands.push(Command::PopLayer);
        }
    }

    /// Get a reference to the display list recorded so far.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Close any layer left open and hand out the display list.
    pub fn finish(mut self) -> DisplayList {
        while self.layer_depth > 0 {
            self.pop_layer();
        }
        self.list
    }
}
