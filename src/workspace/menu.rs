/// Actions offered by the per-file context menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Export,
    Rename,
    Delete,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Export, MenuItem::Rename, MenuItem::Delete];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Export => "Export",
            MenuItem::Rename => "Rename",
            MenuItem::Delete => "Delete",
        }
    }
}

/// An open context menu anchored at a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub file: String,
    pub x: u16,
    pub y: u16,
    pub highlighted: usize,
}

impl ContextMenu {
    pub fn new(file: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            file: file.into(),
            x,
            y,
            highlighted: 0,
        }
    }

    pub fn item(&self) -> MenuItem {
        MenuItem::ALL[self.highlighted.min(MenuItem::ALL.len() - 1)]
    }

    pub fn up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.highlighted = (self.highlighted + 1).min(MenuItem::ALL.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut menu = ContextMenu::new("a.md", 0, 0);
        menu.up();
        assert_eq!(menu.item(), MenuItem::Export);
        menu.down();
        menu.down();
        menu.down();
        assert_eq!(menu.item(), MenuItem::Delete);
    }
}
