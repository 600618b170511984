/// Open/closed state of the topic list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// A document-level click. Clicks inside the selector are left to the
    /// header and item handlers.
    pub fn on_document_click(&mut self, inside: bool) {
        if self.open && !inside {
            self.open = false;
        }
    }
}
