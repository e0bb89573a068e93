/// Open/closed state for a modal, drawer or menu.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Disclosure {
    opened: bool,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.opened = true;
    }

    pub fn close(&mut self) {
        self.opened = false;
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }
}
