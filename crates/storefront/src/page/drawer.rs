//! Open/closed state of the cart drawer.

/// The cart drawer is either closed or open; nothing in between.
///
/// Transitions: the open trigger and add-to-cart open it, the close button
/// and the overlay close it. Cart edits inside the drawer leave it as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    /// Open the drawer. Returns true if it was closed.
    pub fn open(&mut self) -> bool {
        let changed = *self == Self::Closed;
        *self = Self::Open;
        changed
    }

    /// Close the drawer. Returns true if it was open.
    pub fn close(&mut self) -> bool {
        let changed = *self == Self::Open;
        *self = Self::Closed;
        changed
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
