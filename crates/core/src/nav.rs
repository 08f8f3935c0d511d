//! Navigation seam.
//!
//! Leaving the goal entry screen is the enclosing application's job. The
//! component only ever asks to go back: once after a successful submit, once
//! on cancel.

/// Returns the user to the previous view.
pub trait Navigator {
    /// Leave the goal entry screen.
    fn go_back(&mut self);
}
