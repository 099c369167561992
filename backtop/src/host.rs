//! Host environment seam.
//!
//! The widget never touches a concrete page. Everything it needs from its
//! surroundings goes through this trait: the visual tree, the scroll
//! readouts, delayed callbacks and viewport scrolling.

use std::time::Duration;

use crate::element::Element;
use crate::error::Result;
use crate::scroll::{ScrollOffsets, ScrollToOptions};
use crate::timer::TimerId;

pub trait Host {
    /// Append `element` as the last child of the visual tree root.
    fn append_to_root(&mut self, element: Element) -> Result<()>;

    fn element(&self, id: &str) -> Option<&Element>;

    fn element_mut(&mut self, id: &str) -> Option<&mut Element>;

    /// Current vertical scroll readouts.
    fn scroll_offsets(&self) -> ScrollOffsets;

    /// Schedule a one-shot timer. Its expiry is delivered back as
    /// [`Event::Timer`](crate::Event::Timer).
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns false if it was not pending.
    fn clear_timeout(&mut self, id: TimerId) -> bool;

    /// Ask the host to move the viewport.
    fn scroll_to(&mut self, options: ScrollToOptions);
}
