use crate::timer::TimerId;

/// Events queued by the page and delivered to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The page scroll offset changed. Handlers read the offsets from the host.
    Scroll,
    /// An element was activated.
    Click { target: Option<String> },
    /// A timeout scheduled through the host elapsed.
    Timer { id: TimerId },
    /// The viewport changed height.
    Resize { viewport_height: u32 },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: Some(target.into()),
        }
    }

    /// True if this is a click aimed at `id`.
    pub fn is_click_on(&self, id: &str) -> bool {
        matches!(self, Event::Click { target: Some(target) } if target == id)
    }
}
