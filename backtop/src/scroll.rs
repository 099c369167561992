use std::time::Duration;

use crate::transitions::{lerp_px, TransitionConfig};

/// The two redundant vertical scroll readouts a page exposes.
///
/// Depending on the rendering mode only one of them tracks the viewport,
/// the other stays at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffsets {
    pub body: u32,
    pub document_element: u32,
}

impl ScrollOffsets {
    pub fn new(body: u32, document_element: u32) -> Self {
        Self {
            body,
            document_element,
        }
    }

    /// Effective vertical offset: the larger of the two readouts.
    pub fn top(&self) -> u32 {
        self.body.max(self.document_element)
    }
}

/// Which readout follows the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollSource {
    /// Quirks mode: the body element scrolls.
    Body,
    /// Standards mode: the document element scrolls.
    #[default]
    DocumentElement,
}

impl ScrollSource {
    pub fn offsets(self, top: u32) -> ScrollOffsets {
        match self {
            ScrollSource::Body => ScrollOffsets::new(top, 0),
            ScrollSource::DocumentElement => ScrollOffsets::new(0, top),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump straight to the target.
    #[default]
    Instant,
    /// Animate to the target over several frames.
    Smooth,
}

/// A viewport scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToOptions {
    pub top: u32,
    pub behavior: ScrollBehavior,
}

impl ScrollToOptions {
    pub fn instant(top: u32) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Instant,
        }
    }

    pub fn smooth(top: u32) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// An in-flight smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    pub from: u32,
    pub to: u32,
    pub start_ms: u64,
    pub config: TransitionConfig,
}

impl SmoothScroll {
    pub fn new(from: u32, to: u32, start_ms: u64, config: TransitionConfig) -> Self {
        Self {
            from,
            to,
            start_ms,
            config,
        }
    }

    /// Offset at `now_ms`. Lands exactly on `to` once finished.
    pub fn position_at(&self, now_ms: u64) -> u32 {
        if self.is_finished(now_ms) {
            return self.to;
        }
        let elapsed = Duration::from_millis(now_ms.saturating_sub(self.start_ms));
        lerp_px(self.from, self.to, self.config.progress(elapsed))
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms()
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms())
    }

    fn duration_ms(&self) -> u64 {
        u64::try_from(self.config.duration.as_millis()).unwrap_or(u64::MAX)
    }
}
