//! Widget and page configuration types.

use std::time::Duration;

use thiserror::Error;

use crate::scroll::ScrollSource;
use crate::transitions::{Easing, TransitionConfig};

/// Element id given to the button.
pub const DEFAULT_ID: &str = "backToTopBtn";

/// Button label.
pub const DEFAULT_LABEL: &str = "⬆ Top";

/// Scroll offset (px) the page must exceed before the button shows.
pub const DEFAULT_THRESHOLD: u32 = 400;

/// Grace period between fading out and leaving layout.
pub const DEFAULT_FADE_DELAY: Duration = Duration::from_millis(300);

/// How the widget manages its deferred hide timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HidePolicy {
    /// Cancel pending hides when the button is shown again, and keep at most
    /// one hide pending while below the threshold.
    #[default]
    CancelPending,

    /// Never cancel. Every below-threshold scroll schedules its own check and
    /// stale checks fail their opacity guard.
    RecheckOnly,
}

/// Configuration for a [`ScrollTopWidget`](crate::ScrollTopWidget).
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Element id of the button.
    pub id: String,

    /// Text content of the button.
    pub label: String,

    /// The button shows when the scroll offset is strictly greater than this.
    pub threshold: u32,

    /// Delay between fading out and the display check.
    pub fade_delay: Duration,

    pub hide_policy: HidePolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            label: DEFAULT_LABEL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            fade_delay: DEFAULT_FADE_DELAY,
            hide_policy: HidePolicy::default(),
        }
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn fade_delay(mut self, delay: Duration) -> Self {
        self.fade_delay = delay;
        self
    }

    pub fn hide_policy(mut self, policy: HidePolicy) -> Self {
        self.hide_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if self.label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(())
    }
}

/// Geometry and timing of an in-memory [`Page`](crate::Page).
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Visible height of the viewport in px.
    pub viewport_height: u32,

    /// Total height of the scrollable content in px.
    pub content_height: u32,

    /// Which of the two scroll readouts the page writes.
    pub scroll_source: ScrollSource,

    /// Duration and easing of smooth scrolls.
    pub smooth_scroll: TransitionConfig,

    /// Time between animation frames.
    pub frame_interval: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport_height: 800,
            content_height: 4000,
            scroll_source: ScrollSource::default(),
            smooth_scroll: TransitionConfig::new(Duration::from_millis(400), Easing::EaseInOut),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn content_height(mut self, height: u32) -> Self {
        self.content_height = height;
        self
    }

    pub fn scroll_source(mut self, source: ScrollSource) -> Self {
        self.scroll_source = source;
        self
    }

    pub fn smooth_scroll(mut self, duration: Duration, easing: Easing) -> Self {
        self.smooth_scroll = TransitionConfig::new(duration, easing);
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_height == 0 {
            return Err(ConfigError::ZeroViewport);
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Widget id must not be empty")]
    EmptyId,

    #[error("Widget label must not be empty")]
    EmptyLabel,

    #[error("Viewport height must be greater than zero")]
    ZeroViewport,

    #[error("Frame interval must be greater than zero")]
    ZeroFrameInterval,
}
