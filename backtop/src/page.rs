//! In-memory page host.
//!
//! A `Page` owns a visual tree rooted at `body`, a vertical scroll offset,
//! a virtual clock with its timer queue and an optional smooth-scroll
//! animation. Anything observable (scroll changes, clicks, timer expiry,
//! resizes) is queued as an [`Event`] for whoever drives the page.

use std::collections::VecDeque;
use std::time::Duration;

use crate::config::{ConfigError, PageConfig};
use crate::element::{count_by_id, find_element, find_element_mut, Element};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::host::Host;
use crate::scroll::{ScrollBehavior, ScrollOffsets, ScrollToOptions, SmoothScroll};
use crate::timer::{PendingTimer, TimerId, TimerQueue};

#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    root: Element,
    scroll_top: u32,
    timers: TimerQueue,
    animation: Option<SmoothScroll>,
    next_frame_ms: Option<u64>,
    events: VecDeque<Event>,
    scroll_requests: Vec<ScrollToOptions>,
}

impl Page {
    pub fn new(config: PageConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "[page] created viewport={}px content={}px source={:?}",
            config.viewport_height,
            config.content_height,
            config.scroll_source
        );
        Ok(Self {
            config,
            root: Element::body(),
            scroll_top: 0,
            timers: TimerQueue::new(),
            animation: None,
            next_frame_ms: None,
            events: VecDeque::new(),
            scroll_requests: Vec::new(),
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The visual tree root (`body`).
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> u32 {
        self.config.viewport_height
    }

    pub fn content_height(&self) -> u32 {
        self.config.content_height
    }

    pub fn max_scroll_top(&self) -> u32 {
        self.config
            .content_height
            .saturating_sub(self.config.viewport_height)
    }

    /// Every `scroll_to` request received, oldest first.
    pub fn scroll_requests(&self) -> &[ScrollToOptions] {
        &self.scroll_requests
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&SmoothScroll> {
        self.animation.as_ref()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Queue an event as if the page had produced it.
    pub fn queue_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// User scroll to an absolute offset. Cancels any smooth scroll.
    /// Returns true if the offset changed.
    pub fn set_scroll_top(&mut self, top: u32) -> bool {
        self.stop_animation();
        self.apply_scroll(top)
    }

    /// User scroll by a relative amount. Cancels any smooth scroll.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let top = i64::from(self.scroll_top)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)) as u32;
        self.set_scroll_top(top)
    }

    pub fn set_content_height(&mut self, height: u32) {
        self.config.content_height = height;
        self.apply_scroll(self.scroll_top);
    }

    pub fn resize(&mut self, viewport_height: u32) -> Result<()> {
        if viewport_height == 0 {
            return Err(ConfigError::ZeroViewport.into());
        }
        self.config.viewport_height = viewport_height;
        self.events.push_back(Event::Resize { viewport_height });
        self.apply_scroll(self.scroll_top);
        Ok(())
    }

    /// Activate an element. Only clickable elements with an inline
    /// `Display::Block` can be clicked.
    pub fn click(&mut self, id: &str) -> Result<()> {
        let element =
            find_element(&self.root, id).ok_or_else(|| Error::ElementNotFound(id.to_string()))?;
        if !element.clickable {
            return Err(Error::NotClickable(id.to_string()));
        }
        if !element.is_displayed() {
            return Err(Error::ElementHidden(id.to_string()));
        }
        log::debug!("[page] click {}", id);
        self.events.push_back(Event::click(id));
        Ok(())
    }

    /// Next moment something is scheduled to happen: a timer or a frame.
    pub fn next_wakeup(&self) -> Option<u64> {
        match (self.timers.next_due(), self.next_frame_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Move the clock to the next wakeup no later than `target_ms` and run it.
    ///
    /// Returns false once nothing else is due by `target_ms`; the clock is
    /// then left at `target_ms`.
    pub fn step(&mut self, target_ms: u64) -> Result<bool> {
        let now_ms = self.now_ms();
        if target_ms < now_ms {
            return Err(Error::TimeReversed { now_ms, target_ms });
        }

        match self.next_wakeup() {
            Some(at) if at <= target_ms => {
                self.timers.set_now(at);
                while let Some(id) = self.timers.pop_due() {
                    self.events.push_back(Event::Timer { id });
                }
                if self.next_frame_ms.is_some_and(|frame| frame <= at) {
                    self.run_frame(at);
                }
                Ok(true)
            }
            _ => {
                self.timers.set_now(target_ms);
                Ok(false)
            }
        }
    }

    /// Run the clock forward by `delta`, queueing events as they happen.
    pub fn advance(&mut self, delta: Duration) -> Result<()> {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.advance_to(self.now_ms().saturating_add(delta_ms))
    }

    pub fn advance_to(&mut self, target_ms: u64) -> Result<()> {
        while self.step(target_ms)? {}
        Ok(())
    }

    fn run_frame(&mut self, now_ms: u64) {
        let Some(animation) = self.animation else {
            self.next_frame_ms = None;
            return;
        };

        self.apply_scroll(animation.position_at(now_ms));

        if animation.is_finished(now_ms) {
            log::debug!("[page] smooth scroll finished at {}px", self.scroll_top);
            self.stop_animation();
        } else {
            self.next_frame_ms = Some(now_ms.saturating_add(self.frame_ms()));
        }
    }

    fn stop_animation(&mut self) {
        self.animation = None;
        self.next_frame_ms = None;
    }

    fn frame_ms(&self) -> u64 {
        u64::try_from(self.config.frame_interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1)
    }

    fn apply_scroll(&mut self, top: u32) -> bool {
        let clamped = top.min(self.max_scroll_top());
        if clamped == self.scroll_top {
            return false;
        }
        log::trace!("[page] scroll {} -> {}", self.scroll_top, clamped);
        self.scroll_top = clamped;
        self.events.push_back(Event::Scroll);
        true
    }
}

impl Host for Page {
    fn append_to_root(&mut self, element: Element) -> Result<()> {
        if count_by_id(&self.root, &element.id) > 0 {
            return Err(Error::DuplicateId(element.id));
        }
        log::debug!("[page] append <{}> #{} to body", element.tag, element.id);
        self.root.append_child(element);
        Ok(())
    }

    fn element(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    fn scroll_offsets(&self) -> ScrollOffsets {
        self.config.scroll_source.offsets(self.scroll_top)
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.timers.set_timeout(delay)
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear_timeout(id)
    }

    fn scroll_to(&mut self, options: ScrollToOptions) {
        log::debug!(
            "[page] scroll_to top={} behavior={:?} from={}",
            options.top,
            options.behavior,
            self.scroll_top
        );
        self.scroll_requests.push(options);

        let target = options.top.min(self.max_scroll_top());
        match options.behavior {
            ScrollBehavior::Instant => {
                self.stop_animation();
                self.apply_scroll(target);
            }
            ScrollBehavior::Smooth => {
                if target == self.scroll_top {
                    self.stop_animation();
                    return;
                }
                let now_ms = self.now_ms();
                self.animation = Some(SmoothScroll::new(
                    self.scroll_top,
                    target,
                    now_ms,
                    self.config.smooth_scroll,
                ));
                self.next_frame_ms = Some(now_ms.saturating_add(self.frame_ms()));
            }
        }
    }
}
