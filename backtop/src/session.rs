//! A page together with its mounted widget.
//!
//! The session owns both halves, so nothing lives in global state. Every
//! user action is applied to the page first and the resulting events are
//! pumped into the widget before the action returns.

use std::time::Duration;

use crate::config::{PageConfig, WidgetConfig};
use crate::error::Result;
use crate::event::Event;
use crate::page::Page;
use crate::widget::{Phase, ScrollTopWidget};

#[derive(Debug)]
pub struct Session {
    page: Page,
    widget: ScrollTopWidget,
}

impl Session {
    pub fn new(page_config: PageConfig, widget_config: WidgetConfig) -> Result<Self> {
        let mut page = Page::new(page_config)?;
        let widget = ScrollTopWidget::mount(&mut page, widget_config)?;
        Ok(Self { page, widget })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn widget(&self) -> &ScrollTopWidget {
        &self.widget
    }

    pub fn phase(&self) -> Result<Phase> {
        self.widget.phase(&self.page)
    }

    pub fn scroll_to(&mut self, top: u32) -> Result<()> {
        self.page.set_scroll_top(top);
        self.pump()?;
        Ok(())
    }

    pub fn scroll_by(&mut self, delta: i64) -> Result<()> {
        self.page.scroll_by(delta);
        self.pump()?;
        Ok(())
    }

    /// Click an element by id.
    pub fn click(&mut self, id: &str) -> Result<()> {
        self.page.click(id)?;
        self.pump()?;
        Ok(())
    }

    /// Click the back-to-top button.
    pub fn activate(&mut self) -> Result<()> {
        let id = self.widget.id().to_string();
        self.click(&id)
    }

    pub fn resize(&mut self, viewport_height: u32) -> Result<()> {
        self.page.resize(viewport_height)?;
        self.pump()?;
        Ok(())
    }

    pub fn set_content_height(&mut self, height: u32) -> Result<()> {
        self.page.set_content_height(height);
        self.pump()?;
        Ok(())
    }

    /// Deliver an event to the widget through the page queue.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        self.page.queue_event(event);
        self.pump()?;
        Ok(())
    }

    /// Run virtual time forward, handling every timer and frame in order.
    pub fn advance(&mut self, delta: Duration) -> Result<()> {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        let target_ms = self.page.now_ms().saturating_add(delta_ms);
        while self.page.step(target_ms)? {
            self.pump()?;
        }
        self.pump()?;
        Ok(())
    }

    /// Hand every queued page event to the widget.
    /// Returns how many events the widget reacted to.
    pub fn pump(&mut self) -> Result<usize> {
        let mut handled = 0;
        while self.page.has_pending_events() {
            for event in self.page.drain_events() {
                if self.widget.handle_event(&mut self.page, &event)? {
                    handled += 1;
                }
            }
        }
        Ok(handled)
    }
}
