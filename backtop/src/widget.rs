//! The back-to-top button.
//!
//! Two inline properties carry all of the widget's state: the display mode
//! and the opacity. Scrolling past the threshold shows the button at full
//! opacity. Scrolling back drops the opacity to zero right away and leaves
//! the display change to a deferred check, so a host-side opacity transition
//! can play before the button leaves layout. The check re-reads the opacity
//! when it fires and does nothing if the button was shown again meanwhile.

use crate::config::{HidePolicy, WidgetConfig};
use crate::element::{Display, Element};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::host::Host;
use crate::scroll::ScrollToOptions;
use crate::timer::TimerId;

/// Visibility phase, derived from the display/opacity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not displayed.
    Hidden,
    /// Displayed and opaque.
    Visible,
    /// Displayed at zero opacity, waiting for the deferred hide.
    Fading,
}

impl Phase {
    pub fn of(element: &Element) -> Self {
        if !element.is_displayed() {
            Phase::Hidden
        } else if element.is_transparent() {
            Phase::Fading
        } else {
            Phase::Visible
        }
    }
}

#[derive(Debug)]
pub struct ScrollTopWidget {
    config: WidgetConfig,
    /// Hide checks scheduled and not yet delivered.
    pending_hides: Vec<TimerId>,
}

impl ScrollTopWidget {
    /// Create the button and append it as the last child of the host's root.
    pub fn mount<H: Host>(host: &mut H, config: WidgetConfig) -> Result<Self> {
        config.validate()?;

        let button = Element::button(config.label.clone())
            .id(config.id.clone())
            .data("role", "back-to-top");
        host.append_to_root(button)?;

        log::debug!(
            "[widget] mounted #{} threshold={}px fade_delay={:?} policy={:?}",
            config.id,
            config.threshold,
            config.fade_delay,
            config.hide_policy
        );

        Ok(Self {
            config,
            pending_hides: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Hide checks that have been scheduled but not delivered yet.
    pub fn pending_hides(&self) -> &[TimerId] {
        &self.pending_hides
    }

    /// The button element as the host currently holds it.
    pub fn element<'a, H: Host>(&self, host: &'a H) -> Result<&'a Element> {
        host.element(&self.config.id)
            .ok_or_else(|| Error::ElementNotFound(self.config.id.clone()))
    }

    pub fn phase<H: Host>(&self, host: &H) -> Result<Phase> {
        self.element(host).map(Phase::of)
    }

    /// Route a page event to the matching handler.
    /// Returns true if the widget reacted to it.
    pub fn handle_event<H: Host>(&mut self, host: &mut H, event: &Event) -> Result<bool> {
        match event {
            Event::Scroll => {
                self.on_scroll(host)?;
                Ok(true)
            }
            Event::Click { .. } if event.is_click_on(&self.config.id) => {
                self.on_click(host);
                Ok(true)
            }
            Event::Timer { id } => self.on_timer(host, *id),
            _ => Ok(false),
        }
    }

    /// Scroll handler: show past the threshold, otherwise fade and schedule
    /// the deferred hide.
    pub fn on_scroll<H: Host>(&mut self, host: &mut H) -> Result<()> {
        let offset = host.scroll_offsets().top();

        if offset > self.config.threshold {
            let button = self.button_mut(host)?;
            button.set_display(Display::Block);
            button.set_opacity(1.0);

            if self.config.hide_policy == HidePolicy::CancelPending {
                for id in self.pending_hides.drain(..) {
                    host.clear_timeout(id);
                }
            }
            log::trace!("[widget] offset {}px, shown", offset);
        } else {
            self.button_mut(host)?.set_opacity(0.0);

            let schedule = match self.config.hide_policy {
                HidePolicy::CancelPending => self.pending_hides.is_empty(),
                HidePolicy::RecheckOnly => true,
            };
            if schedule {
                let id = host.set_timeout(self.config.fade_delay);
                self.pending_hides.push(id);
                log::trace!("[widget] offset {}px, fading, hide check {}", offset, id);
            }
        }

        Ok(())
    }

    /// Activation handler: one smooth scroll to the top.
    pub fn on_click<H: Host>(&mut self, host: &mut H) {
        log::debug!("[widget] #{} activated, scrolling to top", self.config.id);
        host.scroll_to(ScrollToOptions::smooth(0));
    }

    /// Deferred hide check. Timers this widget did not schedule are ignored.
    /// Returns true if the timer belonged to the widget.
    pub fn on_timer<H: Host>(&mut self, host: &mut H, id: TimerId) -> Result<bool> {
        let Some(pos) = self.pending_hides.iter().position(|pending| *pending == id) else {
            return Ok(false);
        };
        self.pending_hides.remove(pos);

        let button = self.button_mut(host)?;
        if button.is_transparent() {
            button.set_display(Display::None);
            log::debug!("[widget] #{} hidden by {}", self.config.id, id);
        } else {
            log::trace!("[widget] {} fired after the button came back, skipped", id);
        }
        Ok(true)
    }

    fn button_mut<'a, H: Host>(&self, host: &'a mut H) -> Result<&'a mut Element> {
        host.element_mut(&self.config.id)
            .ok_or_else(|| Error::ElementNotFound(self.config.id.clone()))
    }
}
