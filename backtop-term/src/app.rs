//! Terminal front end: maps crossterm input onto the session and turns the
//! session state into a [`View`].

use std::time::Duration;

use backtop::{Error as PageError, Host, PageConfig, Phase, Session, TransitionConfig, WidgetConfig};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::content::{dashboard, Line};
use crate::error::AppError;
use crate::fade::Fade;
use crate::render::{self, Rect, View, ROW_PX};

/// Rows moved per wheel notch.
const WHEEL_ROWS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: Session,
    lines: Vec<Line>,
    width: u16,
    fade: Fade,
    button_rect: Option<Rect>,
}

impl App {
    pub fn new((width, height): (u16, u16)) -> Result<Self, AppError> {
        let lines = dashboard(width);
        let widget_config = WidgetConfig::default();
        let page_config = PageConfig::new()
            .viewport_height(viewport_px(height))
            .content_height(content_px(&lines));

        let fade = Fade::new(
            TransitionConfig::new(widget_config.fade_delay, backtop::Easing::EaseOut),
            0.0,
        );
        let session = Session::new(page_config, widget_config)?;
        log::info!("[app] started {}x{} with {} lines", width, height, lines.len());

        Ok(Self {
            session,
            lines,
            width,
            fade,
            button_rect: None,
        })
    }

    /// True while something is moving and frames should come quickly.
    pub fn is_animating(&self) -> bool {
        self.session.page().is_animating()
            || self.fade.is_active()
            || !self.session.widget().pending_hides().is_empty()
    }

    /// Advance page time and the rendered fade by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Result<(), AppError> {
        self.session.advance(dt)?;

        let page = self.session.page();
        let button = self.session.widget().element(page)?;
        if button.is_displayed() {
            self.fade.retarget(button.opacity.unwrap_or(1.0));
            self.fade.tick(dt);
        } else {
            self.fade.snap(0.0);
        }
        Ok(())
    }

    pub fn view(&self) -> Result<View<'_>, AppError> {
        let page = self.session.page();
        let widget = self.session.widget();
        let button = widget.element(page)?;
        let phase = self.session.phase()?;

        let status = format!(
            "{}px / {}px │ button {} │ ↑↓ PgUp PgDn Home End · t top · q quit",
            page.scroll_top(),
            page.max_scroll_top(),
            phase_name(phase)
        );

        Ok(View {
            lines: &self.lines,
            scroll_top: page.scroll_top(),
            button: button
                .is_displayed()
                .then_some((widget.config().label.as_str(), self.fade.value())),
            status,
        })
    }

    pub fn set_button_rect(&mut self, rect: Option<Rect>) {
        self.button_rect = rect;
    }

    pub fn handle(&mut self, event: CrosstermEvent) -> Result<Flow, AppError> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) => {
                self.handle_mouse(mouse)?;
                Ok(Flow::Continue)
            }
            CrosstermEvent::Resize(width, height) => {
                self.resize(width, height)?;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Flow, AppError> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Continue);
        }

        let row = i64::from(ROW_PX);
        let page_px = i64::from(self.session.page().viewport_height());

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Down | KeyCode::Char('j') => self.session.scroll_by(row)?,
            KeyCode::Up | KeyCode::Char('k') => self.session.scroll_by(-row)?,
            KeyCode::PageDown | KeyCode::Char(' ') => self.session.scroll_by(page_px)?,
            KeyCode::PageUp => self.session.scroll_by(-page_px)?,
            KeyCode::Home => self.session.scroll_to(0)?,
            KeyCode::End => {
                let max = self.session.page().max_scroll_top();
                self.session.scroll_to(max)?;
            }
            KeyCode::Char('t') | KeyCode::Enter => self.activate()?,
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), AppError> {
        let notch = WHEEL_ROWS * i64::from(ROW_PX);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.session.scroll_by(notch)?,
            MouseEventKind::ScrollUp => self.session.scroll_by(-notch)?,
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .button_rect
                    .is_some_and(|rect| rect.contains(mouse.column, mouse.row))
                {
                    self.activate()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Click the button. Clicking while it is hidden does nothing.
    fn activate(&mut self) -> Result<(), AppError> {
        match self.session.activate() {
            Ok(()) => Ok(()),
            Err(PageError::ElementHidden(id)) => {
                log::debug!("[app] #{} is hidden, ignoring activation", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<(), AppError> {
        if width != self.width {
            self.lines = dashboard(width);
            self.width = width;
            self.session.set_content_height(content_px(&self.lines))?;
        }
        self.session.resize(viewport_px(height))?;
        log::debug!(
            "[app] resized to {}x{}, offset {}px",
            width,
            height,
            self.session.page().scroll_offsets().top()
        );
        Ok(())
    }
}

fn viewport_px(height: u16) -> u32 {
    u32::from(render::viewport_rows(height)) * ROW_PX
}

fn content_px(lines: &[Line]) -> u32 {
    u32::try_from(lines.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(ROW_PX)
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Hidden => "hidden",
        Phase::Visible => "visible",
        Phase::Fading => "fading",
    }
}
