use palette::{IntoColor, Oklch, Srgb};

use crate::buffer::{display_width, Buffer, Rgb, TextStyle};
use crate::content::{Line, LineKind};

/// Height of one terminal row in page pixels.
pub const ROW_PX: u32 = 16;

pub const PAGE_BG: Rgb = Rgb::new(24, 24, 32);
pub const PAGE_FG: Rgb = Rgb::new(200, 200, 210);
pub const TITLE_FG: Rgb = Rgb::new(240, 200, 120);
pub const HEADING_FG: Rgb = Rgb::new(130, 170, 255);
pub const BUTTON_BG: Rgb = Rgb::new(90, 130, 230);
pub const BUTTON_FG: Rgb = Rgb::new(255, 255, 255);
pub const STATUS_BG: Rgb = Rgb::new(40, 40, 56);
pub const STATUS_FG: Rgb = Rgb::new(150, 150, 170);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub lines: &'a [Line],
    pub scroll_top: u32,
    /// Button label and rendered opacity, if the button is displayed.
    pub button: Option<(&'a str, f32)>,
    pub status: String,
}

/// Rows available to the page (the last row holds the status line).
pub fn viewport_rows(height: u16) -> u16 {
    height.saturating_sub(1).max(1)
}

/// Where the button sits for a terminal of `width` x `height`.
pub fn button_rect(label: &str, width: u16, height: u16) -> Rect {
    let w = (display_width(label) as u16).saturating_add(2);
    let rows = viewport_rows(height);
    Rect::new(
        width.saturating_sub(w.saturating_add(2)),
        rows.saturating_sub(2),
        w.min(width),
        1,
    )
}

/// Paint a frame. Returns the button's rectangle if it was drawn.
pub fn draw(buf: &mut Buffer, view: &View<'_>) -> Option<Rect> {
    let width = buf.width();
    let height = buf.height();
    let rows = viewport_rows(height);
    let first = (view.scroll_top / ROW_PX) as usize;

    for row in 0..rows {
        buf.fill_row(row, 0, width, PAGE_BG);
        let Some(line) = view.lines.get(first + row as usize) else {
            continue;
        };
        let (fg, style) = match line.kind {
            LineKind::Title => (TITLE_FG, TextStyle::new().bold()),
            LineKind::Heading => (HEADING_FG, TextStyle::new().bold()),
            LineKind::Body => (PAGE_FG, TextStyle::new()),
            LineKind::Blank => continue,
        };
        buf.put_str(2, row, &line.text, fg, PAGE_BG, style);
    }

    let status_row = height.saturating_sub(1);
    buf.fill_row(status_row, 0, width, STATUS_BG);
    buf.put_str(1, status_row, &view.status, STATUS_FG, STATUS_BG, TextStyle::new());

    let (label, opacity) = view.button?;
    let rect = button_rect(label, width, height);
    let bg = blend(PAGE_BG, BUTTON_BG, opacity);
    let fg = blend(PAGE_BG, BUTTON_FG, opacity);
    let style = if opacity < 0.5 {
        TextStyle::new().dim()
    } else {
        TextStyle::new().bold()
    };
    buf.fill_row(rect.y, rect.x, rect.width, bg);
    buf.put_str(rect.x + 1, rect.y, label, fg, bg, style);
    Some(rect)
}

/// Interpolate from `from` to `to` in OKLCH space. `t` is clamped to 0..=1.
pub fn blend(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }

    let (from_l, from_c, from_h) = to_oklch(from);
    let (to_l, to_c, to_h) = to_oklch(to);

    let l = from_l + (to_l - from_l) * t;
    let c = from_c + (to_c - from_c) * t;

    // Shortest path around the hue circle
    let mut dh = to_h - from_h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    let h = (from_h + dh * t).rem_euclid(360.0);

    let srgb: Srgb = Oklch::new(l, c, h).into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Rgb::new(r, g, b)
}

fn to_oklch(rgb: Rgb) -> (f32, f32, f32) {
    let srgb = Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    );
    let oklch: Oklch = srgb.into_color();
    (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<Line> {
        (0..n)
            .map(|i| Line {
                kind: LineKind::Body,
                text: format!("line {i}"),
            })
            .collect()
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(PAGE_BG, BUTTON_BG, 0.0), PAGE_BG);
        assert_eq!(blend(PAGE_BG, BUTTON_BG, 1.0), BUTTON_BG);
        assert_eq!(blend(PAGE_BG, BUTTON_BG, 7.0), BUTTON_BG);
    }

    #[test]
    fn test_blend_midpoint_is_between() {
        let mid = blend(Rgb::new(0, 0, 0), Rgb::new(200, 200, 200), 0.5);
        assert!(mid.r > 0 && mid.r < 200);
    }

    #[test]
    fn test_button_rect_bottom_right() {
        let rect = button_rect(" Top", 80, 24);
        assert_eq!(rect.width, 6);
        assert_eq!(rect.x, 72);
        assert_eq!(rect.y, 21);
        assert!(rect.contains(72, 21));
        assert!(rect.contains(77, 21));
        assert!(!rect.contains(78, 21));
        assert!(!rect.contains(72, 22));
    }

    #[test]
    fn test_draw_scrolls_by_rows() {
        let lines = lines(100);
        let mut buf = Buffer::new(20, 5);
        let view = View {
            lines: &lines,
            scroll_top: 3 * ROW_PX + 5,
            button: None,
            status: String::new(),
        };
        assert_eq!(draw(&mut buf, &view), None);
        assert_eq!(buf.get(2, 0).map(|c| c.char), Some('l'));
        assert_eq!(buf.get(7, 0).map(|c| c.char), Some('3'));
    }

    #[test]
    fn test_draw_button_when_displayed() {
        let lines = lines(100);
        let mut buf = Buffer::new(40, 10);
        let view = View {
            lines: &lines,
            scroll_top: 0,
            button: Some(("Top", 1.0)),
            status: "status".to_string(),
        };
        let rect = draw(&mut buf, &view).unwrap();
        assert_eq!(buf.get(rect.x + 1, rect.y).map(|c| c.char), Some('T'));
        assert_eq!(buf.get(rect.x, rect.y).map(|c| c.bg), Some(BUTTON_BG));
        assert_eq!(buf.get(1, 9).map(|c| c.char), Some('s'));
    }
}
