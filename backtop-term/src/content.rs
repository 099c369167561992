//! Filler page for the terminal host: a dashboard-style report long enough
//! to scroll well past the button threshold.

use crate::buffer::{char_width, display_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

const TITLE: &str = "RedCast - Reddit Virality Dashboard";

const SECTIONS: &[(&str, &str)] = &[
    (
        "Sentiment Over Time",
        "Average sentiment score per day across every collected post. Spikes usually line up with a single thread drawing a large share of the comments for that day.",
    ),
    (
        "Post Volume",
        "Number of posts collected per day. Quiet weekends and busy release days both show up here long before they move the sentiment line.",
    ),
    (
        "Score vs Comments",
        "Each post plotted by score against comment count and grouped by sentiment. Threads with many comments but a low score tend to be arguments.",
    ),
    (
        "Sentiment Distribution",
        "How many posts fell into each sentiment bucket. Neutral dominates, which is expected for link posts with short titles.",
    ),
    (
        "Virality Distribution",
        "Posts above the median score are marked viral. The split stays close to even by construction, so watch the trend rather than the ratio.",
    ),
];

/// Paragraphs per section.
const PARAGRAPHS: usize = 6;

/// Build the page wrapped to `width` columns.
pub fn dashboard(width: u16) -> Vec<Line> {
    let width = usize::from(width.saturating_sub(4)).max(10);
    let mut lines = vec![Line::new(LineKind::Title, TITLE), Line::blank()];

    for (index, (heading, body)) in SECTIONS.iter().enumerate() {
        lines.push(Line::new(
            LineKind::Heading,
            format!("{}. {}", index + 1, heading),
        ));
        lines.push(Line::blank());
        for paragraph in 0..PARAGRAPHS {
            let text = format!("[{}.{}] {}", index + 1, paragraph + 1, body);
            lines.extend(
                wrap_words(&text, width)
                    .into_iter()
                    .map(|l| Line::new(LineKind::Body, l)),
            );
            lines.push(Line::blank());
        }
    }

    lines.push(Line::new(LineKind::Body, "End of report."));
    lines
}

/// Greedy word wrap by display width. Words wider than `max_width` are split.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);

        if current_width > 0 && current_width + 1 + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > max_width {
            for ch in word.chars() {
                let w = char_width(ch);
                if current_width + w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words_respects_width() {
        let lines = wrap_words("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_words_splits_long_word() {
        let lines = wrap_words("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_dashboard_is_taller_than_threshold() {
        // 400px at 16px per row is 25 rows
        let lines = dashboard(80);
        assert!(lines.len() > 100);
        assert_eq!(lines[0].kind, LineKind::Title);
        assert!(lines.iter().any(|l| l.text == "5. Virality Distribution"));
    }
}
