use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Inline display mode of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline override. The page stylesheet decides, and it hides
    /// overlay controls such as the back-to-top button.
    #[default]
    Unset,
    Block,
    None,
}

impl Display {
    pub fn is_visible(self) -> bool {
        self == Display::Block
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Inline style
    pub display: Display,
    /// Inline opacity (0.0 to 1.0). `None` means no override.
    pub opacity: Option<f32>,

    // Interaction
    pub clickable: bool,

    // Custom data storage
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            content: Content::None,
            display: Display::Unset,
            opacity: None,
            clickable: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    /// The visual tree root.
    pub fn body() -> Self {
        Self {
            id: "body".to_string(),
            tag: "body".to_string(),
            content: Content::Children(Vec::new()),
            display: Display::Block,
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: "span".to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            tag: "button".to_string(),
            content: Content::Text(label.into()),
            clickable: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Inline style
    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    // Interaction
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self.append_child(child);
        }
        self
    }

    /// Append `child` as the last child. Text content is kept as a leading
    /// text node.
    pub fn append_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let text = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![text, child]);
            }
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn last_child(&self) -> Option<&Element> {
        self.child_elements().last()
    }

    pub fn text_content(&self) -> String {
        self.content.text()
    }

    /// Whether this element is rendered (an inline `Display::Block`).
    pub fn is_displayed(&self) -> bool {
        self.display.is_visible()
    }

    pub fn set_display(&mut self, display: Display) {
        self.display = display;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
    }

    /// True if the inline opacity is exactly zero.
    pub fn is_transparent(&self) -> bool {
        self.opacity == Some(0.0)
    }
}
