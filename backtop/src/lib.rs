pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod host;
pub mod page;
pub mod scroll;
pub mod session;
pub mod timer;
pub mod transitions;
pub mod widget;

pub use config::{ConfigError, HidePolicy, PageConfig, WidgetConfig};
pub use element::{Content, Display, Element};
pub use error::{Error, Result};
pub use event::Event;
pub use host::Host;
pub use page::Page;
pub use scroll::{ScrollBehavior, ScrollOffsets, ScrollSource, ScrollToOptions, SmoothScroll};
pub use session::Session;
pub use timer::{PendingTimer, TimerId, TimerQueue};
pub use transitions::{Easing, TransitionConfig};
pub use widget::{Phase, ScrollTopWidget};
