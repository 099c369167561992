use std::time::Duration;

use backtop::element::count_by_id;
use backtop::{
    ConfigError, Display, Element, Error, Event, HidePolicy, Host, Page, PageConfig, Phase,
    ScrollSource, ScrollToOptions, ScrollTopWidget, Session, WidgetConfig,
};

const BUTTON: &str = "backToTopBtn";

fn session() -> Session {
    Session::new(PageConfig::default(), WidgetConfig::default()).unwrap()
}

fn session_with_policy(policy: HidePolicy) -> Session {
    Session::new(
        PageConfig::default(),
        WidgetConfig::default().hide_policy(policy),
    )
    .unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn button(session: &Session) -> &Element {
    session.page().element(BUTTON).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_mount_appends_single_button_as_last_child() {
    let s = session();
    let root = s.page().root();

    assert_eq!(count_by_id(root, BUTTON), 1);
    assert_eq!(root.last_child().map(|e| e.id.as_str()), Some(BUTTON));

    let btn = button(&s);
    assert_eq!(btn.tag, "button");
    assert_eq!(btn.text_content(), "⬆ Top");
    assert!(btn.clickable);
}

#[test]
fn test_mount_applies_no_display_override() {
    let s = session();
    let btn = button(&s);

    assert_eq!(btn.display, Display::Unset);
    assert_eq!(btn.opacity, None);
    assert!(!btn.is_displayed());
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
}

#[test]
fn test_mount_twice_is_rejected() {
    let mut page = Page::new(PageConfig::default()).unwrap();
    ScrollTopWidget::mount(&mut page, WidgetConfig::default()).unwrap();

    let second = ScrollTopWidget::mount(&mut page, WidgetConfig::default());
    assert_eq!(second.unwrap_err(), Error::DuplicateId(BUTTON.to_string()));
    assert_eq!(count_by_id(page.root(), BUTTON), 1);
}

#[test]
fn test_mount_after_existing_content() {
    let mut page = Page::new(PageConfig::default()).unwrap();
    page.append_to_root(Element::text("Dashboard").id("title")).unwrap();

    ScrollTopWidget::mount(&mut page, WidgetConfig::default()).unwrap();

    let children = page.root().child_elements();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id, "title");
    assert_eq!(children[1].id, BUTTON);
}

#[test]
fn test_invalid_widget_config_is_rejected() {
    let result = Session::new(PageConfig::default(), WidgetConfig::new().label("  "));
    assert_eq!(result.unwrap_err(), Error::Config(ConfigError::EmptyLabel));

    let result = Session::new(PageConfig::default(), WidgetConfig::new().id(""));
    assert_eq!(result.unwrap_err(), Error::Config(ConfigError::EmptyId));
}

// ============================================================================
// Scroll-reactive visibility
// ============================================================================

#[test]
fn test_scroll_past_threshold_shows_synchronously() {
    for offset in [401, 500, 1234, 3200] {
        let mut s = session();
        s.scroll_to(offset).unwrap();

        let btn = button(&s);
        assert_eq!(btn.display, Display::Block, "offset {offset}");
        assert_eq!(btn.opacity, Some(1.0), "offset {offset}");
        assert_eq!(s.phase().unwrap(), Phase::Visible);
    }
}

#[test]
fn test_threshold_is_exclusive() {
    let mut s = session();
    s.scroll_to(400).unwrap();

    let btn = button(&s);
    assert_eq!(btn.opacity, Some(0.0));
    assert_eq!(btn.display, Display::Unset);
    assert_eq!(s.widget().pending_hides().len(), 1);
}

#[test]
fn test_below_threshold_hides_after_delay() {
    let mut s = session();
    s.scroll_to(500).unwrap();
    s.scroll_to(100).unwrap();

    // Opacity drops immediately, display waits for the check.
    assert_eq!(button(&s).opacity, Some(0.0));
    assert_eq!(button(&s).display, Display::Block);
    assert_eq!(s.phase().unwrap(), Phase::Fading);

    s.advance(ms(299)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Fading);

    s.advance(ms(1)).unwrap();
    assert_eq!(button(&s).display, Display::None);
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
    assert!(s.widget().pending_hides().is_empty());
}

#[test]
fn test_first_scroll_below_threshold_sets_display_none() {
    let mut s = session();
    s.scroll_to(50).unwrap();
    assert_eq!(button(&s).display, Display::Unset);

    s.advance(ms(300)).unwrap();
    assert_eq!(button(&s).display, Display::None);
}

#[test]
fn test_repeated_scrolls_above_threshold_stay_visible() {
    let mut s = session();
    s.scroll_to(500).unwrap();
    s.scroll_to(600).unwrap();
    s.scroll_to(700).unwrap();
    s.dispatch(Event::Scroll).unwrap();
    s.dispatch(Event::Scroll).unwrap();

    let btn = button(&s);
    assert_eq!(btn.display, Display::Block);
    assert_eq!(btn.opacity, Some(1.0));
    assert!(s.page().pending_timers().is_empty());
}

#[test]
fn test_scroll_back_within_window_keeps_button() {
    for policy in [HidePolicy::CancelPending, HidePolicy::RecheckOnly] {
        let mut s = session_with_policy(policy);
        s.scroll_to(500).unwrap();
        s.scroll_to(100).unwrap();
        s.advance(ms(100)).unwrap();
        s.scroll_to(500).unwrap();
        assert_eq!(button(&s).opacity, Some(1.0), "{policy:?}");

        s.advance(ms(200)).unwrap();
        assert_eq!(s.phase().unwrap(), Phase::Visible, "{policy:?}");

        s.advance(ms(1000)).unwrap();
        assert_eq!(s.phase().unwrap(), Phase::Visible, "{policy:?}");
    }
}

#[test]
fn test_cancel_pending_clears_timer_on_show() {
    let mut s = session_with_policy(HidePolicy::CancelPending);
    s.scroll_to(500).unwrap();
    s.scroll_to(100).unwrap();
    assert_eq!(s.page().pending_timers().len(), 1);

    s.scroll_to(500).unwrap();
    assert!(s.page().pending_timers().is_empty());
    assert!(s.widget().pending_hides().is_empty());
}

#[test]
fn test_cancel_pending_keeps_one_hide_while_below() {
    let mut s = session_with_policy(HidePolicy::CancelPending);
    s.scroll_to(500).unwrap();
    s.scroll_to(300).unwrap();
    s.advance(ms(100)).unwrap();
    s.scroll_to(200).unwrap();
    s.advance(ms(100)).unwrap();
    s.scroll_to(100).unwrap();

    assert_eq!(s.page().pending_timers().len(), 1);
    assert_eq!(s.page().pending_timers()[0].due_at, 300);

    // The hide still lands 300ms after the first fade.
    s.advance(ms(100)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
}

#[test]
fn test_recheck_only_leaves_stale_timers_pending() {
    let mut s = session_with_policy(HidePolicy::RecheckOnly);
    s.scroll_to(500).unwrap();
    s.scroll_to(100).unwrap();
    s.advance(ms(100)).unwrap();
    s.scroll_to(500).unwrap();

    assert_eq!(s.page().pending_timers().len(), 1);

    s.advance(ms(200)).unwrap();
    assert!(s.page().pending_timers().is_empty());
    assert_eq!(s.phase().unwrap(), Phase::Visible);
}

#[test]
fn test_recheck_only_stale_timer_hides_early() {
    // 500 -> 100 at 0ms, 500 at 100ms, 100 at 150ms. The check from the
    // first fade still fires at 300ms and finds the button transparent.
    let mut s = session_with_policy(HidePolicy::RecheckOnly);
    s.scroll_to(500).unwrap();
    s.scroll_to(100).unwrap();
    s.advance(ms(100)).unwrap();
    s.scroll_to(500).unwrap();
    s.advance(ms(50)).unwrap();
    s.scroll_to(100).unwrap();

    s.advance(ms(150)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
}

#[test]
fn test_cancel_pending_restarts_window_after_show() {
    // Same sequence as above: the first check was cancelled, so the
    // button fades for a full 300ms from the second fade.
    let mut s = session_with_policy(HidePolicy::CancelPending);
    s.scroll_to(500).unwrap();
    s.scroll_to(100).unwrap();
    s.advance(ms(100)).unwrap();
    s.scroll_to(500).unwrap();
    s.advance(ms(50)).unwrap();
    s.scroll_to(100).unwrap();

    s.advance(ms(150)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Fading);

    s.advance(ms(149)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Fading);

    s.advance(ms(1)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
}

#[test]
fn test_body_scroll_source_drives_widget() {
    let config = PageConfig::default().scroll_source(ScrollSource::Body);
    let mut s = Session::new(config, WidgetConfig::default()).unwrap();
    s.scroll_to(900).unwrap();

    let offsets = s.page().scroll_offsets();
    assert_eq!(offsets.body, 900);
    assert_eq!(offsets.document_element, 0);
    assert_eq!(s.phase().unwrap(), Phase::Visible);
}

#[test]
fn test_custom_threshold_and_delay() {
    let config = WidgetConfig::new().threshold(100).fade_delay(ms(50));
    let mut s = Session::new(PageConfig::default(), config).unwrap();

    s.scroll_to(101).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Visible);

    s.scroll_to(100).unwrap();
    s.advance(ms(49)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Fading);
    s.advance(ms(1)).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Hidden);
}

#[test]
fn test_resize_clamping_fades_button() {
    let mut s = session();
    s.scroll_to(1000).unwrap();
    assert_eq!(s.phase().unwrap(), Phase::Visible);

    // content 4000, viewport 3700: max scroll 300
    s.resize(3700).unwrap();
    assert_eq!(s.page().scroll_top(), 300);
    assert_eq!(s.phase().unwrap(), Phase::Fading);
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn test_click_requests_one_smooth_scroll_to_top() {
    let mut s = session();
    s.scroll_to(1000).unwrap();
    s.activate().unwrap();

    assert_eq!(s.page().scroll_requests(), &[ScrollToOptions::smooth(0)]);
    // No frame has run yet, so visibility is untouched.
    assert_eq!(s.page().scroll_top(), 1000);
    assert_eq!(s.phase().unwrap(), Phase::Visible);
}

#[test]
fn test_click_on_hidden_button_fails() {
    let mut s = session();
    assert_eq!(
        s.activate().unwrap_err(),
        Error::ElementHidden(BUTTON.to_string())
    );
    assert!(s.page().scroll_requests().is_empty());
}

#[test]
fn test_click_on_other_element_is_ignored() {
    let mut page = Page::new(PageConfig::default()).unwrap();
    let mut widget = ScrollTopWidget::mount(&mut page, WidgetConfig::default()).unwrap();
    page.append_to_root(Element::button("Other").id("other").display(Display::Block)).unwrap();

    page.click("other").unwrap();
    for event in page.drain_events() {
        assert!(!widget.handle_event(&mut page, &event).unwrap());
    }
    assert!(page.scroll_requests().is_empty());
}

#[test]
fn test_foreign_timer_is_ignored() {
    let mut page = Page::new(PageConfig::default()).unwrap();
    let mut widget = ScrollTopWidget::mount(&mut page, WidgetConfig::default()).unwrap();

    let id = page.set_timeout(ms(10));
    assert!(!widget.on_timer(&mut page, id).unwrap());
}

#[test]
fn test_smooth_scroll_to_top_hides_button() {
    let mut s = session();
    s.scroll_to(1000).unwrap();
    s.activate().unwrap();

    let mut below_at = None;
    let mut hidden_at = None;
    for _ in 0..2000 {
        s.advance(ms(1)).unwrap();
        let now = s.page().now_ms();
        if below_at.is_none() && s.page().scroll_top() <= 400 {
            below_at = Some(now);
        }
        if hidden_at.is_none() && s.phase().unwrap() == Phase::Hidden {
            hidden_at = Some(now);
        }
    }

    assert_eq!(s.page().scroll_top(), 0);
    assert!(!s.page().is_animating());
    assert_eq!(s.page().scroll_requests().len(), 1);

    let below_at = below_at.unwrap();
    let hidden_at = hidden_at.unwrap();
    assert_eq!(hidden_at - below_at, 300);
}

#[test]
fn test_user_scroll_during_smooth_scroll_keeps_button() {
    let mut s = session();
    s.scroll_to(2000).unwrap();
    s.activate().unwrap();
    s.advance(ms(100)).unwrap();
    assert!(s.page().is_animating());

    s.scroll_to(1500).unwrap();
    assert!(!s.page().is_animating());

    s.advance(ms(1000)).unwrap();
    assert_eq!(s.page().scroll_top(), 1500);
    assert_eq!(s.phase().unwrap(), Phase::Visible);
}
