use loc_trend::api::persistence::VIEWPORT_KEY;
use loc_trend::api::{FixedClock, MemoryViewStore, ViewStateStore};
use loc_trend::core::{MILLIS_PER_DAY, Viewport};
use loc_trend::interaction::{GestureEvent, GestureOutcome, InteractionMode};
use loc_trend::{ViewportController, ViewportControllerConfig};

// 2026-10-17T00:00:00Z
const NOW: i64 = 1_792_195_200_000;
const DAY: i64 = MILLIS_PER_DAY;

type TestController = ViewportController<MemoryViewStore, FixedClock>;

fn days_ago(from: i64, to: i64) -> Viewport {
    Viewport::new(NOW - from * DAY, NOW - to * DAY)
}

/// 100-day window on a 1000px plot: one pixel is 8.64e6 ms.
fn controller(bounds: Viewport) -> TestController {
    ViewportController::new(
        MemoryViewStore::new(),
        FixedClock::new(NOW),
        ViewportControllerConfig::default().with_plot_width_px(1000.0),
        bounds,
    )
    .expect("controller init")
}

#[test]
fn drag_updates_live_viewport_and_commits_on_release() {
    let mut controller = controller(days_ago(200, 100));

    controller.pointer_down(500.0);
    assert_eq!(controller.interaction_mode(), InteractionMode::Dragging);

    let outcome = controller.pointer_move(600.0);
    assert!(outcome.visible_changed);
    assert!(outcome.prevent_default);
    assert!(!outcome.committed);
    assert_eq!(controller.visible(), days_ago(210, 110));
    assert_eq!(controller.committed(), days_ago(200, 100));
    assert!(controller.store().get(VIEWPORT_KEY).is_none());

    let outcome = controller.pointer_release();
    assert!(outcome.committed);
    assert_eq!(controller.committed(), days_ago(210, 110));
    assert_eq!(controller.interaction_mode(), InteractionMode::Idle);
    assert!(controller.store().get(VIEWPORT_KEY).is_some());
}

#[test]
fn dragging_left_moves_towards_now_and_saturates() {
    let mut controller = controller(days_ago(200, 100));

    controller.pointer_down(500.0);
    controller.pointer_move(300.0);
    assert_eq!(controller.visible(), days_ago(180, 80));

    // 5000px is 432 days; the window stops at now with its span intact.
    controller.pointer_move(-4_700.0);
    assert_eq!(controller.visible(), days_ago(100, 0));
}

#[test]
fn plot_width_controls_drag_distance() {
    let mut controller = controller(days_ago(200, 100));
    controller.set_plot_width_px(500.0).expect("valid width");

    controller.pointer_down(0.0);
    controller.pointer_move(50.0);
    assert_eq!(controller.visible(), days_ago(210, 110));

    assert!(controller.set_plot_width_px(0.0).is_err());
    assert!(controller.set_plot_width_px(f64::INFINITY).is_err());
    assert_eq!(controller.config().plot_width_px, 500.0);
}

#[test]
fn pointer_leave_ends_drag_like_pointer_up() {
    let mut controller = controller(days_ago(200, 100));

    let events = [
        GestureEvent::PointerDown { x: 100.0 },
        GestureEvent::PointerMove { x: 150.0 },
        GestureEvent::PointerLeave,
    ];
    let outcomes: Vec<_> = events
        .into_iter()
        .map(|event| controller.handle_event(event))
        .collect();

    assert!(outcomes[2].committed);
    assert_eq!(controller.interaction_mode(), InteractionMode::Idle);
    let after_leave = controller.visible();
    assert_eq!(controller.committed(), after_leave);

    let outcome = controller.handle_event(GestureEvent::PointerMove { x: 400.0 });
    assert!(!outcome.visible_changed);
    assert_eq!(controller.visible(), after_leave);
}

#[test]
fn pointer_move_without_drag_is_ignored() {
    let mut controller = controller(days_ago(200, 100));
    let outcome = controller.pointer_move(250.0);
    assert_eq!(outcome, GestureOutcome::default());
    assert_eq!(controller.visible(), days_ago(200, 100));
    assert!(!controller.pointer_release().committed);
}

#[test]
fn horizontal_wheel_pans_and_commits_after_idle_timeout() {
    let mut controller = controller(days_ago(200, 100));

    let outcome = controller.wheel(120.0, 10.0, 0.0);
    assert!(outcome.visible_changed);
    assert!(outcome.prevent_default);
    assert!(!outcome.committed);
    assert_eq!(controller.visible(), days_ago(190, 90));

    assert!(!controller.poll_idle());
    controller.clock_mut().advance(499);
    assert!(!controller.poll_idle());
    assert_eq!(controller.committed(), days_ago(200, 100));

    controller.clock_mut().advance(1);
    assert!(controller.poll_idle());
    assert_eq!(controller.committed(), days_ago(190, 90));
    assert!(!controller.poll_idle());
}

#[test]
fn continued_wheel_pans_restart_the_idle_timer() {
    let mut controller = controller(days_ago(200, 100));

    controller.wheel(-120.0, 0.0, 0.0);
    controller.clock_mut().advance(300);
    controller.wheel(-120.0, 0.0, 0.0);
    controller.clock_mut().advance(300);
    assert!(!controller.poll_idle());

    controller.clock_mut().advance(200);
    assert!(controller.poll_idle());
    assert_eq!(controller.committed(), controller.visible());
}

#[test]
fn pointer_down_commits_pending_wheel_pan() {
    let mut controller = controller(days_ago(200, 100));
    controller.wheel(120.0, 0.0, 0.0);

    let outcome = controller.pointer_down(10.0);

    assert!(outcome.committed);
    assert_eq!(controller.committed(), days_ago(190, 90));
    controller.clock_mut().advance(1_000);
    assert!(!controller.poll_idle());
}

#[test]
fn vertical_wheel_zooms_at_pointer_and_commits() {
    let mut controller = controller(days_ago(200, 100));

    let outcome = controller.wheel(0.0, -100.0, 500.0);

    assert!(outcome.visible_changed);
    assert!(outcome.committed);
    assert!(outcome.prevent_default);
    assert_eq!(controller.visible(), days_ago(195, 105));
    assert_eq!(controller.committed(), days_ago(195, 105));
}

#[test]
fn wheel_zoom_at_limits_is_consumed_without_change() {
    let mut controller = controller(days_ago(7, 0));

    let zoom_in = controller.wheel(0.0, -100.0, 500.0);
    assert!(zoom_in.prevent_default);
    assert!(!zoom_in.visible_changed);
    assert!(!zoom_in.committed);

    let zoom_out = controller.wheel(0.0, 100.0, 500.0);
    assert!(zoom_out.prevent_default);
    assert!(!zoom_out.visible_changed);
    assert_eq!(controller.visible(), days_ago(7, 0));
    assert!(controller.store().is_empty());
}

#[test]
fn non_finite_wheel_deltas_are_ignored() {
    let mut controller = controller(days_ago(200, 100));
    let outcome = controller.wheel(f64::NAN, 0.0, 0.0);
    assert_eq!(outcome, GestureOutcome::default());
    assert_eq!(controller.visible(), days_ago(200, 100));
}
