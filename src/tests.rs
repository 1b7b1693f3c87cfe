use super::*;
use std::time::Duration;

fn status(time_remaining: u32, paused: bool) -> DeviceStatus {
    DeviceStatus {
        time_remaining,
        paused,
        current_image: Some("/photos/lake.jpg".to_string()),
        ..Default::default()
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn test_poll_emits_fetch_status() {
    let mut app = App::new(10);
    let t0 = Instant::now();

    let effects = app.update(Event::Poll, t0);

    assert_eq!(effects, vec![Effect::FetchStatus { requested_at: t0 }]);
}

#[test]
fn test_view_is_placeholder_before_first_status() {
    let mut app = App::new(10);
    let t0 = Instant::now();

    app.update(Event::Tick, t0);
    app.update(
        Event::StatusFetched {
            requested_at: t0,
            result: Err(ApiError::Network("connection refused".to_string())),
        },
        t0,
    );

    let view = app.view();
    assert_eq!(view.status, None);
    assert_eq!(view.countdown, None);
    assert_eq!(view.power_action, PowerActionView::default());
}

#[test]
fn test_status_fetched_updates_countdown_immediately() {
    let mut app = App::new(10);
    let t0 = Instant::now();

    let effects = app.update(
        Event::StatusFetched {
            requested_at: t0,
            result: Ok(status(10, false)),
        },
        t0,
    );

    assert!(effects.is_empty());
    let view = app.view();
    assert_eq!(view.status, Some(status(10, false)));
    assert_eq!(
        view.countdown,
        Some(CountdownView {
            display_seconds: 10,
            state: DisplayState::Active,
            urgent: false,
        })
    );
}

#[test]
fn test_ticks_reconcile_between_polls() {
    let mut app = App::new(10);
    let t0 = Instant::now();
    app.update(
        Event::StatusFetched {
            requested_at: t0,
            result: Ok(status(10, false)),
        },
        t0,
    );

    let shown: Vec<u32> = (1..=11)
        .map(|n| {
            app.update(Event::Tick, t0 + secs(n));
            app.view().countdown.unwrap().display_seconds
        })
        .collect();

    assert_eq!(shown, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0]);
    assert_eq!(app.view().countdown.unwrap().state, DisplayState::Expired);
}

#[test]
fn test_failed_poll_keeps_last_status() {
    let mut app = App::new(10);
    let t0 = Instant::now();
    app.update(
        Event::StatusFetched {
            requested_at: t0,
            result: Ok(status(20, true)),
        },
        t0,
    );

    let effects = app.update(
        Event::StatusFetched {
            requested_at: t0 + secs(3),
            result: Err(ApiError::Status {
                status: 502,
                message: None,
            }),
        },
        t0 + secs(3),
    );

    assert!(effects.is_empty(), "poll failures never notify");
    assert_eq!(app.view().status, Some(status(20, true)));
    assert_eq!(app.view().countdown.unwrap().state, DisplayState::Paused);
}

#[test]
fn test_shutdown_flow() {
    let mut app = App::new(10);
    let t0 = Instant::now();

    assert!(app.update(Event::Confirm(PowerActionKind::Shutdown), t0).is_empty());
    assert_eq!(
        app.update(
            Event::Request {
                countdown_seconds: None
            },
            t0
        ),
        vec![Effect::RequestPowerAction {
            kind: PowerActionKind::Shutdown,
            countdown_seconds: 10,
        }]
    );

    app.update(Event::PowerActionResponse(Ok(())), t0);
    assert_eq!(app.view().power_action.phase, PowerPhase::CountingDown);
    assert_eq!(app.next_deadline(), Some(t0 + secs(1)));

    let mut now = t0;
    while app.view().power_action.phase == PowerPhase::CountingDown {
        now = app.next_deadline().unwrap();
        app.update(Event::TimerElapsed, now);
    }

    assert_eq!(now, t0 + secs(10));
    assert_eq!(app.view().power_action.phase, PowerPhase::Completing);

    // the terminal message is held briefly, then a new action may start
    while let Some(deadline) = app.next_deadline() {
        now = deadline;
        assert!(app.update(Event::TimerElapsed, now).is_empty());
    }
    assert_eq!(app.view().power_action, PowerActionView::default());
    assert!(app.update(Event::Confirm(PowerActionKind::Restart), now).is_empty());
    assert_eq!(app.view().power_action.phase, PowerPhase::Confirming);
}

#[test]
fn test_restart_reload_resets_state() {
    let mut app = App::new(10);
    let t0 = Instant::now();
    app.update(
        Event::StatusFetched {
            requested_at: t0,
            result: Ok(status(10, false)),
        },
        t0,
    );
    app.update(Event::Confirm(PowerActionKind::Restart), t0);
    app.update(
        Event::Request {
            countdown_seconds: Some(1),
        },
        t0,
    );
    app.update(Event::PowerActionResponse(Ok(())), t0);

    app.update(Event::TimerElapsed, t0 + secs(1));
    let effects = app.update(Event::TimerElapsed, t0 + secs(31));
    assert_eq!(effects, vec![Effect::Reload]);

    app.reload();
    assert_eq!(app.view(), ViewModel::default());
    assert_eq!(app.next_deadline(), None);
}

#[test]
fn test_slideshow_success_notifies_and_polls() {
    let mut app = App::new(10);
    let t0 = Instant::now();

    assert_eq!(
        app.update(Event::Slideshow(SlideshowCommand::TogglePause), t0),
        vec![Effect::Slideshow(SlideshowCommand::TogglePause)]
    );

    let effects = app.update(Event::SlideshowResponse(Ok(SlideshowAck::Paused(true))), t0);
    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::success("Slideshow paused")),
            Effect::FetchStatus { requested_at: t0 },
        ]
    );
}

#[test]
fn test_slideshow_failure_notifies_error() {
    let mut app = App::new(10);

    let effects = app.update(
        Event::SlideshowResponse(Err(ApiError::Status {
            status: 500,
            message: Some("No images available".to_string()),
        })),
        Instant::now(),
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error("Error: No images available"))]
    );
}
