//! Line-oriented command input and status output for the terminal.

use crate::{
    events::Event,
    model::ViewModel,
    types::{DisplayState, PowerActionKind, SlideshowCommand},
};
use log::{debug, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

pub const HELP: &str = "commands: shutdown | restart | confirm [seconds] | dismiss | cancel | \
                        next | prev | pause | display on|off|auto | help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(Event),
    Help,
}

/// Parse one input line, `Ok(None)` for blank lines
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    let event = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("help", None) => return Ok(Some(Command::Help)),
        ("shutdown", None) => Event::Confirm(PowerActionKind::Shutdown),
        ("restart", None) => Event::Confirm(PowerActionKind::Restart),
        ("confirm", countdown) => Event::Request {
            countdown_seconds: countdown
                .map(|s| {
                    s.parse::<u32>()
                        .map_err(|_| format!("invalid countdown: {s}"))
                })
                .transpose()?,
        },
        ("dismiss", None) => Event::Dismiss,
        ("cancel", None) => Event::Cancel,
        ("next", None) => Event::Slideshow(SlideshowCommand::Next),
        ("prev", None) => Event::Slideshow(SlideshowCommand::Previous),
        ("pause", None) => Event::Slideshow(SlideshowCommand::TogglePause),
        ("display", Some(mode)) => Event::Slideshow(SlideshowCommand::SetDisplay(mode.parse()?)),
        ("display", None) => return Err("missing display mode: on, off or auto".to_string()),
        (verb, Some(arg)) => return Err(format!("unexpected argument for {verb}: {arg}")),
        (verb, None) => return Err(format!("unknown command: {verb}")),
    };

    Ok(Some(Command::Event(event)))
}

/// Forward commands read from stdin until it closes or the receiver is gone
pub async fn read_commands(tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!("failed to read stdin: {e}");
                return;
            }
        };

        match parse(&line) {
            Ok(Some(Command::Event(event))) => {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            Ok(Some(Command::Help)) => info!("{HELP}"),
            Ok(None) => {}
            Err(e) => warn!("{e} ({HELP})"),
        }
    }
}

/// One-line summary of the view, empty before the first status arrived
pub fn status_line(view: &ViewModel) -> String {
    let mut parts = vec![];

    if let Some(status) = &view.status {
        if let Some(image) = &status.current_image {
            match (status.current_index, status.total_images) {
                // the device reports a 1-based position
                (Some(position), Some(total)) => parts.push(format!("{image} ({position}/{total})")),
                _ => parts.push(image.clone()),
            }
        }
    }

    if let Some(countdown) = &view.countdown {
        parts.push(match countdown.state {
            DisplayState::Paused => format!("paused at {}s", countdown.display_seconds),
            DisplayState::Expired => "advancing...".to_string(),
            DisplayState::Active => format!("next in {}s", countdown.display_seconds),
        });
    }

    if let Some(message) = &view.power_action.message {
        parts.push(message.clone());
    }

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CountdownView, DeviceStatus, DisplayMode, PowerActionView, PowerPhase,
    };

    fn event(line: &str) -> Event {
        match parse(line) {
            Ok(Some(Command::Event(event))) => event,
            other => panic!("expected event for {line:?}, got {other:?}"),
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn power_commands() {
            assert_eq!(event("shutdown"), Event::Confirm(PowerActionKind::Shutdown));
            assert_eq!(event("  Restart "), Event::Confirm(PowerActionKind::Restart));
            assert_eq!(event("dismiss"), Event::Dismiss);
            assert_eq!(event("cancel"), Event::Cancel);
        }

        #[test]
        fn confirm_with_and_without_countdown() {
            assert_eq!(
                event("confirm"),
                Event::Request {
                    countdown_seconds: None
                }
            );
            assert_eq!(
                event("confirm 15"),
                Event::Request {
                    countdown_seconds: Some(15)
                }
            );
            assert!(parse("confirm soon").is_err());
            assert!(parse("confirm -5").is_err());
        }

        #[test]
        fn slideshow_commands() {
            assert_eq!(event("next"), Event::Slideshow(SlideshowCommand::Next));
            assert_eq!(event("prev"), Event::Slideshow(SlideshowCommand::Previous));
            assert_eq!(event("pause"), Event::Slideshow(SlideshowCommand::TogglePause));
            assert_eq!(
                event("display auto"),
                Event::Slideshow(SlideshowCommand::SetDisplay(DisplayMode::Auto))
            );
        }

        #[test]
        fn rejects_bad_input() {
            assert!(parse("reboot").is_err());
            assert!(parse("display").is_err());
            assert!(parse("display dim").is_err());
            assert!(parse("next 2").is_err());
            assert!(parse("confirm 10 20").is_err());
        }

        #[test]
        fn blank_and_help() {
            assert_eq!(parse("   "), Ok(None));
            assert_eq!(parse("help"), Ok(Some(Command::Help)));
        }
    }

    mod status_line {
        use super::*;

        #[test]
        fn empty_before_first_status() {
            assert_eq!(status_line(&ViewModel::default()), "");
        }

        #[test]
        fn shows_image_countdown_and_power_action() {
            let view = ViewModel {
                status: Some(DeviceStatus {
                    current_image: Some("beach.jpg".to_string()),
                    current_index: Some(3),
                    total_images: Some(10),
                    ..Default::default()
                }),
                countdown: Some(CountdownView {
                    display_seconds: 4,
                    state: DisplayState::Active,
                    urgent: true,
                }),
                power_action: PowerActionView {
                    kind: Some(PowerActionKind::Restart),
                    phase: PowerPhase::CountingDown,
                    remaining_seconds: Some(3),
                    message: Some("Restarting in 3 seconds...".to_string()),
                    cancellable: true,
                },
            };

            assert_eq!(
                status_line(&view),
                "beach.jpg (3/10) | next in 4s | Restarting in 3 seconds..."
            );
        }

        #[test]
        fn shows_device_position_as_reported() {
            let at = |position: u32, total: u32| ViewModel {
                status: Some(DeviceStatus {
                    current_image: Some("a.jpg".to_string()),
                    current_index: Some(position),
                    total_images: Some(total),
                    ..Default::default()
                }),
                ..Default::default()
            };

            assert_eq!(status_line(&at(3, 3)), "a.jpg (3/3)");
            assert_eq!(status_line(&at(1, 3)), "a.jpg (1/3)");
            assert_eq!(
                status_line(&at(u32::MAX, u32::MAX)),
                format!("a.jpg ({0}/{0})", u32::MAX)
            );
        }
    }
}
