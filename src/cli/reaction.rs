// src/cli/reaction.rs

use std::io::BufRead;
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use crate::cli::display::DisplaySurface;

/// Presents a numbered selection affordance and waits, bounded by `timeout`,
/// for a single choice event. On timeout (or a closed channel) the
/// affordance is dismissed and `None` is returned; the menu continues in a
/// consistent state either way. Out-of-range events are ignored until the
/// deadline passes.
///
/// This is the only cancellation boundary in the core, and it is scoped to
/// one prompt, never to a whole menu loop.
pub fn await_choice(
    title: &str,
    options: &[String],
    events: &Receiver<usize>,
    timeout: Duration,
    display: &mut dyn DisplaySurface,
) -> Option<usize> {
    let mut block = String::from(title);
    for (idx, option) in options.iter().enumerate() {
        block.push_str(&format!("\n  [{idx}] {option}"));
    }
    block.push_str(&format!(
        "\n(reply with a number within {}s)",
        timeout.as_secs()
    ));
    display.print(&block);

    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match events.recv_timeout(remaining) {
            Ok(choice) if choice < options.len() => {
                display.print("(selection closed)");
                return Some(choice);
            }
            Ok(other) => {
                log::debug!("ignoring out-of-range selection {other}");
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                log::warn!("selection prompt timed out after {}s", timeout.as_secs());
                display.print("(selection timed out, prompt dismissed)");
                return None;
            }
        }
    }
}

/// Reads one line from stdin on a background thread and delivers it as a
/// selection event. The thread ends after a single line either way.
pub fn stdin_choice_events() -> Receiver<usize> {
    let (tx, rx) = channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_ok()
            && let Ok(choice) = line.trim().parse::<usize>()
        {
            let _ = tx.send(choice);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::display::RecordingDisplay;
    use std::sync::mpsc::channel;

    fn options() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".into(), "GME".into()]
    }

    #[test]
    fn delivered_choice_is_returned() {
        let (tx, rx) = channel();
        tx.send(1).unwrap();
        let (mut display, lines) = RecordingDisplay::new();
        let picked = await_choice(
            "Pick a ticker",
            &options(),
            &rx,
            Duration::from_secs(1),
            &mut display,
        );
        assert_eq!(picked, Some(1));
        assert!(lines.borrow().iter().any(|l| l.contains("selection closed")));
    }

    #[test]
    fn timeout_dismisses_the_affordance() {
        let (_tx, rx) = channel::<usize>();
        let (mut display, lines) = RecordingDisplay::new();
        let picked = await_choice(
            "Pick a ticker",
            &options(),
            &rx,
            Duration::from_millis(10),
            &mut display,
        );
        assert_eq!(picked, None);
        assert!(lines.borrow().iter().any(|l| l.contains("timed out")));
    }

    #[test]
    fn out_of_range_events_are_ignored_until_a_valid_one() {
        let (tx, rx) = channel();
        tx.send(9).unwrap();
        tx.send(0).unwrap();
        let (mut display, _lines) = RecordingDisplay::new();
        let picked = await_choice(
            "Pick a ticker",
            &options(),
            &rx,
            Duration::from_secs(1),
            &mut display,
        );
        assert_eq!(picked, Some(0));
    }

    #[test]
    fn closed_channel_behaves_like_a_timeout() {
        let (tx, rx) = channel::<usize>();
        drop(tx);
        let (mut display, _lines) = RecordingDisplay::new();
        let picked = await_choice(
            "Pick a ticker",
            &options(),
            &rx,
            Duration::from_secs(5),
            &mut display,
        );
        assert_eq!(picked, None);
    }
}
