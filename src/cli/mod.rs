// src/cli/mod.rs

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        display::{DisplaySurface, TerminalDisplay},
        input::{InputSurface, ReadlineInput},
        queue::CommandQueue,
    },
    config::Settings,
};

pub mod dispatcher;
pub mod display;
pub mod input;
pub mod queue;
pub mod reaction;
pub mod registry;

/// finterm: a terminal-driven stock research shell.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// Commands to queue at startup, e.g. `/stocks/load TSLA/fa/income`,
    /// or the path of a `.ft` routine file (one command per line).
    #[arg()]
    pub jobs: Vec<String>,
}

/// The I/O surfaces and settings shared by every menu level. Passed down
/// explicitly through sub-menu composition; there is no ambient session
/// state.
pub struct Session {
    pub input: Box<dyn InputSurface>,
    pub display: Box<dyn DisplaySurface>,
    pub settings: Settings,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Builds the production session: readline input with completion and a
    /// stdout display.
    pub fn new(settings: Settings) -> Result<Self> {
        let input = ReadlineInput::new(settings.use_completion)?;
        Ok(Self {
            input: Box::new(input),
            display: Box::new(TerminalDisplay),
            settings,
        })
    }

    /// Test session: scripted input lines and a recording display, plus a
    /// shared handle onto everything printed.
    #[cfg(test)]
    pub fn scripted(
        lines: &[&str],
    ) -> (Self, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let (display, printed) = display::RecordingDisplay::new();
        let session = Self {
            input: Box::new(input::ScriptedInput::new(lines)),
            display: Box::new(display),
            settings: Settings::default(),
        };
        (session, printed)
    }
}

/// Turns startup argv into the root menu's seed queue. The arguments are
/// joined and split on `/`, so `finterm /stocks/load TSLA/fa` queues
/// `stocks`, `load TSLA`, `fa`. A missing leading slash is forgiven.
pub fn seed_queue(jobs: &[String]) -> CommandQueue {
    let joined = jobs.join(" ");
    CommandQueue::from_lines(
        joined
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn seed_queue_splits_on_slashes() {
        let queue = seed_queue(&jobs(&["/stocks/load TSLA/fa/income"]));
        assert_eq!(
            queue.into_lines(),
            vec![
                "stocks".to_string(),
                "load TSLA".into(),
                "fa".into(),
                "income".into()
            ]
        );
    }

    #[test]
    fn seed_queue_forgives_a_missing_leading_slash() {
        let queue = seed_queue(&jobs(&["stocks/load", "TSLA"]));
        assert_eq!(
            queue.into_lines(),
            vec!["stocks".to_string(), "load TSLA".into()]
        );
    }

    #[test]
    fn seed_queue_is_empty_for_no_jobs() {
        assert!(seed_queue(&[]).is_empty());
    }
}
