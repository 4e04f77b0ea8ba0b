// src/cli/dispatcher.rs

use anyhow::{Context as _, Result};
use colored::*;

use crate::{
    cli::{
        Session,
        queue::CommandQueue,
        registry::{self, CommandKind, CommandRegistry},
    },
    constants::{EXIT_TOKENS, SIMILARITY_THRESHOLD},
    core::fuzzy,
};

/// Observable state of one dispatcher instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    AwaitingInput,
    Dispatching,
    Exited,
}

/// Declarative description of one menu: its legal commands, its position in
/// the menu tree, and how to rebuild the path to it after a reset.
pub struct MenuConfig<C: 'static> {
    /// Prompt location, e.g. `/stocks/fa`.
    pub location: &'static str,
    /// Distance from the root menu. Drives `home` (depth exit tokens),
    /// `exit` (depth + 1), and the unwind part of `reset`.
    pub depth: usize,
    /// The menu's own commands; universal commands are implicit.
    pub entries: &'static [registry::CommandEntry<C>],
    /// Renders the menu listing shown on entry and on `help`.
    pub help: fn(&C) -> String,
    /// Commands that re-enter this menu from the root, including the reload
    /// commands that restore the current context (e.g. `load AAPL`).
    pub reset_commands: fn(&C) -> Vec<String>,
}

impl<C> std::fmt::Debug for MenuConfig<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuConfig")
            .field("location", &self.location)
            .field("depth", &self.depth)
            .field("entries", &self.entries.len())
            .finish()
    }
}

enum NextLine {
    Line(String),
    Exit,
}

/// The REPL core driving one menu: drains the queue, reads interactive
/// input, resolves command lines against the registry, and applies the
/// universal command semantics.
pub struct Dispatcher<C: 'static> {
    menu: &'static MenuConfig<C>,
    registry: CommandRegistry<C>,
    ctx: C,
    queue: CommandQueue,
    state: DispatcherState,
    show_help: bool,
}

impl<C> std::fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("menu", &self.menu)
            .field("queue", &self.queue)
            .field("state", &self.state)
            .finish()
    }
}

impl<C> Dispatcher<C> {
    /// Builds a dispatcher for `menu`, taking ownership of the context and
    /// the pending queue. Fails if the menu's entry table is invalid.
    pub fn new(menu: &'static MenuConfig<C>, ctx: C, queue: CommandQueue) -> Result<Self> {
        let registry = CommandRegistry::new(menu.entries)
            .with_context(|| format!("invalid registry for the {} menu", menu.location))?;
        Ok(Self {
            menu,
            registry,
            ctx,
            queue,
            state: DispatcherState::AwaitingInput,
            show_help: true,
        })
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Runs the menu loop until an exit token reaches the queue head (or the
    /// input surface signals end of input). Returns the residual queue for
    /// the caller to continue draining.
    pub fn run(&mut self, session: &mut Session) -> Result<CommandQueue> {
        log::info!("entering {} menu", self.menu.location);
        loop {
            let line = match self.next_line(session)? {
                NextLine::Exit => {
                    self.state = DispatcherState::Exited;
                    log::info!("leaving {} menu", self.menu.location);
                    return Ok(std::mem::take(&mut self.queue));
                }
                NextLine::Line(line) => line,
            };
            self.dispatch_line(&line, session)?;
        }
    }

    /// Picks the next command line: queue head first, interactive input when
    /// the queue is empty. The menu listing is shown once before the first
    /// interactive read, matching entry into a fresh menu.
    fn next_line(&mut self, session: &mut Session) -> Result<NextLine> {
        if let Some(head) = self.queue.pop_front() {
            let head = head.trim().to_string();
            if EXIT_TOKENS.contains(&head.as_str()) {
                session.display.print("");
                return Ok(NextLine::Exit);
            }
            // Echo replayed leaf commands so queued actions stay legible.
            if let Some(name) = head.split_whitespace().next()
                && let Some(entry) = self.registry.find(registry::resolve_alias(name))
                && matches!(entry.kind, CommandKind::Leaf(_))
            {
                session.display.print(&format!(
                    "{} {} $ {}",
                    session.settings.flair, self.menu.location, head
                ));
            }
            return Ok(NextLine::Line(head));
        }

        self.state = DispatcherState::AwaitingInput;
        if self.show_help {
            self.show_help = false;
            session.display.print(&(self.menu.help)(&self.ctx));
        }
        let prompt = format!("{} {} $ ", session.settings.flair, self.menu.location);
        match session
            .input
            .read_line(&prompt, self.registry.legal_names())?
        {
            Some(line) => Ok(NextLine::Line(line)),
            None => Ok(NextLine::Exit),
        }
    }

    /// Executes one command line: navigation split, tokenization, alias
    /// resolution, universal semantics, registry dispatch, recovery.
    fn dispatch_line(&mut self, raw: &str, session: &mut Session) -> Result<()> {
        self.state = DispatcherState::Dispatching;
        self.show_help = false;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            session.display.print("");
            self.state = DispatcherState::AwaitingInput;
            return Ok(());
        }

        // Navigation path: the first segment runs now, the rest join the
        // queue front in written order. A leading slash means "from home".
        let line = if trimmed.contains('/') {
            let mut segments = trimmed.split('/');
            let first = segments.next().unwrap_or_default();
            let rest: Vec<&str> = segments.filter(|segment| !segment.is_empty()).collect();
            self.queue.prepend(rest);
            if first.is_empty() {
                "home".to_string()
            } else {
                first.to_string()
            }
        } else {
            trimmed.to_string()
        };

        let Some(tokens) = shlex::split(&line) else {
            session.display.print(&format!(
                "{} unbalanced quoting in '{line}'",
                "Error:".red().bold()
            ));
            self.state = DispatcherState::AwaitingInput;
            return Ok(());
        };
        let Some((name_token, tail)) = tokens.split_first() else {
            session.display.print("");
            self.state = DispatcherState::AwaitingInput;
            return Ok(());
        };

        let name = registry::resolve_alias(name_token);
        log::debug!(
            "dispatching '{}' in {} (queued: {})",
            name,
            self.menu.location,
            self.queue.len()
        );

        match name {
            "cls" => session.display.clear(),
            "help" => session.display.print(&(self.menu.help)(&self.ctx)),
            "quit" => {
                session.display.print("");
                self.queue.push_front("quit");
            }
            "home" => self.unwind(self.menu.depth),
            "exit" => self.unwind(self.menu.depth + 1),
            "reset" => {
                let mut lines: Vec<String> =
                    std::iter::repeat_n("quit".to_string(), self.menu.depth).collect();
                lines.extend((self.menu.reset_commands)(&self.ctx));
                self.queue.prepend(lines);
            }
            _ => match self.registry.find(name) {
                Some(entry) => match entry.kind {
                    CommandKind::Leaf(handler) => {
                        if let Err(err) = handler(&mut self.ctx, tail, &mut self.queue, session) {
                            log::warn!("command '{name}' failed: {err:#}");
                            session
                                .display
                                .print(&format!("{} {err:#}", "Error:".red().bold()));
                        }
                    }
                    CommandKind::SubMenu(enter) => {
                        let queue = std::mem::take(&mut self.queue);
                        self.queue = enter(&mut self.ctx, queue, session)?;
                    }
                },
                None => self.recover(&line, name_token, tail, session),
            },
        }

        self.state = DispatcherState::AwaitingInput;
        Ok(())
    }

    /// Pushes `count` exit tokens so the next turns unwind that many menu
    /// levels.
    fn unwind(&mut self, count: usize) {
        for _ in 0..count {
            self.queue.push_front("quit");
        }
    }

    /// Unrecognized-command recovery: report, then try a single fuzzy
    /// correction. The corrected line keeps the argument tail and jumps the
    /// queue; a degenerate correction drops the queue so replay cannot loop.
    fn recover(&mut self, line: &str, name_token: &str, tail: &[String], session: &mut Session) {
        session.display.print(&format!(
            "The command '{}' doesn't exist on the {} menu.",
            name_token, self.menu.location
        ));
        let legal = self.registry.legal_names();
        match fuzzy::closest_match(
            name_token,
            legal.iter().map(String::as_str),
            SIMILARITY_THRESHOLD,
        ) {
            Some(similar) => {
                let corrected = if tail.is_empty() {
                    similar.to_string()
                } else {
                    format!("{} {}", similar, tail.join(" "))
                };
                if corrected == line {
                    self.queue.clear();
                    session.display.print("");
                } else {
                    session.display.print(&format!("Replacing by '{corrected}'."));
                    self.queue.push_front(corrected);
                }
            }
            None => session.display.print(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry::CommandEntry;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Context recording which leaf commands ran, in order.
    #[derive(Debug, Default, Clone)]
    struct TestCtx {
        ran: Rc<RefCell<Vec<String>>>,
    }

    fn record(name: &str) -> impl Fn(&mut TestCtx) {
        let name = name.to_string();
        move |ctx| ctx.ran.borrow_mut().push(name.clone())
    }

    fn run_a(ctx: &mut TestCtx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        record("a")(ctx);
        Ok(())
    }
    fn run_b(ctx: &mut TestCtx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        record("b")(ctx);
        Ok(())
    }
    fn run_c(ctx: &mut TestCtx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        record("c")(ctx);
        Ok(())
    }
    fn run_x(ctx: &mut TestCtx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        record("x")(ctx);
        Ok(())
    }
    fn load(
        ctx: &mut TestCtx,
        args: &[String],
        _: &mut CommandQueue,
        _: &mut Session,
    ) -> Result<()> {
        ctx.ran.borrow_mut().push(format!("load {}", args.join(" ")));
        Ok(())
    }
    fn boom(_: &mut TestCtx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        anyhow::bail!("collaborator unavailable")
    }

    static ENTRIES: &[CommandEntry<TestCtx>] = &[
        CommandEntry { name: "a", kind: CommandKind::Leaf(run_a) },
        CommandEntry { name: "b", kind: CommandKind::Leaf(run_b) },
        CommandEntry { name: "c", kind: CommandKind::Leaf(run_c) },
        CommandEntry { name: "x", kind: CommandKind::Leaf(run_x) },
        CommandEntry { name: "load", kind: CommandKind::Leaf(load) },
        CommandEntry { name: "boom", kind: CommandKind::Leaf(boom) },
    ];

    fn help(_: &TestCtx) -> String {
        "test menu".to_string()
    }

    fn no_reset(_: &TestCtx) -> Vec<String> {
        Vec::new()
    }

    static ROOT_MENU: MenuConfig<TestCtx> = MenuConfig {
        location: "/",
        depth: 0,
        entries: ENTRIES,
        help,
        reset_commands: no_reset,
    };

    static NESTED_MENU: MenuConfig<TestCtx> = MenuConfig {
        location: "/outer/inner",
        depth: 2,
        entries: ENTRIES,
        help,
        reset_commands: nested_reset,
    };

    fn nested_reset(_: &TestCtx) -> Vec<String> {
        vec!["outer".to_string(), "inner".to_string()]
    }

    fn dispatcher(menu: &'static MenuConfig<TestCtx>) -> (Dispatcher<TestCtx>, TestCtx) {
        let ctx = TestCtx::default();
        let dispatcher = Dispatcher::new(menu, ctx.clone(), CommandQueue::new()).unwrap();
        (dispatcher, ctx)
    }

    #[test]
    fn navigation_path_executes_left_to_right() {
        let (mut dispatcher, ctx) = dispatcher(&ROOT_MENU);
        let (mut session, _lines) = Session::scripted(&["a/b/c"]);
        dispatcher.run(&mut session).unwrap();
        assert_eq!(*ctx.ran.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn leading_slash_goes_home_first() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, _lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("/x", &mut session).unwrap();
        // The slash segment became "home" (a no-op at depth 0) and `x` is
        // still pending.
        assert_eq!(dispatcher.queue.iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn unknown_command_is_corrected_and_requeued() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("laod AAPL", &mut session).unwrap();
        assert_eq!(
            dispatcher.queue.iter().collect::<Vec<_>>(),
            vec!["load AAPL"]
        );
        let output = lines.borrow();
        let notices = output
            .iter()
            .filter(|line| line.contains("Replacing by 'load AAPL'."))
            .count();
        assert_eq!(notices, 1);
        assert!(output.iter().any(|line| line.contains("'laod'")));
    }

    #[test]
    fn corrected_line_executes_with_tail_preserved() {
        let (mut dispatcher, ctx) = dispatcher(&ROOT_MENU);
        let (mut session, _lines) = Session::scripted(&["laod AAPL"]);
        dispatcher.run(&mut session).unwrap();
        assert_eq!(*ctx.ran.borrow(), vec!["load AAPL"]);
    }

    #[test]
    fn degenerate_correction_clears_the_queue() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, lines) = Session::scripted(&[]);
        dispatcher.queue.push_back("stale follow-up");
        let tail = vec!["AAPL".to_string()];
        dispatcher.recover("load AAPL", "load", &tail, &mut session);
        assert!(dispatcher.queue.is_empty());
        assert!(!lines.borrow().iter().any(|line| line.contains("Replacing")));
    }

    #[test]
    fn home_enqueues_one_exit_token_per_level() {
        let (mut dispatcher, _ctx) = dispatcher(&NESTED_MENU);
        let (mut session, _lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("home", &mut session).unwrap();
        assert_eq!(
            dispatcher.queue.iter().collect::<Vec<_>>(),
            vec!["quit", "quit"]
        );
    }

    #[test]
    fn exit_unwinds_one_level_past_the_root() {
        let (mut dispatcher, _ctx) = dispatcher(&NESTED_MENU);
        let (mut session, _lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("exit", &mut session).unwrap();
        assert_eq!(
            dispatcher.queue.iter().collect::<Vec<_>>(),
            vec!["quit", "quit", "quit"]
        );
    }

    #[test]
    fn reset_unwinds_then_replays_the_reentry_path() {
        let (mut dispatcher, _ctx) = dispatcher(&NESTED_MENU);
        let (mut session, _lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("reset", &mut session).unwrap();
        assert_eq!(
            dispatcher.queue.iter().collect::<Vec<_>>(),
            vec!["quit", "quit", "outer", "inner"]
        );
    }

    #[test]
    fn exit_token_at_queue_head_returns_the_residue() {
        let ctx = TestCtx::default();
        let queue = CommandQueue::from_lines(["a", "quit", "b"]);
        let mut dispatcher = Dispatcher::new(&ROOT_MENU, ctx.clone(), queue).unwrap();
        let (mut session, _lines) = Session::scripted(&[]);
        let residue = dispatcher.run(&mut session).unwrap();
        assert_eq!(*ctx.ran.borrow(), vec!["a"]);
        assert_eq!(residue.iter().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(dispatcher.state(), DispatcherState::Exited);
    }

    #[test]
    fn handler_error_leaves_dispatcher_ready_and_queue_unchanged() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, lines) = Session::scripted(&[]);
        dispatcher.queue.push_back("b");
        dispatcher.dispatch_line("boom", &mut session).unwrap();
        assert_eq!(dispatcher.state(), DispatcherState::AwaitingInput);
        assert_eq!(dispatcher.queue.iter().collect::<Vec<_>>(), vec!["b"]);
        assert!(
            lines
                .borrow()
                .iter()
                .any(|line| line.contains("collaborator unavailable"))
        );
    }

    #[test]
    fn queued_failure_behaves_like_interactive_failure() {
        let ctx = TestCtx::default();
        let queue = CommandQueue::from_lines(["boom", "a", "quit"]);
        let mut dispatcher = Dispatcher::new(&ROOT_MENU, ctx.clone(), queue).unwrap();
        let (mut session, lines) = Session::scripted(&[]);
        dispatcher.run(&mut session).unwrap();
        // The failure was reported and the rest of the queue still ran.
        assert_eq!(*ctx.ran.borrow(), vec!["a"]);
        assert!(
            lines
                .borrow()
                .iter()
                .any(|line| line.contains("collaborator unavailable"))
        );
    }

    #[test]
    fn help_is_shown_once_on_first_interactive_read() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, lines) = Session::scripted(&["a", "b"]);
        dispatcher.run(&mut session).unwrap();
        let shown = lines
            .borrow()
            .iter()
            .filter(|line| line.as_str() == "test menu")
            .count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn cls_clears_the_display() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, lines) = Session::scripted(&[]);
        dispatcher.dispatch_line("cls", &mut session).unwrap();
        assert!(
            lines
                .borrow()
                .iter()
                .any(|line| line == crate::cli::display::RecordingDisplay::CLEAR_MARKER)
        );
    }

    #[test]
    fn end_of_input_exits_the_menu() {
        let (mut dispatcher, _ctx) = dispatcher(&ROOT_MENU);
        let (mut session, _lines) = Session::scripted(&[]);
        let residue = dispatcher.run(&mut session).unwrap();
        assert!(residue.is_empty());
        assert_eq!(dispatcher.state(), DispatcherState::Exited);
    }

    #[test]
    fn blank_input_is_ignored() {
        let (mut dispatcher, ctx) = dispatcher(&ROOT_MENU);
        let (mut session, _lines) = Session::scripted(&["", "  ", "a"]);
        dispatcher.run(&mut session).unwrap();
        assert_eq!(*ctx.ran.borrow(), vec!["a"]);
    }
}
