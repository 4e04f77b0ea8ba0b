// src/menus/root.rs

use anyhow::Result;

use crate::{
    cli::{
        Session,
        dispatcher::MenuConfig,
        queue::CommandQueue,
        registry::{CommandEntry, CommandKind},
    },
    menus::stocks,
    models::{RootContext, StocksContext},
};

/// The root (`/`) menu of the terminal.
pub static MENU: MenuConfig<RootContext> = MenuConfig {
    location: "/",
    depth: 0,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<RootContext>] = &[
    CommandEntry { name: "about", kind: CommandKind::Leaf(about) },
    CommandEntry { name: "keys", kind: CommandKind::Leaf(keys) },
    CommandEntry { name: "stocks", kind: CommandKind::SubMenu(stocks_menu) },
];

fn print_help(_ctx: &RootContext) -> String {
    "
Multiple jobs can be chained with '/', each segment being one command. E.g.
    stocks/load TSLA/fa/income

The commands you should be aware of when navigating the terminal:
    cls             clear the screen
    help / h / ?    show this menu again
    quit / q / ..   quit this menu and go one level up
    exit            exit the terminal
    reset / r       reset the terminal, replaying the loaded context

    about           about finterm
    keys            check data provider API keys

>   stocks          stock market research
"
    .to_string()
}

fn reset_commands(_ctx: &RootContext) -> Vec<String> {
    Vec::new()
}

fn about(
    _ctx: &mut RootContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(concat!(
        "finterm ",
        env!("CARGO_PKG_VERSION"),
        " - a terminal-driven stock research shell.\n",
        "Data menus work offline with deterministic placeholder series; wire\n",
        "provider API keys to replace them (see 'keys').",
    ));
    Ok(())
}

/// Reports which provider keys are present in the environment. Only presence
/// is checked; keys are never printed.
fn keys(
    _ctx: &mut RootContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let mut out = String::from("API keys:");
    for key in ["FINTERM_FMP_KEY", "FINTERM_AV_KEY", "FINTERM_FINNHUB_KEY"] {
        let status = if std::env::var(key).is_ok_and(|value| !value.is_empty()) {
            "defined"
        } else {
            "not defined"
        };
        out.push_str(&format!("\n  {key:<20} {status}"));
    }
    session.display.print(&out);
    Ok(())
}

fn stocks_menu(
    _ctx: &mut RootContext,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    super::enter(&stocks::MENU, StocksContext::default(), queue, session)
}
