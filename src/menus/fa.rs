// src/menus/fa.rs

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    cli::{
        Session,
        dispatcher::MenuConfig,
        queue::CommandQueue,
        registry::{CommandEntry, CommandKind},
    },
    core::options,
    menus::fmp,
    models::{FaContext, FmpContext},
    providers,
};

/// The `/stocks/fa` fundamental-analysis menu.
pub static MENU: MenuConfig<FaContext> = MenuConfig {
    location: "/stocks/fa",
    depth: 2,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<FaContext>] = &[
    CommandEntry { name: "load", kind: CommandKind::Leaf(load) },
    CommandEntry { name: "overview", kind: CommandKind::Leaf(overview) },
    CommandEntry { name: "income", kind: CommandKind::Leaf(income) },
    CommandEntry { name: "balance", kind: CommandKind::Leaf(balance) },
    CommandEntry { name: "cash", kind: CommandKind::Leaf(cash) },
    CommandEntry { name: "mgmt", kind: CommandKind::Leaf(mgmt) },
    CommandEntry { name: "score", kind: CommandKind::Leaf(score) },
    CommandEntry { name: "fmp", kind: CommandKind::SubMenu(fmp_menu) },
];

fn print_help(ctx: &FaContext) -> String {
    format!(
        "
Fundamental analysis for {}:

    load            switch to another ticker
    overview        company profile
    income          income statement
    balance         balance sheet
    cash            cash flow statement
    mgmt            management team scores
    score           investing score

>   fmp             Financial Modeling Prep
",
        ctx.ticker
    )
}

fn reset_commands(ctx: &FaContext) -> Vec<String> {
    vec![
        "stocks".to_string(),
        format!("load {}", ctx.ticker),
        "fa".to_string(),
    ]
}

/// Switch the fundamental-analysis context to another ticker.
#[derive(Parser, Debug)]
#[command(name = "load", no_binary_name = true, disable_version_flag = true)]
struct LoadArgs {
    /// Ticker symbol to analyze.
    #[arg(short, long, required = true)]
    ticker: String,
}

fn load(
    ctx: &mut FaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) =
        options::parse_args::<LoadArgs>(args, Some("--ticker"), session.display.as_mut())?
    else {
        return Ok(());
    };
    let ticker = opts.ticker.to_uppercase();
    if ticker.is_empty() || !ticker.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        bail!("'{ticker}' is not a valid ticker symbol");
    }
    ctx.ticker = ticker;
    session
        .display
        .print(&format!("Analyzing {} from here on.", ctx.ticker));
    Ok(())
}

/// Shared options of the statement commands.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct StatementArgs {
    /// Number of periods to show.
    #[arg(short, long, default_value_t = 4)]
    limit: usize,
    /// Quarterly instead of annual periods.
    #[arg(short, long)]
    quarter: bool,
}

fn statement(
    kind: &str,
    ctx: &FaContext,
    args: &[String],
    session: &mut Session,
) -> Result<()> {
    let Some(opts) =
        options::parse_args::<StatementArgs>(args, Some("--limit"), session.display.as_mut())?
    else {
        return Ok(());
    };
    session.display.print(&providers::statement(
        &ctx.ticker,
        kind,
        opts.limit,
        opts.quarter,
    ));
    Ok(())
}

fn income(
    ctx: &mut FaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    statement("income statement", ctx, args, session)
}

fn balance(
    ctx: &mut FaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    statement("balance sheet", ctx, args, session)
}

fn cash(
    ctx: &mut FaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    statement("cash flow", ctx, args, session)
}

fn overview(
    ctx: &mut FaContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::profile(&ctx.ticker));
    Ok(())
}

fn mgmt(
    ctx: &mut FaContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "management",
        &["tenure (yrs)", "insider own %", "comp ratio"],
    ));
    Ok(())
}

fn score(
    ctx: &mut FaContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "investing score",
        &["value", "growth", "quality"],
    ));
    Ok(())
}

fn fmp_menu(
    ctx: &mut FaContext,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    let child = FmpContext {
        ticker: ctx.ticker.clone(),
    };
    super::enter(&fmp::MENU, child, queue, session)
}
