// src/menus/stocks.rs

use anyhow::{Result, bail};
use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use crate::{
    cli::{
        Session,
        dispatcher::MenuConfig,
        queue::CommandQueue,
        reaction,
        registry::{CommandEntry, CommandKind},
    },
    core::options::{self, parse_date},
    menus::{dd, fa, qa},
    models::{DdContext, FaContext, Interval, QaContext, StocksContext, TargetColumn},
    providers,
};

/// The `/stocks` menu: loads a ticker context and opens the data menus.
pub static MENU: MenuConfig<StocksContext> = MenuConfig {
    location: "/stocks",
    depth: 1,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<StocksContext>] = &[
    CommandEntry { name: "load", kind: CommandKind::Leaf(load) },
    CommandEntry { name: "search", kind: CommandKind::Leaf(search) },
    CommandEntry { name: "quote", kind: CommandKind::Leaf(quote) },
    CommandEntry { name: "candle", kind: CommandKind::Leaf(candle) },
    CommandEntry { name: "fa", kind: CommandKind::SubMenu(fa_menu) },
    CommandEntry { name: "dd", kind: CommandKind::SubMenu(dd_menu) },
    CommandEntry { name: "qa", kind: CommandKind::SubMenu(qa_menu) },
];

fn print_help(ctx: &StocksContext) -> String {
    let loaded = match (&ctx.ticker, ctx.start, ctx.end) {
        (Some(ticker), Some(start), Some(end)) => {
            format!("{ticker} ({} candles, {start} to {end})", ctx.interval.label())
        }
        _ => "none".to_string(),
    };
    format!(
        "
Stocks menu. Loaded: {loaded}

    search          search the ticker directory and pick a match
    load            load a ticker and price window
    quote           latest quote of the loaded ticker
    candle          price summary of the loaded window

>   fa              fundamental analysis
>   dd              due diligence
>   qa              quantitative analysis
"
    )
}

fn reset_commands(ctx: &StocksContext) -> Vec<String> {
    let mut commands = vec!["stocks".to_string()];
    if let Some(ticker) = ctx.loaded_ticker() {
        commands.push(format!("load {ticker}"));
    }
    commands
}

/// Load a ticker and price window into the stocks context.
#[derive(Parser, Debug)]
#[command(name = "load", no_binary_name = true, disable_version_flag = true)]
struct LoadArgs {
    /// Ticker symbol to load.
    #[arg(short, long, required = true)]
    ticker: String,
    /// Start date of the price window (YYYY-MM-DD).
    #[arg(short, long, value_parser = parse_date)]
    start: Option<NaiveDate>,
    /// End date of the price window (YYYY-MM-DD).
    #[arg(short, long, value_parser = parse_date)]
    end: Option<NaiveDate>,
    /// Candle interval in minutes (1440 = daily).
    #[arg(short, long, value_enum, default_value = "1440")]
    interval: Interval,
}

fn load(
    ctx: &mut StocksContext,
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
    if ticker.is_empty()
        || !ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        bail!("'{ticker}' is not a valid ticker symbol");
    }

    let today = Local::now().date_naive();
    let end = opts.end.unwrap_or(today);
    let start = opts.start.unwrap_or(end - Duration::days(365));
    if start > end {
        bail!("start date {start} is after end date {end}");
    }

    ctx.ticker = Some(ticker.clone());
    ctx.start = Some(start);
    ctx.end = Some(end);
    ctx.interval = opts.interval;

    session.display.print(&format!(
        "Loaded {ticker}, {} candles from {start} to {end}.",
        opts.interval.label()
    ));
    Ok(())
}

/// Search the ticker directory; picking a match enqueues its `load`.
#[derive(Parser, Debug)]
#[command(name = "search", no_binary_name = true, disable_version_flag = true)]
struct SearchArgs {
    /// Query matched against ticker symbols and company names.
    #[arg(short, long, required = true)]
    query: String,
    /// Maximum number of candidates listed.
    #[arg(short, long, default_value_t = 10)]
    limit: usize,
}

fn search(
    _ctx: &mut StocksContext,
    args: &[String],
    queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) =
        options::parse_args::<SearchArgs>(args, Some("--query"), session.display.as_mut())?
    else {
        return Ok(());
    };

    let matches = providers::search(&opts.query, opts.limit);
    if matches.is_empty() {
        session
            .display
            .print(&format!("No tickers matching '{}'.", opts.query));
        return Ok(());
    }

    let labels: Vec<String> = matches
        .iter()
        .map(|(symbol, name)| format!("{symbol:<6} {name}"))
        .collect();
    let timeout = std::time::Duration::from_secs(session.settings.reaction_timeout_secs);
    let events = reaction::stdin_choice_events();
    if let Some(choice) = reaction::await_choice(
        "Select a ticker to load:",
        &labels,
        &events,
        timeout,
        session.display.as_mut(),
    ) {
        // The selection flows through the queue like any other follow-up.
        queue.push_front(format!("load {}", matches[choice].0));
    }
    Ok(())
}

/// Latest quote of the loaded ticker.
#[derive(Parser, Debug)]
#[command(name = "quote", no_binary_name = true, disable_version_flag = true)]
struct QuoteArgs {}

fn quote(
    ctx: &mut StocksContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(_opts) = options::parse_args::<QuoteArgs>(args, None, session.display.as_mut())?
    else {
        return Ok(());
    };
    let Some(ticker) = ctx.loaded_ticker() else {
        bail!("use 'load <ticker>' first");
    };
    session.display.print(&providers::quote(ticker));
    Ok(())
}

/// Price summary over the loaded window.
#[derive(Parser, Debug)]
#[command(name = "candle", no_binary_name = true, disable_version_flag = true)]
struct CandleArgs {
    /// Number of trailing candles to summarize.
    #[arg(short, long, default_value_t = 60)]
    num: usize,
}

fn candle(
    ctx: &mut StocksContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) = options::parse_args::<CandleArgs>(args, Some("--num"), session.display.as_mut())?
    else {
        return Ok(());
    };
    let Some(ticker) = ctx.loaded_ticker() else {
        bail!("use 'load <ticker>' first");
    };
    let series = providers::close_series(ticker, opts.num.max(2));
    session.display.print(&format!(
        "{ticker} close, last {} candles ({})\n{}",
        series.len(),
        ctx.interval.label(),
        providers::summary_stats(&series)
    ));
    Ok(())
}

fn fa_menu(
    ctx: &mut StocksContext,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    let Some(ticker) = ctx.loaded_ticker() else {
        session.display.print("Use 'load <ticker>' prior to this command!");
        return Ok(queue);
    };
    let child = FaContext {
        ticker: ticker.to_string(),
        start: ctx.start,
    };
    super::enter(&fa::MENU, child, queue, session)
}

fn dd_menu(
    ctx: &mut StocksContext,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    let Some(ticker) = ctx.loaded_ticker() else {
        session.display.print("Use 'load <ticker>' prior to this command!");
        return Ok(queue);
    };
    let child = DdContext {
        ticker: ticker.to_string(),
    };
    super::enter(&dd::MENU, child, queue, session)
}

fn qa_menu(
    ctx: &mut StocksContext,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    let Some(ticker) = ctx.loaded_ticker() else {
        session.display.print("Use 'load <ticker>' prior to this command!");
        return Ok(queue);
    };
    let child = QaContext {
        ticker: ticker.to_string(),
        target: TargetColumn::default(),
    };
    super::enter(&qa::MENU, child, queue, session)
}
