// src/menus/qa.rs

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        Session,
        dispatcher::MenuConfig,
        queue::CommandQueue,
        registry::{CommandEntry, CommandKind},
    },
    core::options,
    models::{QaContext, TargetColumn},
    providers,
};

/// The `/stocks/qa` quantitative-analysis menu.
pub static MENU: MenuConfig<QaContext> = MenuConfig {
    location: "/stocks/qa",
    depth: 2,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<QaContext>] = &[
    CommandEntry { name: "pick", kind: CommandKind::Leaf(pick) },
    CommandEntry { name: "summary", kind: CommandKind::Leaf(summary) },
    CommandEntry { name: "line", kind: CommandKind::Leaf(line) },
    CommandEntry { name: "hist", kind: CommandKind::Leaf(hist) },
];

fn print_help(ctx: &QaContext) -> String {
    format!(
        "
Quantitative analysis for {} (target: {}):

    pick            pick the target column
    summary         summary statistics
    line            text sparkline of the target
    hist            histogram of the target
",
        ctx.ticker,
        ctx.target.label()
    )
}

fn reset_commands(ctx: &QaContext) -> Vec<String> {
    vec![
        "stocks".to_string(),
        format!("load {}", ctx.ticker),
        "qa".to_string(),
        format!("pick {}", ctx.target.label()),
    ]
}

/// Pick the dataframe column targeted by the other commands.
#[derive(Parser, Debug)]
#[command(name = "pick", no_binary_name = true, disable_version_flag = true)]
struct PickArgs {
    /// Target column.
    #[arg(short, long, value_enum, required = true)]
    target: TargetColumn,
}

fn pick(
    ctx: &mut QaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) =
        options::parse_args::<PickArgs>(args, Some("--target"), session.display.as_mut())?
    else {
        return Ok(());
    };
    ctx.target = opts.target;
    session
        .display
        .print(&format!("Target column set to {}.", ctx.target.label()));
    Ok(())
}

fn summary(
    ctx: &mut QaContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let series = providers::close_series(&ctx.ticker, 252);
    session.display.print(&format!(
        "{} {} summary\n{}",
        ctx.ticker,
        ctx.target.label(),
        providers::summary_stats(&series)
    ));
    Ok(())
}

fn line(
    ctx: &mut QaContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let series = providers::close_series(&ctx.ticker, 60);
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    let glyphs: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let sparkline: String = series
        .iter()
        .map(|value| {
            let idx = (((value - min) / span) * (glyphs.len() - 1) as f64).round() as usize;
            glyphs[idx.min(glyphs.len() - 1)]
        })
        .collect();
    session.display.print(&format!(
        "{} {} ({min:.2} .. {max:.2})\n{sparkline}",
        ctx.ticker,
        ctx.target.label()
    ));
    Ok(())
}

/// Histogram options.
#[derive(Parser, Debug)]
#[command(name = "hist", no_binary_name = true, disable_version_flag = true)]
struct HistArgs {
    /// Number of bins.
    #[arg(short, long, default_value_t = 10)]
    bins: usize,
}

fn hist(
    ctx: &mut QaContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) =
        options::parse_args::<HistArgs>(args, Some("--bins"), session.display.as_mut())?
    else {
        return Ok(());
    };
    if opts.bins == 0 {
        anyhow::bail!("need at least one bin");
    }
    let series = providers::close_series(&ctx.ticker, 252);
    session.display.print(&format!(
        "{} {} histogram\n{}",
        ctx.ticker,
        ctx.target.label(),
        providers::histogram(&series, opts.bins)
    ));
    Ok(())
}
