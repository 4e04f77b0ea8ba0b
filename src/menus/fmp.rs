// src/menus/fmp.rs

use anyhow::Result;

use crate::{
    cli::{
        Session,
        dispatcher::MenuConfig,
        queue::CommandQueue,
        registry::{CommandEntry, CommandKind},
    },
    models::FmpContext,
    providers,
};

/// The `/stocks/fa/fmp` Financial Modeling Prep sub-menu.
pub static MENU: MenuConfig<FmpContext> = MenuConfig {
    location: "/stocks/fa/fmp",
    depth: 3,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<FmpContext>] = &[
    CommandEntry { name: "profile", kind: CommandKind::Leaf(profile) },
    CommandEntry { name: "quote", kind: CommandKind::Leaf(quote) },
    CommandEntry { name: "enterprise", kind: CommandKind::Leaf(enterprise) },
    CommandEntry { name: "metrics", kind: CommandKind::Leaf(metrics) },
    CommandEntry { name: "ratios", kind: CommandKind::Leaf(ratios) },
    CommandEntry { name: "growth", kind: CommandKind::Leaf(growth) },
];

fn print_help(ctx: &FmpContext) -> String {
    format!(
        "
Financial Modeling Prep for {}:

    profile         company profile
    quote           latest quote
    enterprise      enterprise value
    metrics         key metrics
    ratios          financial ratios
    growth          financial statement growth
",
        ctx.ticker
    )
}

fn reset_commands(ctx: &FmpContext) -> Vec<String> {
    vec![
        "stocks".to_string(),
        format!("load {}", ctx.ticker),
        "fa".to_string(),
        "fmp".to_string(),
    ]
}

fn profile(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::profile(&ctx.ticker));
    Ok(())
}

fn quote(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::quote(&ctx.ticker));
    Ok(())
}

fn enterprise(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "enterprise value",
        &["market cap (B)", "net debt (B)", "ev (B)"],
    ));
    Ok(())
}

fn metrics(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "key metrics",
        &["pe ratio", "peg ratio", "payout %", "roe %"],
    ));
    Ok(())
}

fn ratios(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "financial ratios",
        &["current ratio", "quick ratio", "debt/equity"],
    ));
    Ok(())
}

fn growth(
    ctx: &mut FmpContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    session.display.print(&providers::metric_table(
        &ctx.ticker,
        "growth",
        &["revenue %", "eps %", "fcf %"],
    ));
    Ok(())
}
