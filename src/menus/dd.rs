// src/menus/dd.rs

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
    models::DdContext,
    providers,
};

/// The `/stocks/dd` due-diligence menu.
pub static MENU: MenuConfig<DdContext> = MenuConfig {
    location: "/stocks/dd",
    depth: 2,
    entries: ENTRIES,
    help: print_help,
    reset_commands: reset_commands,
};

const ENTRIES: &[CommandEntry<DdContext>] = &[
    CommandEntry { name: "rating", kind: CommandKind::Leaf(rating) },
    CommandEntry { name: "pt", kind: CommandKind::Leaf(pt) },
    CommandEntry { name: "est", kind: CommandKind::Leaf(est) },
    CommandEntry { name: "sec", kind: CommandKind::Leaf(sec) },
    CommandEntry { name: "supplier", kind: CommandKind::Leaf(supplier) },
    CommandEntry { name: "customer", kind: CommandKind::Leaf(customer) },
];

fn print_help(ctx: &DdContext) -> String {
    format!(
        "
Due diligence for {}:

    rating          analyst ratings
    pt              price targets
    est             earnings estimates
    sec             SEC filings
    supplier        suppliers
    customer        customers
",
        ctx.ticker
    )
}

fn reset_commands(ctx: &DdContext) -> Vec<String> {
    vec![
        "stocks".to_string(),
        format!("load {}", ctx.ticker),
        "dd".to_string(),
    ]
}

/// Shared option of the list-style due-diligence commands.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct NumArgs {
    /// Number of rows to show.
    #[arg(short, long, default_value_t = 5)]
    num: usize,
}

fn table(
    title: &str,
    rows: &[&str],
    ctx: &DdContext,
    session: &mut Session,
) -> Result<()> {
    session
        .display
        .print(&providers::metric_table(&ctx.ticker, title, rows));
    Ok(())
}

fn rating(
    ctx: &mut DdContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    table("analyst ratings", &["buy", "hold", "sell"], ctx, session)
}

fn pt(
    ctx: &mut DdContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) = options::parse_args::<NumArgs>(args, Some("--num"), session.display.as_mut())?
    else {
        return Ok(());
    };
    session.display.print(&providers::statement(
        &ctx.ticker,
        "price targets",
        opts.num,
        false,
    ));
    Ok(())
}

fn est(
    ctx: &mut DdContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    table(
        "earnings estimates",
        &["eps low", "eps avg", "eps high"],
        ctx,
        session,
    )
}

fn sec(
    ctx: &mut DdContext,
    args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    let Some(opts) = options::parse_args::<NumArgs>(args, Some("--num"), session.display.as_mut())?
    else {
        return Ok(());
    };
    session.display.print(&providers::statement(
        &ctx.ticker,
        "SEC filings",
        opts.num,
        true,
    ));
    Ok(())
}

fn supplier(
    ctx: &mut DdContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    table("suppliers", &["tier 1", "tier 2", "tier 3"], ctx, session)
}

fn customer(
    ctx: &mut DdContext,
    _args: &[String],
    _queue: &mut CommandQueue,
    session: &mut Session,
) -> Result<()> {
    table("customers", &["retail", "b2b", "public"], ctx, session)
}
