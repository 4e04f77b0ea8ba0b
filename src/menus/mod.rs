// src/menus/mod.rs

use anyhow::Result;

use crate::cli::{Session, dispatcher::Dispatcher, dispatcher::MenuConfig, queue::CommandQueue};

pub mod dd;
pub mod fa;
pub mod fmp;
pub mod qa;
pub mod root;
pub mod stocks;

/// Runs a child menu to completion: the child takes the queue by value and
/// its residual queue flows back to the parent when it exits.
pub(crate) fn enter<C: 'static>(
    menu: &'static MenuConfig<C>,
    ctx: C,
    queue: CommandQueue,
    session: &mut Session,
) -> Result<CommandQueue> {
    let mut dispatcher = Dispatcher::new(menu, ctx, queue)?;
    dispatcher.run(session)
}
