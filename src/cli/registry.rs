// src/cli/registry.rs

use anyhow::Result;
use thiserror::Error;

use crate::cli::{Session, queue::CommandQueue};

/// Commands with identical semantics in every menu. They are handled by the
/// dispatcher itself and never appear in a menu's entry table.
pub const UNIVERSAL_COMMANDS: &[&str] = &["cls", "home", "help", "quit", "exit", "reset"];

/// Shorthand spellings accepted everywhere.
pub const COMMAND_ALIASES: &[(&str, &str)] = &[
    ("..", "quit"),
    ("q", "quit"),
    ("?", "help"),
    ("h", "help"),
    ("r", "reset"),
];

/// Resolves an alias to its canonical command name. Idempotent: canonical
/// names map to themselves.
pub fn resolve_alias(name: &str) -> &str {
    COMMAND_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| canonical)
}

/// Handler of a terminal action. Receives the raw argument tail, the shared
/// queue (for follow-up commands), and the session's I/O surfaces.
pub type LeafHandler<C> = fn(&mut C, &[String], &mut CommandQueue, &mut Session) -> Result<()>;

/// Handler of a sub-menu command. Takes the queue by value and returns the
/// child's residual queue once it exits.
pub type SubMenuHandler<C> = fn(&mut C, CommandQueue, &mut Session) -> Result<CommandQueue>;

/// What a registered command does: perform an action, or hand control to a
/// nested menu.
pub enum CommandKind<C: 'static> {
    Leaf(LeafHandler<C>),
    SubMenu(SubMenuHandler<C>),
}

impl<C> Clone for CommandKind<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for CommandKind<C> {}

impl<C> std::fmt::Debug for CommandKind<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(_) => f.write_str("Leaf"),
            Self::SubMenu(_) => f.write_str("SubMenu"),
        }
    }
}

/// One legal command of a menu.
#[derive(Debug)]
pub struct CommandEntry<C: 'static> {
    pub name: &'static str,
    pub kind: CommandKind<C>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate command '{0}' in menu registry")]
    Duplicate(String),
    #[error("command '{0}' shadows a universal command")]
    ShadowsUniversal(String),
}

/// The validated set of legal command names for one menu. Fixed at
/// construction; lookups of unknown names are a first-class `None`.
pub struct CommandRegistry<C: 'static> {
    entries: &'static [CommandEntry<C>],
    legal: Vec<String>,
}

impl<C> std::fmt::Debug for CommandRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("legal", &self.legal)
            .finish()
    }
}

impl<C> CommandRegistry<C> {
    /// Validates the entry table: names must be unique and must not collide
    /// with the universal commands or their aliases.
    pub fn new(entries: &'static [CommandEntry<C>]) -> Result<Self, RegistryError> {
        let mut seen: Vec<&str> = Vec::with_capacity(entries.len());
        for entry in entries {
            let reserved = UNIVERSAL_COMMANDS.contains(&entry.name)
                || COMMAND_ALIASES.iter().any(|(alias, _)| *alias == entry.name);
            if reserved {
                return Err(RegistryError::ShadowsUniversal(entry.name.to_string()));
            }
            if seen.contains(&entry.name) {
                return Err(RegistryError::Duplicate(entry.name.to_string()));
            }
            seen.push(entry.name);
        }

        let mut legal: Vec<String> = UNIVERSAL_COMMANDS
            .iter()
            .map(|name| name.to_string())
            .collect();
        legal.extend(COMMAND_ALIASES.iter().map(|(alias, _)| alias.to_string()));
        legal.extend(entries.iter().map(|entry| entry.name.to_string()));

        Ok(Self { entries, legal })
    }

    /// Looks up a canonical (post-alias) name in the entry table.
    pub fn find(&self, name: &str) -> Option<&CommandEntry<C>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Every spelling this menu accepts: universal commands, aliases, and
    /// the menu's own entries. Feeds fuzzy recovery and completion.
    pub fn legal_names(&self) -> &[String] {
        &self.legal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ctx = ();

    fn noop(_: &mut Ctx, _: &[String], _: &mut CommandQueue, _: &mut Session) -> Result<()> {
        Ok(())
    }

    #[test]
    fn alias_resolution_is_idempotent() {
        for (alias, canonical) in COMMAND_ALIASES {
            let once = resolve_alias(alias);
            assert_eq!(once, *canonical);
            assert_eq!(resolve_alias(once), *canonical);
        }
        assert_eq!(resolve_alias("load"), "load");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        static ENTRIES: &[CommandEntry<Ctx>] = &[
            CommandEntry { name: "load", kind: CommandKind::Leaf(noop) },
            CommandEntry { name: "load", kind: CommandKind::Leaf(noop) },
        ];
        assert_eq!(
            CommandRegistry::new(ENTRIES).unwrap_err(),
            RegistryError::Duplicate("load".to_string())
        );
    }

    #[test]
    fn universal_names_cannot_be_shadowed() {
        static ENTRIES: &[CommandEntry<Ctx>] =
            &[CommandEntry { name: "help", kind: CommandKind::Leaf(noop) }];
        assert_eq!(
            CommandRegistry::new(ENTRIES).unwrap_err(),
            RegistryError::ShadowsUniversal("help".to_string())
        );
    }

    #[test]
    fn unknown_lookup_is_none() {
        static ENTRIES: &[CommandEntry<Ctx>] =
            &[CommandEntry { name: "load", kind: CommandKind::Leaf(noop) }];
        let registry = CommandRegistry::new(ENTRIES).unwrap();
        assert!(registry.find("load").is_some());
        assert!(registry.find("quote").is_none());
    }

    #[test]
    fn legal_names_cover_universals_aliases_and_entries() {
        static ENTRIES: &[CommandEntry<Ctx>] =
            &[CommandEntry { name: "load", kind: CommandKind::Leaf(noop) }];
        let registry = CommandRegistry::new(ENTRIES).unwrap();
        let legal = registry.legal_names();
        for name in ["cls", "home", "help", "quit", "exit", "reset", "q", "..", "load"] {
            assert!(legal.iter().any(|l| l == name), "missing '{name}'");
        }
    }
}
