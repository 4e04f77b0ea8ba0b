// src/constants.rs

/// Tokens that terminate the active menu when they reach the queue head.
pub const EXIT_TOKENS: &[&str] = &["q", "..", "quit"];

/// Acceptance threshold for "did you mean" command recovery.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// The name of the optional settings file (in ~/.config/finterm/).
pub const SETTINGS_FILENAME: &str = "finterm.toml";

/// The name of the directory holding finterm configuration.
pub const CONFIG_DIR: &str = "finterm";

/// Prompt flair shown before the menu location.
pub const DEFAULT_FLAIR: &str = "🦀";

/// Extension of startup routine files (one command per line).
pub const ROUTINE_EXTENSION: &str = ".ft";

/// Default bounded wait for a reaction-style selection prompt.
pub const DEFAULT_REACTION_TIMEOUT_SECS: u64 = 30;
