// src/cli/input.rs

use anyhow::Result;
use rustyline::{
    Context, Editor, Helper,
    completion::Completer,
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
};

/// The interactive input surface. `Ok(None)` means end of input (Ctrl-D /
/// Ctrl-C), which the dispatcher treats like an exit token.
pub trait InputSurface {
    fn read_line(&mut self, prompt: &str, completions: &[String]) -> Result<Option<String>>;
}

/// Completion helper fed with the active menu's legal command names before
/// every read. Completion applies to the word under the cursor.
struct MenuHelper {
    candidates: Vec<String>,
}

impl Completer for MenuHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '/')
            .map_or(0, |idx| idx + 1);
        let prefix = &line[start..pos];
        let matches = self
            .candidates
            .iter()
            .filter(|candidate| candidate.starts_with(prefix))
            .cloned()
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for MenuHelper {
    type Hint = String;
}

impl Highlighter for MenuHelper {}
impl Validator for MenuHelper {}
impl Helper for MenuHelper {}

/// Line editor with history and per-menu completion, backed by rustyline.
pub struct ReadlineInput {
    editor: Editor<MenuHelper, DefaultHistory>,
    use_completion: bool,
}

impl std::fmt::Debug for ReadlineInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadlineInput")
            .field("use_completion", &self.use_completion)
            .finish_non_exhaustive()
    }
}

impl ReadlineInput {
    pub fn new(use_completion: bool) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(MenuHelper {
            candidates: Vec::new(),
        }));
        Ok(Self {
            editor,
            use_completion,
        })
    }
}

impl InputSurface for ReadlineInput {
    fn read_line(&mut self, prompt: &str, completions: &[String]) -> Result<Option<String>> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.candidates = if self.use_completion {
                completions.to_vec()
            } else {
                Vec::new()
            };
        }
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Scripted input source for tests; yields its lines, then end-of-input.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl InputSurface for ScriptedInput {
    fn read_line(&mut self, _prompt: &str, _completions: &[String]) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
