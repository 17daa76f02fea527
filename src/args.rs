//! Raw invocation tokens and their git-style normalization

use std::sync::OnceLock;

use regex::Regex;

/// Tokens that can stand in for a subcommand: anything not starting with a
/// dash, plus the informational flags git answers without a subcommand
/// (`--version`, `--exec-path`, `--html-path`).
fn commandish() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^-]|version|exec-path$|html-path").expect("valid pattern"))
}

/// Fold the first `<word>-` occurrence into `<word>_`, so dashed command
/// names match their rule-table keys. Only the first dash folds: `a-b-c`
/// becomes `a_b-c`. Later dashes are part of the name.
#[must_use]
pub(crate) fn fold_command_name(name: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\w)-").expect("valid pattern"));
    re.replace(name, "${1}_").into_owned()
}

/// The raw argument vector of one invocation.
///
/// Constructed once from the tokens the operating system handed us, mutated
/// in place by rule-table handlers during dispatch, and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Inject `help` at the front when no token could name a subcommand, so
    /// a bare invocation shows help instead of doing nothing.
    pub fn ensure_default_command(&mut self) {
        if !self.tokens.iter().any(|t| commandish().is_match(t)) {
            self.tokens.insert(0, "help".to_string());
        }
    }

    /// The normalized rule-table lookup key: token 0 with its first dash
    /// folded to an underscore.
    #[must_use]
    pub fn principal_command(&self) -> String {
        self.tokens
            .first()
            .map(|t| fold_command_name(t))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut Vec<String> {
        &mut self.tokens
    }

    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.tokens.iter().any(|t| t == flag)
    }

    /// Swap the principal token for a replacement sequence, keeping the rest
    /// of the vector. Used by alias handlers.
    pub fn replace_principal(&mut self, replacement: &[String]) {
        if self.tokens.is_empty() {
            self.tokens = replacement.to_vec();
        } else {
            self.tokens.splice(0..1, replacement.iter().cloned());
        }
    }
}
