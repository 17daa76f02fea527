//! The resolved outcome of rule dispatch: what will run, and in what order

use std::fmt;

/// Error type deferred actions may fail with.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

type Action = Box<dyn FnOnce() -> Result<(), ActionError>>;

/// One step of an execution plan: either a full argv vector handed to the
/// operating system, or a deferred zero-argument action a rule handler
/// supplied.
pub enum PlanEntry {
    Exec(Vec<String>),
    Callable { label: String, action: Action },
}

impl PlanEntry {
    /// Human-readable form of the entry. Tokens containing a space are
    /// wrapped in single quotes; this is a display aid, not shell quoting.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            PlanEntry::Exec(argv) => argv
                .iter()
                .map(|t| {
                    if t.contains(' ') {
                        format!("'{t}'")
                    } else {
                        t.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            PlanEntry::Callable { label, .. } => label.clone(),
        }
    }
}

impl fmt::Debug for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanEntry::Exec(argv) => f.debug_tuple("Exec").field(argv).finish(),
            PlanEntry::Callable { label, .. } => {
                f.debug_struct("Callable").field("label", label).finish()
            }
        }
    }
}

/// Ordered command entries plus the skip and chain flags, filled in by rule
/// handlers. Entries are immutable once pushed. When `skip` is set nothing
/// executes, regardless of what the entries say.
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    entries: Vec<PlanEntry>,
    skip: bool,
    chained: bool,
}

impl ExecutionPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_exec(&mut self, argv: Vec<String>) {
        self.entries.push(PlanEntry::Exec(argv));
    }

    pub fn push_callable<F>(&mut self, label: impl Into<String>, action: F)
    where
        F: FnOnce() -> Result<(), ActionError> + 'static,
    {
        self.entries.push(PlanEntry::Callable {
            label: label.into(),
            action: Box::new(action),
        });
    }

    /// Mark the whole run as a no-op; the handler has already said whatever
    /// needed saying.
    pub fn set_skip(&mut self) {
        self.skip = true;
    }

    #[must_use]
    pub fn skip(&self) -> bool {
        self.skip
    }

    /// Force chain execution even with a single entry.
    pub fn set_chained(&mut self) {
        self.chained = true;
    }

    /// A plan is chained when it holds more than one entry, or a handler
    /// explicitly flagged it.
    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.chained || self.entries.len() > 1
    }

    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub(crate) fn take_entries(&mut self) -> Vec<PlanEntry> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_render_quotes_tokens_with_spaces() {
        let entry = PlanEntry::Exec(argv(&["commit", "-m", "a message"]));
        assert_eq!(entry.render(), "commit -m 'a message'");
    }

    #[test]
    fn test_render_callable_uses_label() {
        let entry = PlanEntry::Callable {
            label: "echo done".to_string(),
            action: Box::new(|| Ok(())),
        };
        assert_eq!(entry.render(), "echo done");
    }

    #[test]
    fn test_single_entry_is_not_chained() {
        let mut plan = ExecutionPlan::new();
        plan.push_exec(argv(&["git", "status"]));
        assert!(!plan.is_chained());
    }

    #[test]
    fn test_two_entries_are_chained() {
        let mut plan = ExecutionPlan::new();
        plan.push_exec(argv(&["git", "fetch"]));
        plan.push_exec(argv(&["git", "log"]));
        assert!(plan.is_chained());
    }

    #[test]
    fn test_explicit_chain_flag_with_single_entry() {
        let mut plan = ExecutionPlan::new();
        plan.push_exec(argv(&["git", "status"]));
        plan.set_chained();
        assert!(plan.is_chained());
    }

    #[test]
    fn test_skip_defaults_to_false() {
        let mut plan = ExecutionPlan::new();
        assert!(!plan.skip());
        plan.set_skip();
        assert!(plan.skip());
    }
}
