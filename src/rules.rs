//! The rule table: a startup-built map from normalized command names to
//! handlers that rewrite the argument vector or extend the execution plan

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::args::{Args, fold_command_name};
use crate::plan::ExecutionPlan;

type Handler = Box<dyn Fn(&mut Args, &mut ExecutionPlan)>;

/// Maps a principal command name to the handler invoked during dispatch.
/// Handlers run synchronously and see their effects immediately; they may
/// mutate the vector, push plan entries, or mark the run skipped.
#[derive(Default)]
pub struct Rules {
    handlers: HashMap<String, Handler>,
}

impl Rules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the built-in augmentations registered: `version` (and
    /// `--version`) runs the tool's own version command, then reports ours.
    #[must_use]
    pub fn with_builtins(tool: &str) -> Self {
        let mut rules = Self::new();
        rules.register("version", version_handler(tool.to_string()));
        rules.register("--version", version_handler(tool.to_string()));
        rules
    }

    /// Register `handler` under `name`. The name is folded the same way
    /// principal commands are, so `remote-add` registers as `remote_add`.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut Args, &mut ExecutionPlan) + 'static,
    {
        self.handlers
            .insert(fold_command_name(name), Box::new(handler));
    }

    /// An alias rewrites the principal token into a replacement sequence
    /// before the passthrough command captures the vector.
    pub fn register_alias(&mut self, name: &str, expansion: Vec<String>) {
        self.register(name, move |args: &mut Args, _: &mut ExecutionPlan| {
            args.replace_principal(&expansion);
        });
    }

    /// A disabled command prints a refusal and skips execution entirely.
    pub fn register_disabled(&mut self, name: &str) {
        let display = name.to_string();
        self.register(name, move |_: &mut Args, plan: &mut ExecutionPlan| {
            eprintln!("gust: command '{display}' is disabled by configuration");
            plan.set_skip();
        });
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke the handler registered under `name`, if any. No handler means
    /// no mutation; the vector stands as the literal command.
    pub fn invoke(&self, name: &str, args: &mut Args, plan: &mut ExecutionPlan) {
        if let Some(handler) = self.handlers.get(name) {
            debug!("dispatching rule handler for '{name}'");
            handler(args, plan);
        }
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Rules").field("handlers", &names).finish()
    }
}

fn version_handler(tool: String) -> impl Fn(&mut Args, &mut ExecutionPlan) + 'static {
    move |_: &mut Args, plan: &mut ExecutionPlan| {
        plan.push_exec(vec![tool.clone(), "--version".to_string()]);
        plan.push_callable("echo gust version", || {
            println!("gust version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke(rules: &Rules, tokens: &[&str]) -> (Args, ExecutionPlan) {
        let mut args = Args::new(tokens.iter().map(ToString::to_string).collect());
        let mut plan = ExecutionPlan::new();
        rules.invoke(&args.principal_command(), &mut args, &mut plan);
        (args, plan)
    }

    #[test]
    fn test_dashed_registration_matches_folded_lookup() {
        let mut rules = Rules::new();
        rules.register("remote-add", |_, plan| plan.set_chained());
        assert!(rules.has_handler("remote_add"));
        assert!(!rules.has_handler("remote-add"));
    }

    #[test]
    fn test_alias_rewrites_principal_token() {
        let mut rules = Rules::new();
        rules.register_alias("st", vec!["status".to_string(), "-sb".to_string()]);
        let (args, _) = invoke(&rules, &["st", "--long"]);
        assert_eq!(args.tokens(), ["status", "-sb", "--long"]);
    }

    #[test]
    fn test_disabled_marks_skip() {
        let mut rules = Rules::new();
        rules.register_disabled("push");
        let (_, plan) = invoke(&rules, &["push"]);
        assert!(plan.skip());
    }

    #[test]
    fn test_unknown_name_leaves_everything_alone() {
        let rules = Rules::new();
        let (args, plan) = invoke(&rules, &["status"]);
        assert_eq!(args.tokens(), ["status"]);
        assert!(plan.entries().is_empty());
        assert!(!plan.skip());
    }

    #[test]
    fn test_version_builtin_chains_tool_version_and_own() {
        let rules = Rules::with_builtins("git");
        let (_, plan) = invoke(&rules, &["version"]);
        assert!(plan.is_chained());
        let rendered: Vec<String> =
            plan.entries().iter().map(crate::plan::PlanEntry::render).collect();
        assert_eq!(rendered, ["git --version", "echo gust version"]);
    }
}
