//! Argument-to-command resolution and the three-state execution machine

use log::debug;
use thiserror::Error;

use crate::args::Args;
use crate::plan::{ExecutionPlan, PlanEntry};
use crate::process::{ExecError, Executor};
use crate::rules::Rules;

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("deferred action '{label}' failed: {message}")]
    Callback { label: String, message: String },
}

/// Owns one argument vector and its execution plan for the whole invocation.
///
/// Construction normalizes the vector (default-command injection, principal
/// name folding) and dispatches the matching rule handler, if any. After
/// that the runner can report what would run (`command`, `commands`) or run
/// it (`execute`).
#[derive(Debug)]
pub struct Runner {
    args: Args,
    plan: ExecutionPlan,
    tool: String,
}

impl Runner {
    #[must_use]
    pub fn new(tool: impl Into<String>, raw: Vec<String>, rules: &Rules) -> Self {
        let mut args = Args::new(raw);
        args.ensure_default_command();

        let mut plan = ExecutionPlan::new();
        let name = args.principal_command();
        if rules.has_handler(&name) {
            rules.invoke(&name, &mut args, &mut plan);
        } else {
            debug!("no rule handler for '{name}', passing through");
        }

        Self {
            args,
            plan,
            tool: tool.into(),
        }
    }

    #[must_use]
    pub fn args(&self) -> &Args {
        &self.args
    }

    #[must_use]
    pub fn plan(&self) -> &ExecutionPlan {
        &self.plan
    }

    /// The literal passthrough argv: the tool name followed by the tokens as
    /// they stand after dispatch.
    #[must_use]
    pub fn to_exec(&self) -> Vec<String> {
        std::iter::once(self.tool.clone())
            .chain(self.args.tokens().iter().cloned())
            .collect()
    }

    /// One string for everything that would run, entries joined by `"; "`.
    /// Empty exactly when the run is skipped.
    #[must_use]
    pub fn command(&self) -> String {
        if self.plan.skip() {
            String::new()
        } else {
            self.commands().join("; ")
        }
    }

    /// Per-entry renderings, unjoined. When no handler pushed anything the
    /// single implicit entry is the passthrough command.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        if self.plan.entries().is_empty() {
            vec![PlanEntry::Exec(self.to_exec()).render()]
        } else {
            self.plan.entries().iter().map(PlanEntry::render).collect()
        }
    }

    /// Run the plan. Three terminal shapes, chosen once up front:
    ///
    /// 1. Skip: nothing spawns, success.
    /// 2. Single command: the current process is replaced outright.
    /// 3. Chain: entries run in order; a non-final command that exits
    ///    non-zero aborts the run with that exact status, and the final
    ///    command inherits the process just like a single-command run.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Exec` when a program cannot be started (including
    /// the replace step, which only returns on failure) and
    /// `RunError::Callback` when a deferred action fails.
    pub fn execute(mut self, executor: &mut dyn Executor) -> Result<i32, RunError> {
        if self.plan.skip() {
            debug!("skip requested, nothing to execute");
            return Ok(0);
        }
        if self.plan.is_chained() {
            return self.execute_command_chain(executor);
        }
        let mut entries = self.resolved_entries();
        match entries.pop() {
            Some(PlanEntry::Exec(argv)) => Ok(executor.replace(&argv)?),
            Some(callable @ PlanEntry::Callable { .. }) => run_entries(vec![callable], executor),
            None => Ok(0),
        }
    }

    /// Run a multi-entry plan in order, short-circuiting on the first
    /// failing step.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Runner::execute`].
    pub fn execute_command_chain(mut self, executor: &mut dyn Executor) -> Result<i32, RunError> {
        let entries = self.resolved_entries();
        run_entries(entries, executor)
    }

    /// The plan's entries, or the single implicit passthrough entry when no
    /// handler pushed any.
    fn resolved_entries(&mut self) -> Vec<PlanEntry> {
        let entries = self.plan.take_entries();
        if entries.is_empty() {
            vec![PlanEntry::Exec(self.to_exec())]
        } else {
            entries
        }
    }
}

fn run_entries(entries: Vec<PlanEntry>, executor: &mut dyn Executor) -> Result<i32, RunError> {
    let last = entries.len().saturating_sub(1);
    for (i, entry) in entries.into_iter().enumerate() {
        match entry {
            PlanEntry::Callable { label, action } => {
                debug!("invoking deferred action '{label}'");
                action().map_err(|e| RunError::Callback {
                    label,
                    message: e.to_string(),
                })?;
            }
            PlanEntry::Exec(argv) if i == last => {
                // The final program inherits the process, like a single run
                return Ok(executor.replace(&argv)?);
            }
            PlanEntry::Exec(argv) => {
                let code = executor.run(&argv)?;
                if code != 0 {
                    debug!("chain step exited with status {code}, aborting");
                    return Ok(code);
                }
            }
        }
    }
    Ok(0)
}
