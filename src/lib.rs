//! Core implementation of the gust git wrapper
//!
//! gust intercepts invocations meant for git, optionally rewrites or
//! augments them through a rule table, and then either replaces the current
//! process with git or runs a short chain of commands with
//! short-circuit-on-failure. The flow is: raw tokens become an [`args::Args`]
//! vector (with default-command injection), the normalized principal name is
//! dispatched against a [`rules::Rules`] table whose handlers may mutate the
//! vector or fill an [`plan::ExecutionPlan`], and the [`runner::Runner`]
//! decides between skip, single process replacement, and chained execution.

use log::debug;

use crate::config_file::Config;
use crate::rules::Rules;

pub mod args;
pub mod config_file;
pub mod logger;
pub mod plan;
pub mod process;
pub mod rules;
pub mod runner;

/// Resolve the external tool name: the `GIT` environment variable wins,
/// then the config override, then plain `git`.
#[must_use]
pub fn tool_name(config: &Config) -> String {
    resolve_tool(std::env::var("GIT").ok(), config)
}

fn resolve_tool(env: Option<String>, config: &Config) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| config.git.clone())
        .unwrap_or_else(|| "git".to_string())
}

/// Build the rule table for one invocation: built-in augmentations first,
/// then the config's aliases and disabled commands on top.
#[must_use]
pub fn build_rules(config: &Config, tool: &str) -> Rules {
    let mut rules = Rules::with_builtins(tool);
    for (name, expansion) in &config.aliases {
        rules.register_alias(name, expansion.clone());
    }
    for name in &config.disabled {
        rules.register_disabled(name);
    }
    debug!("rule table ready: {rules:?}");
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tool_prefers_env() {
        let config = Config {
            git: Some("othergit".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_tool(Some("mygit".to_string()), &config), "mygit");
    }

    #[test]
    fn test_resolve_tool_falls_back_to_config_then_default() {
        let config = Config {
            git: Some("othergit".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_tool(None, &config), "othergit");
        assert_eq!(resolve_tool(None, &Config::default()), "git");
    }

    #[test]
    fn test_resolve_tool_ignores_blank_env() {
        assert_eq!(
            resolve_tool(Some("  ".to_string()), &Config::default()),
            "git"
        );
    }

    #[test]
    fn test_build_rules_registers_config_entries() {
        let mut config = Config::default();
        config
            .aliases
            .insert("st".to_string(), vec!["status".to_string()]);
        config.disabled.push("push".to_string());

        let rules = build_rules(&config, "git");
        assert!(rules.has_handler("st"));
        assert!(rules.has_handler("push"));
        assert!(rules.has_handler("version"));
    }
}
