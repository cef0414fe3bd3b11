//! Handler functions for CLI commands.
//!
//! Handlers render their output to a string and report whether the command
//! succeeded, leaving printing and exit codes to `main`.

use std::path::Path;

use serde::Serialize;
use warrant_core::{Actor, AuthenticatedVoter, AuthorizationChecker, Decision, EngineConfig};

use crate::cli::{Command, ConfigAction};
use crate::error::Result;

/// Rendered result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Text to print on stdout.
    pub text: String,
    /// Whether the process should exit successfully.
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

// ============================================================================
// Command dispatch
// ============================================================================

/// Load the configuration named on the command line, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => {
            log::info!("No configuration file given, using defaults");
            EngineConfig::default()
        }
    };
    Ok(config)
}

/// Run a parsed command against a configuration.
pub fn run(config: &EngineConfig, command: &Command) -> Result<CommandOutput> {
    match command {
        Command::Check {
            attribute,
            identity,
            labels,
            trace,
            json,
        } => cmd_check(config, attribute, identity.as_deref(), labels, *trace, *json),
        Command::Expand { labels } => cmd_expand(config, labels),
        Command::Config { action } => cmd_config(config, *action),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Build the engine from `config` and evaluate one check.
///
/// The built-in voters are registered: the label voter from the
/// configuration, then the authenticated voter.
pub fn cmd_check(
    config: &EngineConfig,
    attribute: &str,
    identity: Option<&str>,
    labels: &[String],
    trace: bool,
    json: bool,
) -> Result<CommandOutput> {
    let (builder, _hierarchy) = config.manager_builder()?;
    let checker = AuthorizationChecker::new(builder.voter(AuthenticatedVoter).build());

    let actor = match identity {
        Some(id) => Actor::new(id, labels.iter().cloned()),
        None => labels
            .iter()
            .fold(Actor::anonymous(), |actor, label| actor.with_label(label.clone())),
    };

    let decision = checker.explain(&actor, attribute, None)?;
    tracing::debug!(attribute, actor = %actor, granted = decision.granted, "check evaluated");

    let text = if json {
        serde_json::to_string_pretty(&TraceReport::from_decision(&actor, &decision))?
    } else if trace {
        render_trace(&decision)
    } else {
        verdict(decision.granted).to_string()
    };

    Ok(CommandOutput {
        text,
        success: decision.granted,
    })
}

/// Print the closure of `labels` under the configured hierarchy.
pub fn cmd_expand(config: &EngineConfig, labels: &[String]) -> Result<CommandOutput> {
    let hierarchy = config.build_hierarchy()?;
    let expanded = hierarchy.expand(labels);
    Ok(CommandOutput::ok(
        expanded.into_iter().collect::<Vec<_>>().join("\n"),
    ))
}

/// Validate or print the configuration.
pub fn cmd_config(config: &EngineConfig, action: ConfigAction) -> Result<CommandOutput> {
    match action {
        ConfigAction::Validate => {
            let hierarchy = config.build_hierarchy()?;
            Ok(CommandOutput::ok(format!(
                "ok: {} strategy, {} labels, {} implications",
                config.strategy,
                hierarchy.len(),
                hierarchy.implication_count()
            )))
        }
        ConfigAction::Show => Ok(CommandOutput::ok(config.to_toml_string()?)),
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn verdict(granted: bool) -> &'static str {
    if granted { "granted" } else { "denied" }
}

fn render_trace(decision: &Decision) -> String {
    let mut lines = Vec::with_capacity(decision.votes.len() + 1);
    for record in &decision.votes {
        let mut line = format!("{:<24} {}", record.voter, record.vote);
        if !record.supported {
            line.push_str(" (unsupported)");
        }
        if let Some(fault) = &record.fault {
            line.push_str(&format!(" (fault: {fault})"));
        }
        lines.push(line);
    }
    lines.push(format!(
        "{}: {} ({})",
        verdict(decision.granted),
        decision.strategy,
        decision.tally
    ));
    lines.join("\n")
}

/// JSON view of a traced decision.
#[derive(Debug, Serialize)]
struct TraceReport<'a> {
    actor: String,
    attribute: &'a str,
    granted: bool,
    strategy: String,
    votes: Vec<VoteReport<'a>>,
}

#[derive(Debug, Serialize)]
struct VoteReport<'a> {
    voter: &'a str,
    vote: String,
    supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<&'a str>,
}

impl<'a> TraceReport<'a> {
    fn from_decision(actor: &Actor, decision: &'a Decision) -> Self {
        Self {
            actor: actor.to_string(),
            attribute: &decision.attribute,
            granted: decision.granted,
            strategy: decision.strategy.to_string(),
            votes: decision
                .votes
                .iter()
                .map(|r| VoteReport {
                    voter: &r.voter,
                    vote: r.vote.to_string(),
                    supported: r.supported,
                    fault: r.fault.as_deref(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn forum() -> EngineConfig {
        EngineConfig::from_toml_str(
            r#"
[hierarchy]
ROLE_ADMIN = ["ROLE_MODERATOR"]
ROLE_MODERATOR = ["ROLE_USER"]
"#,
        )
        .unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_granted_through_hierarchy() {
        let out = cmd_check(
            &forum(),
            "ROLE_USER",
            Some("root"),
            &labels(&["ROLE_ADMIN"]),
            false,
            false,
        )
        .unwrap();
        assert_eq!(out.text, "granted");
        assert!(out.success);
    }

    #[test]
    fn test_check_denied() {
        let out = cmd_check(
            &forum(),
            "ROLE_ADMIN",
            Some("alice"),
            &labels(&["ROLE_USER"]),
            false,
            false,
        )
        .unwrap();
        assert_eq!(out.text, "denied");
        assert!(!out.success);
    }

    #[test]
    fn test_check_anonymous_is_authenticated() {
        let out = cmd_check(&forum(), "IS_AUTHENTICATED", None, &[], false, false).unwrap();
        assert!(!out.success);
        let out = cmd_check(&forum(), "PUBLIC_ACCESS", None, &[], false, false).unwrap();
        assert!(out.success);
    }

    #[test]
    fn test_check_trace_lists_voters() {
        let out = cmd_check(
            &forum(),
            "ROLE_USER",
            Some("alice"),
            &labels(&["ROLE_USER"]),
            true,
            false,
        )
        .unwrap();
        assert!(out.text.contains("labels"));
        assert!(out.text.contains("AuthenticatedVoter"));
        assert!(out.text.contains("(unsupported)"));
        assert!(out.text.ends_with("granted: affirmative (1 grant / 0 deny / 1 abstain)"));
    }

    #[test]
    fn test_check_json() {
        let out = cmd_check(
            &forum(),
            "ROLE_MODERATOR",
            Some("alice"),
            &labels(&["ROLE_USER"]),
            false,
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value["granted"], false);
        assert_eq!(value["actor"], "alice");
        assert_eq!(value["votes"][0]["voter"], "labels");
        assert_eq!(value["votes"][0]["vote"], "deny");
    }

    #[test]
    fn test_expand() {
        let out = cmd_expand(&forum(), &labels(&["ROLE_MODERATOR"])).unwrap();
        assert_eq!(out.text, "ROLE_MODERATOR\nROLE_USER");
    }

    #[test]
    fn test_config_validate_reports_cycle() {
        let config = EngineConfig::from_toml_str(
            r#"
[hierarchy]
ROLE_A = ["ROLE_A"]
"#,
        )
        .unwrap();
        let err = cmd_config(&config, ConfigAction::Validate).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_config_validate_ok() {
        let out = cmd_config(&forum(), ConfigAction::Validate).unwrap();
        assert_eq!(out.text, "ok: affirmative strategy, 3 labels, 2 implications");
    }

    #[test]
    fn test_config_show_roundtrips() {
        let out = cmd_config(&forum(), ConfigAction::Show).unwrap();
        let reparsed = EngineConfig::from_toml_str(&out.text).unwrap();
        assert_eq!(reparsed, forum());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"strategy = \"consensus\"\n").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.strategy, warrant_core::Strategy::Consensus);
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_run_dispatches() {
        let command = Command::Expand {
            labels: labels(&["ROLE_ADMIN"]),
        };
        let out = run(&forum(), &command).unwrap();
        assert_eq!(out.text.lines().count(), 3);
    }
}
