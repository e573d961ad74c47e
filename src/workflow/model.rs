//! Workflow Data Model
//!
//! Core data structures representing reusable command templates and their
//! declared arguments.
//!
//! # Example YAML Format
//!
//! ```yaml
//! name: Git Status and Push
//! command: git status && git add {{files}} && git commit -m "{{message}}" && git push
//! tags:
//!   - git
//!   - version-control
//! shells:
//!   - bash
//!   - zsh
//! arguments:
//!   - name: files
//!     description: Files to stage (use . for all files)
//!     default_value: "."
//!   - name: message
//!     description: Commit message
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Command interpreters a workflow can declare compatibility with.
///
/// This is a closed set; anything else is rejected during parsing or by
/// [`check_shell_names`](crate::workflow::validator::check_shell_names),
/// never coerced or dropped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
}

/// Error returned when a string names no known shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shell '{0}'")]
pub struct UnknownShell(pub String);

impl Shell {
    /// Every supported shell, in display order.
    pub const ALL: [Shell; 3] = [Shell::Zsh, Shell::Bash, Shell::Fish];

    /// The lowercase name used in definitions.
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Fish => "fish",
        }
    }

    /// Comma-joined list of all valid shell names, for error messages.
    pub fn valid_names() -> String {
        Shell::ALL.map(|s| s.name()).join(", ")
    }

    /// Converts raw shell names into typed values.
    ///
    /// All names are inspected before returning, so the error lists every
    /// invalid value, preserving input order.
    pub fn parse_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<Shell>, Vec<String>> {
        let mut shells = Vec::with_capacity(names.len());
        let mut invalid = Vec::new();

        for name in names {
            match name.as_ref().parse::<Shell>() {
                Ok(shell) => shells.push(shell),
                Err(_) => invalid.push(name.as_ref().to_string()),
            }
        }

        if invalid.is_empty() {
            Ok(shells)
        } else {
            Err(invalid)
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shell {
    type Err = UnknownShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zsh" => Ok(Shell::Zsh),
            "bash" => Ok(Shell::Bash),
            "fish" => Ok(Shell::Fish),
            other => Err(UnknownShell(other.to_string())),
        }
    }
}

/// One named placeholder's metadata.
///
/// The `name` links the declaration to `{{name}}` tokens in the command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkflowArgument {
    /// Placeholder name as it appears between the braces
    pub name: String,

    /// Human-readable explanation of what the value is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pre-filled value offered when rendering interactively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl WorkflowArgument {
    /// Creates an argument with no description or default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value: None,
        }
    }

    /// Sets the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value offered when rendering.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// A reusable command template.
///
/// Field declaration order is also the serialization order, and optional
/// or empty fields are omitted on output, which keeps hand-edited
/// definitions compact and diffable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    /// Display title
    pub name: String,

    /// Command template containing zero or more `{{name}}` tokens
    pub command: String,

    /// Free-form labels, in display order (duplicates are permitted)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// What the workflow does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the command was found or documented
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Who wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Link to the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,

    /// Compatible shells; empty means no restriction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shells: Vec<Shell>,

    /// Declared arguments, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<WorkflowArgument>,
}

impl Workflow {
    /// Creates a workflow with the given name and command.
    ///
    /// Values are stored as given; nothing is trimmed or normalized.
    ///
    /// # Example
    ///
    /// ```
    /// use cmdflow::workflow::model::{Workflow, WorkflowArgument};
    ///
    /// let workflow = Workflow::new("Tail a log", "tail -f {{file}}")
    ///     .with_tags(vec!["logs".to_string()])
    ///     .with_argument(WorkflowArgument::new("file").with_default("/var/log/syslog"));
    ///
    /// assert_eq!(workflow.placeholders(), vec!["file"]);
    /// ```
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            tags: Vec::new(),
            description: None,
            source_url: None,
            author: None,
            author_url: None,
            shells: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the compatible shells.
    pub fn with_shells(mut self, shells: Vec<Shell>) -> Self {
        self.shells = shells;
        self
    }

    /// Appends a declared argument.
    pub fn with_argument(mut self, argument: WorkflowArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Distinct placeholder names used in the command, in first-occurrence order.
    pub fn placeholders(&self) -> Vec<String> {
        use crate::workflow::placeholder::extract_placeholders;

        extract_placeholders(&self.command)
    }

    /// Pre-filled substitution values from arguments that declare a default.
    pub fn default_values(&self) -> HashMap<String, String> {
        self.arguments
            .iter()
            .filter_map(|a| a.default_value.clone().map(|v| (a.name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_round_trip_names() {
        for shell in Shell::ALL {
            assert_eq!(shell.name().parse::<Shell>().unwrap(), shell);
            assert_eq!(shell.to_string(), shell.name());
        }
    }

    #[test]
    fn test_shell_from_str_rejects_unknown() {
        let err = "powershell".parse::<Shell>().unwrap_err();
        assert_eq!(err, UnknownShell("powershell".to_string()));
    }

    #[test]
    fn test_shell_from_str_is_case_sensitive() {
        assert!("Bash".parse::<Shell>().is_err());
        assert!("ZSH".parse::<Shell>().is_err());
    }

    #[test]
    fn test_shell_valid_names() {
        assert_eq!(Shell::valid_names(), "zsh, bash, fish");
    }

    #[test]
    fn test_parse_names_all_valid() {
        let shells = Shell::parse_names(&["bash", "zsh"]).unwrap();
        assert_eq!(shells, vec![Shell::Bash, Shell::Zsh]);
    }

    #[test]
    fn test_parse_names_collects_every_invalid_value() {
        let invalid = Shell::parse_names(&["bash", "powershell", "cmd"]).unwrap_err();
        assert_eq!(invalid, vec!["powershell", "cmd"]);
    }

    #[test]
    fn test_parse_names_empty() {
        let shells = Shell::parse_names::<&str>(&[]).unwrap();
        assert!(shells.is_empty());
    }

    #[test]
    fn test_argument_builder() {
        let argument = WorkflowArgument::new("message")
            .with_description("Commit message")
            .with_default("wip");

        assert_eq!(argument.name, "message");
        assert_eq!(argument.description.as_deref(), Some("Commit message"));
        assert_eq!(argument.default_value.as_deref(), Some("wip"));
    }

    #[test]
    fn test_workflow_builder() {
        let workflow = Workflow::new("Deploy", "deploy {{env}}")
            .with_description("Push a release")
            .with_tags(vec!["ops".to_string()])
            .with_shells(vec![Shell::Bash])
            .with_argument(WorkflowArgument::new("env").with_default("staging"));

        assert_eq!(workflow.name, "Deploy");
        assert_eq!(workflow.command, "deploy {{env}}");
        assert_eq!(workflow.tags, vec!["ops"]);
        assert_eq!(workflow.shells, vec![Shell::Bash]);
        assert_eq!(workflow.arguments.len(), 1);
    }

    #[test]
    fn test_workflow_does_not_normalize_values() {
        let workflow = Workflow::new("  padded  ", "  echo hi  ");
        assert_eq!(workflow.name, "  padded  ");
        assert_eq!(workflow.command, "  echo hi  ");
    }

    #[test]
    fn test_workflow_placeholders() {
        let workflow = Workflow::new("Copy", "cp {{src}} {{dst}} && ls {{dst}}");
        assert_eq!(workflow.placeholders(), vec!["src", "dst"]);
    }

    #[test]
    fn test_default_values_only_from_declared_defaults() {
        let workflow = Workflow::new("Commit", "git commit -m \"{{message}}\" {{files}}")
            .with_argument(WorkflowArgument::new("files").with_default("."))
            .with_argument(WorkflowArgument::new("message"));

        let defaults = workflow.default_values();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("files").map(String::as_str), Some("."));
        assert!(!defaults.contains_key("message"));
    }

    #[test]
    fn test_shell_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Shell::Fish).unwrap();
        assert_eq!(json, "\"fish\"");

        let shell: Shell = serde_json::from_str("\"zsh\"").unwrap();
        assert_eq!(shell, Shell::Zsh);
    }

    #[test]
    fn test_workflow_serde_omits_empty_fields() {
        let workflow = Workflow::new("Minimal", "true");
        let json = serde_json::to_string(&workflow).unwrap();

        assert!(json.contains("\"name\""));
        assert!(json.contains("\"command\""));
        assert!(!json.contains("tags"));
        assert!(!json.contains("description"));
        assert!(!json.contains("shells"));
        assert!(!json.contains("arguments"));
    }
}
