//! Workflow Validation
//!
//! Cross-checks a workflow for consistency and reports every problem in
//! one pass. Unlike the parser, which fails fast on its required-field
//! checks, validation accumulates so a human editor sees the full list
//! of problems at once. It never fails itself; an empty report means the
//! workflow is valid.

use std::collections::HashSet;

use thiserror::Error;

use super::model::{Shell, Workflow};
use super::placeholder::extract_placeholders;

/// A single consistency problem found in a workflow.
///
/// Each variant carries the offending values, and the display text is
/// exactly what the editor surfaces to users.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The workflow name is empty or whitespace-only.
    #[error("Name is required")]
    MissingName,

    /// The command is empty or whitespace-only.
    #[error("Command is required")]
    MissingCommand,

    /// Shell names outside the supported set, in input order.
    #[error("Invalid shells: {}", .0.join(", "))]
    InvalidShells(Vec<String>),

    /// Placeholders used in the command with no matching declared
    /// argument, in first-occurrence order.
    #[error("Undefined arguments in command: {}", .0.join(", "))]
    UndefinedArguments(Vec<String>),
}

/// Validates a workflow, returning every violation found.
///
/// An empty vec means the workflow is valid. Checks, in order: blank
/// name, blank command, and placeholders with no matching argument
/// declaration (exact name match). Shell values are already typed on
/// [`Workflow`], so invalid shells cannot occur here; raw editor input
/// goes through [`check_shell_names`] instead.
///
/// Two lenient behaviors are deliberate compatibility choices, not
/// oversights: duplicate argument names are accepted, and arguments
/// declared but never used in the command are not flagged.
///
/// # Example
///
/// ```
/// use cmdflow::workflow::parser::parse_workflow;
/// use cmdflow::workflow::validator::validate;
///
/// let workflow = parse_workflow("name: Test\ncommand: echo {{msg}}").unwrap();
/// let violations = validate(&workflow);
///
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].to_string(), "Undefined arguments in command: msg");
/// ```
pub fn validate(workflow: &Workflow) -> Vec<Violation> {
    let mut violations = Vec::new();

    if workflow.name.trim().is_empty() {
        violations.push(Violation::MissingName);
    }

    if workflow.command.trim().is_empty() {
        violations.push(Violation::MissingCommand);
    }

    let declared: HashSet<&str> = workflow
        .arguments
        .iter()
        .map(|a| a.name.as_str())
        .collect();

    let missing: Vec<String> = extract_placeholders(&workflow.command)
        .into_iter()
        .filter(|name| !declared.contains(name.as_str()))
        .collect();

    if !missing.is_empty() {
        violations.push(Violation::UndefinedArguments(missing));
    }

    violations
}

/// Checks raw, not-yet-typed shell names against the supported set.
///
/// Collaborators holding free text (a source editor, a form) call this
/// before converting to [`Shell`]; typed workflows cannot carry invalid
/// shells at all.
pub fn check_shell_names<S: AsRef<str>>(names: &[S]) -> Option<Violation> {
    match Shell::parse_names(names) {
        Ok(_) => None,
        Err(invalid) => Some(Violation::InvalidShells(invalid)),
    }
}
