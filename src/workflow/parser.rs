//! Workflow Definition Parser
//!
//! Converts between the YAML definition format and the in-memory
//! [`Workflow`] model, in both directions, plus file-level helpers for
//! loading and saving definitions.
//!
//! Parsing distinguishes two failure kinds: the YAML itself being
//! unreadable, and well-formed YAML that does not describe a valid
//! workflow (missing name or command, unknown shell). Both are returned
//! as a typed [`ParseError`] so callers handle each path explicitly.

use std::fs;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Shell, Workflow, WorkflowArgument};

/// Errors produced when parsing a workflow definition.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The YAML itself could not be read.
    #[error("Invalid YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The YAML was well formed but does not describe a valid workflow.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Semantic failures caught while converting a definition document.
///
/// These are the checks the parser performs itself; the full
/// cross-field pass lives in [`validate`](crate::workflow::validator::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Workflow name is required")]
    MissingName,

    #[error("Workflow command is required")]
    MissingCommand,

    #[error("Invalid shells: {}. Valid shells are: {}", .0.join(", "), Shell::valid_names())]
    InvalidShells(Vec<String>),
}

/// Raw definition document as it appears on disk.
///
/// Shells stay plain strings here so an unknown value surfaces as a
/// [`ValidationError`] listing the valid set, not as an opaque serde
/// failure. Unknown top-level keys are ignored, never rejected.
#[derive(Deserialize)]
struct WorkflowDoc {
    #[serde(default)]
    name: String,
    #[serde(default)]
    command: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    author_url: Option<String>,
    #[serde(default)]
    shells: Vec<String>,
    #[serde(default)]
    arguments: Vec<WorkflowArgument>,
}

/// Parses a YAML definition into a [`Workflow`].
///
/// Required-field and shell checks run here, in order: name, command,
/// shells. On success the values are returned exactly as written; no
/// whitespace or casing normalization is applied.
///
/// # Example
///
/// ```
/// use cmdflow::workflow::parser::parse_workflow;
///
/// let workflow = parse_workflow("name: Test\ncommand: echo {{msg}}").unwrap();
/// assert_eq!(workflow.name, "Test");
/// assert_eq!(workflow.command, "echo {{msg}}");
/// ```
pub fn parse_workflow(text: &str) -> Result<Workflow, ParseError> {
    let doc: WorkflowDoc = serde_yaml::from_str(text)?;

    if doc.name.trim().is_empty() {
        return Err(ValidationError::MissingName.into());
    }
    if doc.command.trim().is_empty() {
        return Err(ValidationError::MissingCommand.into());
    }

    let shells = Shell::parse_names(&doc.shells).map_err(ValidationError::InvalidShells)?;

    Ok(Workflow {
        name: doc.name,
        command: doc.command,
        tags: doc.tags,
        description: doc.description,
        source_url: doc.source_url,
        author: doc.author,
        author_url: doc.author_url,
        shells,
        arguments: doc.arguments,
    })
}

/// Serializes a [`Workflow`] back to YAML.
///
/// Unset optional fields and empty sequences are omitted, and fields
/// appear in the model's declared order, so output is stable and
/// compact. Serializing is idempotent on its own output but not
/// byte-identical to arbitrary hand-written input; in particular, an
/// explicit empty sequence such as `tags: []` is indistinguishable from
/// an absent one after a round trip.
pub fn serialize_workflow(workflow: &Workflow) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(workflow)
}

/// Loads a workflow definition from a YAML file.
///
/// Reads and parses only; callers wanting the full consistency report
/// run [`validate`](crate::workflow::validator::validate) on the result.
///
/// # Example
///
/// ```rust,no_run
/// use cmdflow::workflow::parser::load_workflow;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let workflow = load_workflow("deploy.yaml")?;
///     println!("Loaded '{}'", workflow.name);
///     Ok(())
/// }
/// ```
pub fn load_workflow(path: &str) -> Result<Workflow, Box<dyn std::error::Error>> {
    info!("Loading workflow from: {}", path);

    let text = fs::read_to_string(path).map_err(|e| {
        format!(
            "Failed to read workflow file '{}': {}. Check that the file exists and is readable.",
            path, e
        )
    })?;

    debug!("Definition loaded ({} bytes)", text.len());

    let workflow = parse_workflow(&text)?;

    info!(
        "Parsed workflow '{}': {} declared arguments, {} tags",
        workflow.name,
        workflow.arguments.len(),
        workflow.tags.len()
    );

    Ok(workflow)
}

/// Saves a workflow definition to a YAML file.
pub fn save_workflow(workflow: &Workflow, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = serialize_workflow(workflow)?;
    fs::write(path, text)?;
    info!("Workflow saved to: {}", path);
    Ok(())
}
