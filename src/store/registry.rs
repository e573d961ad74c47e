//! In-Memory Workflow Registry
//!
//! Owns identity assignment and audit timestamps for saved workflows.
//! Records are replaced wholesale on update; there are no partial
//! edits. Only workflows with an empty violation report are accepted,
//! so everything in the registry is known-valid.
//!
//! A registry snapshot can be saved to and reloaded from a JSON file.

use std::fs;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflow::model::{Shell, Workflow, WorkflowArgument};
use crate::workflow::validator::{validate, Violation};

/// A saved workflow with identity and audit fields.
///
/// `id` is assigned by the registry and unique within it. `created_at`
/// is set once; `updated_at` moves on every replacement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkflowRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub workflow: Workflow,
}

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The workflow failed validation and was not stored.
    #[error("workflow is not valid: {}", join_violations(.0))]
    Invalid(Vec<Violation>),

    /// No record carries the given id.
    #[error("no workflow with id '{0}'")]
    NotFound(String),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// In-memory collection of workflow records.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorkflowStore {
    records: Vec<WorkflowRecord>,
    next_id: u64,
}

impl WorkflowStore {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a registry seeded with the bundled sample workflows.
    pub fn with_samples() -> Self {
        let mut store = Self::new();

        for workflow in sample_workflows() {
            // samples are known-valid, covered by test_samples_are_valid_and_seeded
            store.insert(workflow).expect("sample workflows are valid");
        }

        store
    }

    /// Stores a workflow, assigning the next id and both timestamps.
    ///
    /// Returns the assigned id, or the violation report if the workflow
    /// is not valid.
    pub fn insert(&mut self, workflow: Workflow) -> Result<String, StoreError> {
        let violations = validate(&workflow);
        if !violations.is_empty() {
            return Err(StoreError::Invalid(violations));
        }

        let now = Utc::now();
        let id = self.next_id.to_string();
        self.next_id += 1;

        info!("Storing workflow '{}' as id {}", workflow.name, id);

        self.records.push(WorkflowRecord {
            id: id.clone(),
            created_at: now,
            updated_at: now,
            workflow,
        });

        Ok(id)
    }

    /// Replaces a record's workflow wholesale and bumps `updated_at`.
    ///
    /// `created_at` and the id are untouched.
    pub fn update(&mut self, id: &str, workflow: Workflow) -> Result<(), StoreError> {
        let violations = validate(&workflow);
        if !violations.is_empty() {
            return Err(StoreError::Invalid(violations));
        }

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.workflow = workflow;
        record.updated_at = Utc::now();

        info!("Updated workflow id {}", id);
        Ok(())
    }

    /// Removes and returns a record.
    pub fn remove(&mut self, id: &str) -> Result<WorkflowRecord, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(self.records.remove(index))
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&WorkflowRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[WorkflowRecord] {
        &self.records
    }

    /// Number of stored workflows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Saves a JSON snapshot of the registry.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!("Saved {} workflows to {}", self.records.len(), path);
        Ok(())
    }

    /// Loads a registry from a JSON snapshot.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let store: WorkflowStore = serde_json::from_str(&content)?;

        info!("Loaded {} workflows from {}", store.records.len(), path);
        Ok(store)
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The sample workflows bundled for first runs and demos.
fn sample_workflows() -> Vec<Workflow> {
    vec![
        Workflow::new(
            "Git Status and Push",
            "git status && git add {{files}} && git commit -m \"{{message}}\" && git push",
        )
        .with_description("Check git status, stage files, commit with message, and push to remote")
        .with_tags(vec!["git".to_string(), "version-control".to_string()])
        .with_shells(vec![Shell::Bash, Shell::Zsh])
        .with_argument(
            WorkflowArgument::new("files")
                .with_description("Files to stage (use . for all files)")
                .with_default("."),
        )
        .with_argument(WorkflowArgument::new("message").with_description("Commit message")),
        Workflow::new(
            "Docker Container Cleanup",
            "docker stop {{container}} && docker rm {{container}} && docker rmi {{image}}",
        )
        .with_description("Stop, remove container, and remove image")
        .with_tags(vec!["docker".to_string(), "cleanup".to_string()])
        .with_shells(vec![Shell::Bash, Shell::Zsh, Shell::Fish])
        .with_argument(WorkflowArgument::new("container").with_description("Container name or ID"))
        .with_argument(WorkflowArgument::new("image").with_description("Image name or ID")),
        Workflow::new(
            "Create React Component",
            "mkdir -p src/components/{{component_name}} && echo \"import React from 'react';\n\nconst {{component_name}} = () => {\n  return (\n    <div>\n      <h1>{{component_name}}</h1>\n    </div>\n  );\n};\n\nexport default {{component_name}};\" > src/components/{{component_name}}/{{component_name}}.tsx",
        )
        .with_description("Create a new React component with TypeScript")
        .with_tags(vec![
            "react".to_string(),
            "typescript".to_string(),
            "component".to_string(),
        ])
        .with_shells(vec![Shell::Bash, Shell::Zsh])
        .with_argument(
            WorkflowArgument::new("component_name").with_description("Name of the React component"),
        ),
    ]
}
