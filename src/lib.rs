//! cmdflow - Shell Command Workflow Templates
//!
//! A library and CLI for defining, validating, and rendering reusable
//! shell-command workflows. A workflow is a named command template with
//! `{{name}}` placeholders and declared arguments, written as a small
//! YAML document that stays pleasant to hand-edit and diff.
//!
//! cmdflow never executes commands; it produces a command string for a
//! human (or another tool) to run.
//!
//! # Architecture
//!
//! The library is organized into two main modules:
//!
//! - [`workflow`]: Data model, definition parsing, placeholder engine,
//!   and validation
//! - [`store`]: In-memory registry with identity and audit fields
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use cmdflow::workflow::parser::parse_workflow;
//! use cmdflow::workflow::placeholder::substitute;
//! use cmdflow::workflow::validator::validate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workflow = parse_workflow(
//!         "name: Greet\ncommand: echo {{greeting}}\narguments:\n  - name: greeting\n",
//!     )?;
//!     assert!(validate(&workflow).is_empty());
//!
//!     let mut values = HashMap::new();
//!     values.insert("greeting".to_string(), "hello".to_string());
//!     assert_eq!(substitute(&workflow.command, &values), "echo hello");
//!     Ok(())
//! }
//! ```

pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use store::{WorkflowRecord, WorkflowStore};
pub use workflow::model::{Shell, Workflow, WorkflowArgument};
pub use workflow::parser::{parse_workflow, serialize_workflow, ParseError};
pub use workflow::placeholder::{extract_placeholders, substitute};
pub use workflow::validator::{validate, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "cmdflow";
