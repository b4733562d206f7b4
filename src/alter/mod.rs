//! Alter-script generation from delta documents.
//!
//! Each entity category (containers, collections, views, model-level types)
//! is reduced by its own submodule into an ordered list of statements. The
//! categories are emitted in that order and joined by a blank line.

mod container;
mod entity;
mod udt;
mod view;

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::ddl::DdlProvider;
use crate::delta::DeltaDocument;
use crate::schema::FieldSnapshot;
use crate::types::resolve_column_type;

/// Granularity a host may request a script at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Model,
    View,
    Container,
}

impl Scope {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" => Some(Self::Model),
            "view" => Some(Self::View),
            "container" => Some(Self::Container),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::View => "view",
            Self::Container => "container",
        })
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Delta model is not found. Alter script can be generated only from Delta model")]
    MissingDeltaModel,
    #[error("Invalid delta document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
    #[error("Forward-Engineering of delta model on {0} level is not supported")]
    UnsupportedScope(Scope),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Target Oracle version, e.g. `19c` or `21c`.
    pub db_version: Option<String>,
}

impl GenerateOptions {
    pub fn with_db_version(db_version: impl Into<String>) -> Self {
        Self {
            db_version: Some(db_version.into()),
        }
    }
}

/// Reduces a [`DeltaDocument`] to an alter script.
#[derive(Debug, Clone, Default)]
pub struct AlterScriptGenerator {
    provider: DdlProvider,
}

impl AlterScriptGenerator {
    pub fn new(options: &GenerateOptions) -> Self {
        Self {
            provider: DdlProvider::new(options.db_version.clone()),
        }
    }

    pub fn generate(&self, delta: &DeltaDocument) -> String {
        let containers = container::scripts(&delta.containers, &self.provider);
        let collections = entity::scripts(&delta.entities, &self.provider);
        let views = view::scripts(&delta.views, &self.provider);
        let types = udt::scripts(&delta.model_definitions, &self.provider);
        debug!(
            target: "oraddl::alter",
            containers = containers.len(),
            collections = collections.len(),
            views = views.len(),
            types = types.len(),
            "generated alter statements"
        );

        [containers, collections, views, types]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Generate the alter script for a parsed delta document.
pub fn generate_script(document: &Value, options: &GenerateOptions) -> Result<String, GenerateError> {
    let delta = DeltaDocument::from_value(document).ok_or(GenerateError::MissingDeltaModel)?;
    Ok(AlterScriptGenerator::new(options).generate(&delta))
}

/// Generate the alter script for a delta document given as JSON text.
pub fn generate_script_from_str(json: &str, options: &GenerateOptions) -> Result<String, GenerateError> {
    if json.trim().is_empty() {
        return Err(GenerateError::MissingDeltaModel);
    }
    let document: Value = serde_json::from_str(json)?;
    generate_script(&document, options)
}

/// Delta scripts exist only for the whole model.
pub fn generate_view_script(_json: &str, _options: &GenerateOptions) -> Result<String, GenerateError> {
    Err(GenerateError::UnsupportedScope(Scope::View))
}

/// Delta scripts exist only for the whole model.
pub fn generate_container_script(_json: &str, _options: &GenerateOptions) -> Result<String, GenerateError> {
    Err(GenerateError::UnsupportedScope(Scope::Container))
}

pub fn generate_for_scope(scope: Scope, json: &str, options: &GenerateOptions) -> Result<String, GenerateError> {
    match scope {
        Scope::Model => generate_script_from_str(json, options),
        Scope::View => generate_view_script(json, options),
        Scope::Container => generate_container_script(json, options),
    }
}

/// Native type named by a changed field's new state, undecorated.
fn field_type(field: &FieldSnapshot) -> Option<String> {
    let resolved = resolve_column_type(field.mode.as_deref(), field.kind.as_deref());
    (!resolved.type_name.is_empty()).then_some(resolved.type_name)
}
