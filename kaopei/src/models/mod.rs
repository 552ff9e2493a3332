use crate::models::core::{ModelMetadata, ModelRoot};
use anyhow::anyhow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::warn;

mod core;
mod v1alpha;

pub mod prelude {
    pub use crate::models::core::*;
    pub use crate::models::v1alpha::prelude::*;
    pub use crate::models::{HelpMetadata, InternalKaopeiModel, KaopeiModel};
}

pub trait HelpMetadata {
    fn metadata(&self) -> &ModelMetadata;
    fn full_name(&self) -> String;
    fn name(&self) -> &str {
        &self.metadata().name
    }
    fn file_path(&self) -> String {
        self.metadata().file_path()
    }
    fn containing_dir(&self) -> String {
        self.metadata().containing_dir()
    }
    fn description(&self) -> String {
        self.metadata().description()
    }
}

pub trait KaopeiModel<S>: HelpMetadata {
    fn api_version(&self) -> String;
    fn kind(&self) -> String;
    fn spec(&self) -> &S;
}

/// Glue between the loosely typed documents found on disk and the typed,
/// versioned resources. A document is only claimed when both `apiVersion` and
/// `kind` match (case-insensitive).
pub trait InternalKaopeiModel<S, R>:
    JsonSchema + Serialize + for<'a> Deserialize<'a> + KaopeiModel<S>
where
    R: for<'a> Deserialize<'a>,
{
    fn int_api_version() -> String;
    fn int_kind() -> String;
    fn known_type(input: &ModelRoot<Value>) -> anyhow::Result<Option<R>> {
        if Self::int_api_version().to_lowercase() == input.api_version.to_lowercase()
            && Self::int_kind().to_lowercase() == input.kind.to_lowercase()
        {
            let value = serde_json::to_value(input)?;
            if let Err(e) = Self::validate_resource(&value) {
                warn!(target: "user", "Resource '{}' didn't match the schema for {}. {}", input.full_name(), Self::int_kind(), e);
            }
            return Ok(Some(serde_json::from_value::<R>(value)?));
        }
        Ok(None)
    }

    fn validate_resource(input: &serde_json::Value) -> anyhow::Result<()> {
        let schema_json = serde_json::to_value(schemars::schema_for!(Self))?;
        let validator = jsonschema::validator_for(&schema_json)
            .map_err(|e| anyhow!("internal json schema is invalid: {}", e))?;

        if validator.is_valid(input) {
            return Ok(());
        }

        let error_messages = validator
            .iter_errors(input)
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Err(anyhow!(error_messages))
    }
}
