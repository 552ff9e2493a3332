use crate::analysis::response_schema;
use crate::models::prelude::{HelpMetadata, ModelMetadata, V1AlphaRoastPersona};
use anyhow::anyhow;
use lazy_static::lazy_static;

const BUILTIN_PERSONA_YAML: &str = include_str!("../../../../personas/default.yaml");

lazy_static! {
    static ref BUILTIN_PERSONA: RoastPersona = serde_yaml::from_str::<V1AlphaRoastPersona>(
        BUILTIN_PERSONA_YAML
    )
    .map_err(anyhow::Error::from)
    .and_then(RoastPersona::try_from)
    .expect("built-in persona to be valid");
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoastPersona {
    pub full_name: String,
    pub metadata: ModelMetadata,
    pub system_instruction: String,
    pub user_prompt: String,
    pub response_schema: serde_json::Value,
}

impl RoastPersona {
    /// The persona compiled into the binary, used when no config dir provides one.
    pub fn builtin() -> Self {
        BUILTIN_PERSONA.clone()
    }

    pub fn is_builtin(&self) -> bool {
        self.metadata.annotations.file_path.is_none()
    }
}

impl HelpMetadata for RoastPersona {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn full_name(&self) -> String {
        self.full_name.to_string()
    }
}

impl TryFrom<V1AlphaRoastPersona> for RoastPersona {
    type Error = anyhow::Error;

    fn try_from(value: V1AlphaRoastPersona) -> Result<Self, Self::Error> {
        let full_name = value.full_name();
        if value.spec.system_instruction.trim().is_empty() {
            return Err(anyhow!("{} has an empty systemInstruction", full_name));
        }
        if value.spec.user_prompt.trim().is_empty() {
            return Err(anyhow!("{} has an empty userPrompt", full_name));
        }

        Ok(RoastPersona {
            full_name,
            metadata: value.metadata,
            system_instruction: value.spec.system_instruction,
            user_prompt: value.spec.user_prompt,
            response_schema: value.spec.response_schema.unwrap_or_else(response_schema),
        })
    }
}
