use crate::models::core::ModelMetadata;
use crate::models::v1alpha::V1AlphaApiVersion;
use crate::models::{HelpMetadata, InternalKaopeiModel, KaopeiModel};
use derive_builder::Builder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the fashion director is told before looking at a photo.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder, JsonSchema)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
#[schemars(deny_unknown_fields)]
pub struct RoastPersonaSpec {
    /// Sent as the system instruction. Describes tone, the sections to produce and the
    /// topics that are off limits.
    pub system_instruction: String,

    /// Text part sent next to the image, asking for the review.
    pub user_prompt: String,

    /// Structured-output schema, in the Gemini `responseSchema` dialect. When omitted the
    /// built-in schema for the analysis result is used. Whatever is supplied here must still
    /// describe the `snapshot`/`roast`/`advice`/`scoreComment` shape.
    #[serde(default)]
    #[builder(default)]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, strum::Display, Clone, PartialEq, JsonSchema)]
pub enum RoastPersonaKind {
    #[strum(serialize = "KaopeiRoastPersona")]
    KaopeiRoastPersona,
}

/// Resource used to define a `KaopeiRoastPersona`.
/// The persona closest to the working directory replaces the built-in one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder, JsonSchema)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
#[schemars(deny_unknown_fields)]
pub struct V1AlphaRoastPersona {
    /// API version of the resource
    pub api_version: V1AlphaApiVersion,
    /// The type of resource.
    pub kind: RoastPersonaKind,
    /// Standard set of options including name, description for the resource.
    pub metadata: ModelMetadata,
    /// Options for the resource.
    pub spec: RoastPersonaSpec,
}

impl HelpMetadata for V1AlphaRoastPersona {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.kind(), self.name())
    }
}

impl KaopeiModel<RoastPersonaSpec> for V1AlphaRoastPersona {
    fn api_version(&self) -> String {
        Self::int_api_version()
    }

    fn kind(&self) -> String {
        Self::int_kind()
    }

    fn spec(&self) -> &RoastPersonaSpec {
        &self.spec
    }
}

impl InternalKaopeiModel<RoastPersonaSpec, V1AlphaRoastPersona> for V1AlphaRoastPersona {
    fn int_api_version() -> String {
        V1AlphaApiVersion::KaopeiV1Alpha.to_string()
    }

    fn int_kind() -> String {
        RoastPersonaKind::KaopeiRoastPersona.to_string()
    }
}
