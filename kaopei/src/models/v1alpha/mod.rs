use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod roast_persona;

pub mod prelude {
    pub use super::V1AlphaApiVersion;
    pub use super::roast_persona::*;
}

#[derive(Serialize, Deserialize, Debug, strum::Display, Clone, PartialEq, JsonSchema)]
pub enum V1AlphaApiVersion {
    /// Current version of the kaopei resources
    #[serde(rename = "kaopei.dev/v1alpha")]
    #[strum(serialize = "kaopei.dev/v1alpha")]
    KaopeiV1Alpha,
}
