use crate::models::prelude::{InternalKaopeiModel, ModelRoot, V1AlphaRoastPersona};
use anyhow::anyhow;
use serde_yaml::Value;

mod roast_persona;

pub mod prelude {
    pub use super::ParsedConfig;
    pub use super::roast_persona::*;
}

use self::roast_persona::RoastPersona;

#[derive(Debug, PartialEq)]
pub enum ParsedConfig {
    RoastPersona(RoastPersona),
}

#[cfg(test)]
impl ParsedConfig {
    pub fn get_roast_persona(&self) -> Option<RoastPersona> {
        match self {
            ParsedConfig::RoastPersona(root) => Some(root.clone()),
        }
    }
}

impl TryFrom<ModelRoot<Value>> for ParsedConfig {
    type Error = anyhow::Error;

    fn try_from(value: ModelRoot<Value>) -> Result<Self, Self::Error> {
        if let Some(known) = V1AlphaRoastPersona::known_type(&value)? {
            return Ok(ParsedConfig::RoastPersona(RoastPersona::try_from(known)?));
        }
        Err(anyhow!("{}/{} is not a known type", value.api_version, value.kind))
    }
}
