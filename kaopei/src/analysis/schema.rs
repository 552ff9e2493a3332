use serde_json::{Value, json};

/// Bumped whenever the shape below changes. Persona files that carry their own
/// `responseSchema` are written against one of these versions.
pub const RESPONSE_SCHEMA_VERSION: &str = "2025-01";

/// Structured-output schema sent with every request, in the Gemini
/// `responseSchema` dialect. Field names match [`AnalysisResult`](super::AnalysisResult).
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "snapshot": {
                "type": "OBJECT",
                "properties": {
                    "score": {
                        "type": "NUMBER",
                        "description": "Score from 0.5 to 10.0 in steps of 0.5"
                    },
                    "style": {
                        "type": "STRING",
                        "description": "Style category the director puts the outfit in"
                    },
                    "keywords": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "3 funny adjectives"
                    }
                },
                "required": ["score", "style", "keywords"]
            },
            "roast": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "6+ sentences of snarky, creative metaphors roasting the outfit."
            },
            "advice": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "4+ sentences of snarky but professional advice."
            },
            "scoreComment": {
                "type": "STRING",
                "description": "Unique, snarky comment based on the score."
            }
        },
        "required": ["snapshot", "roast", "advice", "scoreComment"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_result_key_is_required() {
        let schema = response_schema();

        assert_eq!(
            json!(["snapshot", "roast", "advice", "scoreComment"]),
            schema["required"]
        );
        assert_eq!(
            json!(["score", "style", "keywords"]),
            schema["properties"]["snapshot"]["required"]
        );
    }
}
