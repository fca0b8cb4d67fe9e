use serde_json::Value;

use agentflow_common::types::RawAgentOutput;

/// Fields checked, in order, for the agent's text.
const TEXT_FIELDS: &[&str] = &["raw", "output"];

/// Reduce whatever the engine returned to a [`RawAgentOutput`].
///
/// Object responses are searched for a non-empty `raw`, then `output` field.
/// Objects with neither field fall back to the whole value's string form;
/// objects that have the fields but leave them blank are empty. Blank
/// results become `Error(EmptyOutput)`.
pub fn to_raw_output(value: &Value) -> RawAgentOutput {
    if let Value::Object(map) = value {
        let mut has_text_field = false;
        for field in TEXT_FIELDS {
            if let Some(text) = map.get(*field).map(value_text) {
                has_text_field = true;
                if !text.trim().is_empty() {
                    return RawAgentOutput::Text(text);
                }
            }
        }
        if has_text_field || map.is_empty() {
            return RawAgentOutput::from_text("");
        }
    }

    RawAgentOutput::from_text(value_text(value))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentflow_common::types::UpstreamErrorCode;
    use serde_json::json;

    #[test]
    fn test_raw_field_preferred() {
        let value = json!({"raw": "from raw", "output": "from output"});
        assert_eq!(to_raw_output(&value), RawAgentOutput::Text("from raw".into()));
    }

    #[test]
    fn test_empty_raw_falls_through_to_output() {
        let value = json!({"raw": "  ", "output": "from output"});
        assert_eq!(
            to_raw_output(&value),
            RawAgentOutput::Text("from output".into())
        );
    }

    #[test]
    fn test_plain_string() {
        let value = json!("## Report\nAll good");
        assert_eq!(
            to_raw_output(&value),
            RawAgentOutput::Text("## Report\nAll good".into())
        );
    }

    #[test]
    fn test_other_object_uses_string_form() {
        let value = json!({"tasks_output": ["a"]});
        assert_eq!(
            to_raw_output(&value),
            RawAgentOutput::Text(r#"{"tasks_output":["a"]}"#.into())
        );
    }

    #[test]
    fn test_empty_shapes_are_empty_output() {
        let empties = [
            json!(null),
            json!(""),
            json!({}),
            json!({"raw": ""}),
            json!({"raw": null, "output": "   "}),
        ];
        for value in empties {
            assert_eq!(
                to_raw_output(&value),
                RawAgentOutput::Error(UpstreamErrorCode::EmptyOutput),
                "{}",
                value
            );
        }
    }
}
