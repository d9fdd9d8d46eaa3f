//! Request and response bodies of the summarize endpoint.
//!
//! Bodies are parsed from raw JSON values rather than derived
//! deserializers so that a missing or mistyped field is reported with the
//! path of the field (`input.text`, `inputs[2].text`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::{SummarizerError, SummarizerResult};

/// Text to summarize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeInput {
    /// The raw text. Empty text is accepted.
    pub text: String,
}

impl SummarizeInput {
    /// Creates an input from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Parses `{"text": string}` located at `loc` in the request body.
    pub fn from_value(value: &Value, loc: &str) -> SummarizerResult<Self> {
        let object = as_object(value, loc)?;
        let param = join(loc, "text");
        match object.get("text") {
            Some(Value::String(text)) => Ok(Self::new(text.clone())),
            Some(other) => Err(SummarizerError::validation_param(
                format!("expected a string, got {}", type_name(other)),
                param,
            )),
            None => Err(SummarizerError::validation_param("field required", param)),
        }
    }

    /// Template variables for this input.
    pub fn variables(&self) -> HashMap<String, String> {
        HashMap::from([("text".to_string(), self.text.clone())])
    }
}

/// Body of the plain summarize route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeOutput {
    /// The generated summary.
    pub output: String,
}

/// Invocation envelope: `{"input": {...}, "config": {...}, "kwargs": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeRequest {
    /// Pipeline input.
    pub input: SummarizeInput,
    /// Caller-supplied run configuration. Accepted and ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// Extra keyword arguments. Accepted and ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kwargs: Option<Value>,
}

impl InvokeRequest {
    /// Wraps an input with no config.
    pub fn new(input: SummarizeInput) -> Self {
        Self {
            input,
            config: None,
            kwargs: None,
        }
    }

    /// Parses an invocation body.
    pub fn from_value(value: &Value) -> SummarizerResult<Self> {
        let object = as_object(value, "")?;
        let input = object
            .get("input")
            .ok_or_else(|| SummarizerError::validation_param("field required", "input"))?;

        Ok(Self {
            input: SummarizeInput::from_value(input, "input")?,
            config: object.get("config").cloned(),
            kwargs: object.get("kwargs").cloned(),
        })
    }
}

/// Per-run metadata returned by the invoke route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Unique id of this run, also attached to the request log span.
    pub run_id: Uuid,
}

/// Body returned by the invoke route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponse {
    /// The generated summary.
    pub output: String,
    /// Run metadata.
    pub metadata: RunMetadata,
}

/// Batch envelope: `{"inputs": [{...}, ...], "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRequest {
    /// Pipeline inputs, answered in order.
    pub inputs: Vec<SummarizeInput>,
    /// Caller-supplied run configuration. Accepted and ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl BatchRequest {
    /// Wraps inputs with no config.
    pub fn new(inputs: Vec<SummarizeInput>) -> Self {
        Self {
            inputs,
            config: None,
        }
    }

    /// Parses a batch body.
    pub fn from_value(value: &Value) -> SummarizerResult<Self> {
        let object = as_object(value, "")?;
        let inputs = match object.get("inputs") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| SummarizeInput::from_value(item, &format!("inputs[{}]", i)))
                .collect::<SummarizerResult<Vec<_>>>()?,
            Some(other) => {
                return Err(SummarizerError::validation_param(
                    format!("expected an array, got {}", type_name(other)),
                    "inputs",
                ))
            }
            None => return Err(SummarizerError::validation_param("field required", "inputs")),
        };

        Ok(Self {
            inputs,
            config: object.get("config").cloned(),
        })
    }
}

/// Batch run metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// One run id per input, in input order.
    pub run_ids: Vec<Uuid>,
}

/// Body returned by the batch route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Summaries in input order.
    pub output: Vec<String>,
    /// Run metadata.
    pub metadata: BatchMetadata,
}

/// JSON Schema of the pipeline input.
pub fn input_schema() -> Value {
    json!({
        "title": "SummarizeInput",
        "type": "object",
        "properties": {
            "text": { "title": "Text", "type": "string" }
        },
        "required": ["text"]
    })
}

/// JSON Schema of the pipeline output.
pub fn output_schema() -> Value {
    json!({
        "title": "SummarizeOutput",
        "type": "string"
    })
}

fn as_object<'a>(value: &'a Value, loc: &str) -> SummarizerResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        SummarizerError::validation_param(
            format!("expected an object, got {}", type_name(value)),
            if loc.is_empty() { "body" } else { loc },
        )
    })
}

fn join(loc: &str, field: &str) -> String {
    if loc.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", loc, field)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
