//! Prompt templates with `{name}` substitution slots.

use std::collections::HashMap;

use crate::errors::{SummarizerError, SummarizerResult};

/// The summarization prompt.
pub const SUMMARIZE_TEMPLATE: &str =
    "Summarize the following text clearly and concisely:\n\n{text}";

const SUMMARIZE_PREFIX: &str = "Summarize the following text clearly and concisely:\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A parsed prompt template.
///
/// `{name}` marks a slot; `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    segments: Vec<Segment>,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Parses a template string.
    pub fn from_template(template: impl Into<String>) -> SummarizerResult<Self> {
        let template = template.into();
        let mut segments = Vec::new();
        let mut input_variables: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(SummarizerError::configuration(format!(
                            "Unclosed '{{' in prompt template: {:?}",
                            template
                        )));
                    }
                    let name = name.trim().to_string();
                    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                        return Err(SummarizerError::configuration(format!(
                            "Invalid variable name {:?} in prompt template",
                            name
                        )));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    if !input_variables.contains(&name) {
                        input_variables.push(name.clone());
                    }
                    segments.push(Segment::Variable(name));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(SummarizerError::configuration(format!(
                        "Single '}}' in prompt template: {:?}",
                        template
                    )));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template,
            segments,
            input_variables,
        })
    }

    /// The fixed summarization template.
    pub fn summarize() -> Self {
        Self {
            template: SUMMARIZE_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal(SUMMARIZE_PREFIX.to_string()),
                Segment::Variable("text".to_string()),
            ],
            input_variables: vec!["text".to_string()],
        }
    }

    /// Renders the prompt, substituting every slot from `vars`.
    ///
    /// Values are inserted verbatim; braces inside values are not
    /// interpreted. Extra keys are ignored.
    pub fn build(&self, vars: &HashMap<String, String>) -> SummarizerResult<String> {
        let mut out = String::with_capacity(
            self.template.len() + vars.values().map(String::len).sum::<usize>(),
        );

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value = vars.get(name).ok_or_else(|| {
                        SummarizerError::validation_param(
                            format!("Missing prompt variable '{}'", name),
                            name.clone(),
                        )
                    })?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }

    /// Slot names in order of first appearance.
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    /// The unparsed template text.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::summarize()
    }
}
