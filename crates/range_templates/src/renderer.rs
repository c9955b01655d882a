//! Placeholder substitution for definition templates.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{TemplateError, TemplateResult};

/// Template renderer substituting `{{ variable }}` placeholders.
pub struct TemplateRenderer {
    variable_pattern: Regex,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self {
            // Match {{variable_name}} with optional inner whitespace
            variable_pattern: Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}")
                .expect("placeholder pattern is a valid regex"),
        }
    }

    /// Placeholder names used by `template`, in order of first use.
    ///
    /// Fails on any `{{` or `}}` that is not part of a well-formed placeholder.
    pub fn parse(&self, name: &str, template: &str) -> TemplateResult<Vec<String>> {
        let stripped = self.variable_pattern.replace_all(template, "");
        if let Some(offset) = stripped.find("{{").or_else(|| stripped.find("}}")) {
            return Err(TemplateError::TemplateParse {
                template: name.to_string(),
                message: format!("unbalanced or malformed placeholder near: {:?}", snippet(&stripped, offset)),
            });
        }

        let mut variables: Vec<String> = Vec::new();
        for caps in self.variable_pattern.captures_iter(template) {
            let var = caps[1].to_string();
            if !variables.contains(&var) {
                variables.push(var);
            }
        }
        Ok(variables)
    }

    /// Render `template`, requiring every placeholder to have a value.
    pub fn render(
        &self,
        name: &str,
        template: &str,
        variables: &HashMap<String, String>,
    ) -> TemplateResult<String> {
        for var in self.parse(name, template)? {
            if !variables.contains_key(&var) {
                return Err(TemplateError::MissingVariable(var));
            }
        }
        Ok(self.render_content(template, variables))
    }

    /// Render content by replacing variables, leaving unknown ones untouched.
    pub fn render_content(&self, content: &str, variables: &HashMap<String, String>) -> String {
        self.variable_pattern
            .replace_all(content, |caps: &regex::Captures| {
                variables
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .to_string()
    }
}

fn snippet(text: &str, offset: usize) -> String {
    text[offset..].chars().take(24).collect()
}
