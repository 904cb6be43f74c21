//! Judge prompt templates
//!
//! Variables use the `${var:name}` syntax, optionally with a default:
//! `${var:name:default}`. Rendering is a single pass, so substituted values
//! are never themselves expanded.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("template variable pattern is valid")
});

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template '{template}' must reference variable: {name}")]
    UnreferencedVariable { template: String, name: String },

    #[error("Template '{template}' references unknown variable: {name}")]
    UnknownVariable { template: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    pub name: String,
    pub default: Option<String>,
}

impl TemplateVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: String,
    content: String,
    variables: Vec<TemplateVariable>,
}

impl PromptTemplate {
    pub fn parse(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut seen = HashSet::new();
        let mut variables = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();
            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(TemplateVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self {
            name: name.into(),
            content,
            variables,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    pub fn references(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name)
    }

    /// Check the template against the variables its caller supplies.
    /// Every name in `required` must appear, and every required variable
    /// in the template must be one of `known`.
    pub fn check(&self, required: &[&str], known: &[&str]) -> Result<(), TemplateError> {
        if let Some(missing) = required.iter().find(|name| !self.references(name)) {
            return Err(TemplateError::UnreferencedVariable {
                template: self.name.clone(),
                name: missing.to_string(),
            });
        }

        if let Some(unknown) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !known.contains(&v.name.as_str()))
        {
            return Err(TemplateError::UnknownVariable {
                template: self.name.clone(),
                name: unknown.name.clone(),
            });
        }

        Ok(())
    }

    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            let name = &cap[1];
            match values.get(name) {
                Some(value) => value.to_string(),
                None => cap.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}
