//! Template types for typed variable injection.
//!
//! Placeholders are written `{{name}}`. Each variable is either text, which
//! is HTML-escaped on substitution, or a trusted HTML fragment inserted as is.
//! Substitution is a single left-to-right pass, so placeholder syntax inside
//! a substituted value is never expanded.

use crate::utils::html::escape;
use std::borrow::Cow;
use std::marker::PhantomData;
use thiserror::Error;

/// A substitution value.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    /// Plain text, escaped on substitution.
    Text(&'a str),
    /// Markup that is already safe (composed or sanitized fragments).
    Html(&'a str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template `{template}` uses unknown variable `{name}`")]
    Missing { template: &'static str, name: String },

    #[error("template `{template}` has an unclosed placeholder")]
    Unclosed { template: &'static str },
}

/// Trait for template variable sets
pub trait TemplateVars {
    fn get(&self, name: &str) -> Option<Value<'_>>;
}

/// Template with typed variable injection
#[derive(Debug, Clone)]
pub struct Template<V> {
    name: &'static str,
    content: Cow<'static, str>,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self {
            name,
            content: Cow::Borrowed(content),
            _marker: PhantomData,
        }
    }

    /// Same template slot with replacement content (user override).
    pub fn with_content(&self, content: String) -> Self {
        Self {
            name: self.name,
            content: Cow::Owned(content),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.content.len() + 1024);
        let mut rest: &str = &self.content;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or(TemplateError::Unclosed {
                template: self.name,
            })?;
            let name = after[..end].trim();

            match vars.get(name) {
                Some(Value::Text(text)) => out.push_str(&escape(text)),
                Some(Value::Html(html)) => out.push_str(html),
                None => {
                    return Err(TemplateError::Missing {
                        template: self.name,
                        name: name.to_string(),
                    });
                }
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
