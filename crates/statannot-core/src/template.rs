//! Label templates.
//!
//! A template mixes literal text with `{column}` references that are
//! substituted row by row, e.g. `"p = {p.adj}"`. Doubled braces (`{{`, `}}`)
//! produce literal braces.

use std::collections::HashMap;

use polars::prelude::DataFrame;

use statannot_model::{AnnotationError, ColumnRole, Result};

use crate::columns::string_column;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed label template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

/// True when a label spec should be treated as a template rather than a
/// column name.
pub fn is_template(spec: &str) -> bool {
    spec.contains('{') || spec.contains('}')
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(template_error(source, "nested '{'")),
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(template_error(source, "unclosed '{'"));
                    }
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(template_error(source, "empty field reference '{}'"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(name.to_string()));
                }
                '}' => return Err(template_error(source, "unmatched '}'")),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Referenced field names, in order of first use.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(name) = segment
                && !fields.contains(&name.as_str())
            {
                fields.push(name);
            }
        }
        fields
    }

    /// Renders the template, looking each field up with `lookup`.
    pub fn render_with<'a, F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> &'a str,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(lookup(name)),
            }
        }
        out
    }

    /// Renders one label per table row.
    pub fn render_rows(&self, df: &DataFrame) -> Result<Vec<String>> {
        let mut columns: HashMap<&str, Vec<String>> = HashMap::new();
        for field in self.fields() {
            let values = string_column(df, field, ColumnRole::TemplateField)?;
            columns.insert(field, values);
        }

        let rendered = (0..df.height())
            .map(|row| {
                self.render_with(|field| {
                    columns
                        .get(field)
                        .and_then(|values| values.get(row))
                        .map_or("", String::as_str)
                })
            })
            .collect();
        Ok(rendered)
    }
}

fn template_error(source: &str, reason: &str) -> AnnotationError {
    AnnotationError::Template {
        template: source.to_string(),
        reason: reason.to_string(),
    }
}
