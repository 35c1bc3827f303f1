//! Form validation against per-entity schemas.

use crate::models::{CampgroundInput, ReviewInput};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
}

/// Constraints for one form field. Length limits apply to text, bounds to numbers.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<&'static str>,
}

impl FieldRule {
    const fn of(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            pattern: None,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::of(name, FieldKind::Text)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::of(name, FieldKind::Number)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::of(name, FieldKind::Integer)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub const fn max(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// Declared shape of one entity kind's form payload.
#[derive(Debug)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: &'static [FieldRule],
}

pub static CAMPGROUND_SCHEMA: Schema = Schema {
    entity: "campground",
    fields: &[
        FieldRule::text("title").required().length(1, 100),
        FieldRule::text("location").required().length(1, 100),
        FieldRule::number("price").required().min(0.0),
        FieldRule::text("description").max_length(2000),
        FieldRule::text("image").max_length(500).pattern(r"^https?://\S+$"),
    ],
};

pub static REVIEW_SCHEMA: Schema = Schema {
    entity: "review",
    fields: &[
        FieldRule::integer("rating").required().min(1.0).max(5.0),
        FieldRule::text("body").required().length(1, 2000),
    ],
};

/// A typed payload with a schema. Validated fields are deserialized into it.
pub trait FormSchema: DeserializeOwned {
    fn schema() -> &'static Schema;
}

impl FormSchema for CampgroundInput {
    fn schema() -> &'static Schema {
        &CAMPGROUND_SCHEMA
    }
}

impl FormSchema for ReviewInput {
    fn schema() -> &'static Schema {
        &REVIEW_SCHEMA
    }
}

impl Schema {
    /// Check every field and collect all violations. On success returns a JSON object
    /// holding trimmed text and parsed numbers; fields the schema does not name are dropped.
    pub fn validate(&self, form: &HashMap<String, String>) -> Result<Value, Vec<String>> {
        let mut violations = Vec::new();
        let mut normalized = Map::new();
        for rule in self.fields {
            let raw = form.get(rule.name).map(|s| s.trim());
            match raw {
                None => {
                    if rule.required {
                        violations.push(format!("\"{}\" is required", rule.name));
                    }
                }
                Some("") => {
                    if rule.required {
                        violations.push(format!("\"{}\" is not allowed to be empty", rule.name));
                    }
                }
                Some(v) => match validate_field(rule, v) {
                    Ok(value) => {
                        normalized.insert(rule.name.to_string(), value);
                    }
                    Err(mut errs) => violations.append(&mut errs),
                },
            }
        }
        if violations.is_empty() {
            Ok(Value::Object(normalized))
        } else {
            Err(violations)
        }
    }
}

fn validate_field(rule: &FieldRule, v: &str) -> Result<Value, Vec<String>> {
    match rule.kind {
        FieldKind::Text => validate_text(rule, v),
        FieldKind::Number | FieldKind::Integer => validate_number(rule, v),
    }
}

fn validate_text(rule: &FieldRule, v: &str) -> Result<Value, Vec<String>> {
    let col = rule.name;
    let mut errs = Vec::new();
    let len = v.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            errs.push(format!("\"{}\" length must be at least {} characters long", col, min));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            errs.push(format!(
                "\"{}\" length must be less than or equal to {} characters long",
                col, max
            ));
        }
    }
    if let Some(pattern) = rule.pattern {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(v) => {
                errs.push(format!("\"{}\" fails to match the required pattern", col));
            }
            Ok(_) => {}
            Err(_) => errs.push(format!("invalid pattern for \"{}\"", col)),
        }
    }
    if errs.is_empty() {
        Ok(Value::String(v.to_string()))
    } else {
        Err(errs)
    }
}

fn validate_number(rule: &FieldRule, v: &str) -> Result<Value, Vec<String>> {
    let col = rule.name;
    let n = match v.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Err(vec![format!("\"{}\" must be a number", col)]),
    };
    let mut errs = Vec::new();
    if rule.kind == FieldKind::Integer && n.fract() != 0.0 {
        errs.push(format!("\"{}\" must be an integer", col));
    }
    if let Some(min) = rule.minimum {
        if n < min {
            errs.push(format!("\"{}\" must be greater than or equal to {}", col, min));
        }
    }
    if let Some(max) = rule.maximum {
        if n > max {
            errs.push(format!("\"{}\" must be less than or equal to {}", col, max));
        }
    }
    if !errs.is_empty() {
        return Err(errs);
    }
    let number = if rule.kind == FieldKind::Integer {
        Number::from(n as i64)
    } else {
        Number::from_f64(n).ok_or_else(|| vec![format!("\"{}\" must be a number", col)])?
    };
    Ok(Value::Number(number))
}
