// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Parameter binding for query templates
//!
//! A [`Template`] declares its `$name: type` parameters once; the header of
//! the DQL text is generated from that declaration, and [`Template::bind`]
//! checks caller-supplied [`Vars`] against it. Values are sent as request
//! variables and never spliced into the query text.

use std::collections::BTreeMap;
use std::fmt;

use crate::client::Request;
use crate::error::DgraphError;

/// Declared type of a query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    String,
    Int,
    Float,
    Bool,
}

impl VarType {
    pub fn as_dql(self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Bool => "bool",
        }
    }
}

/// Typed value bound to a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl VarValue {
    pub fn var_type(&self) -> VarType {
        match self {
            VarValue::String(_) => VarType::String,
            VarValue::Int(_) => VarType::Int,
            VarValue::Float(_) => VarType::Float,
            VarValue::Bool(_) => VarType::Bool,
        }
    }

    /// Parse a command-line `value` for a declared type
    pub fn parse_as(var_type: VarType, raw: &str) -> Result<Self, DgraphError> {
        let invalid = || {
            DgraphError::invalid(format!("'{}' is not a valid {}", raw, var_type.as_dql()))
        };
        match var_type {
            VarType::String => Ok(VarValue::String(raw.to_string())),
            VarType::Int => raw.parse().map(VarValue::Int).map_err(|_| invalid()),
            VarType::Float => raw.parse().map(VarValue::Float).map_err(|_| invalid()),
            VarType::Bool => raw.parse().map(VarValue::Bool).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::String(s) => write!(f, "{}", s),
            VarValue::Int(i) => write!(f, "{}", i),
            VarValue::Float(x) => write!(f, "{}", x),
            VarValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        VarValue::String(s.to_string())
    }
}

impl From<String> for VarValue {
    fn from(s: String) -> Self {
        VarValue::String(s)
    }
}

impl From<i64> for VarValue {
    fn from(i: i64) -> Self {
        VarValue::Int(i)
    }
}

impl From<f64> for VarValue {
    fn from(x: f64) -> Self {
        VarValue::Float(x)
    }
}

impl From<bool> for VarValue {
    fn from(b: bool) -> Self {
        VarValue::Bool(b)
    }
}

/// Named placeholder values; names are stored without the leading `$`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    values: BTreeMap<String, VarValue>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<VarValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<VarValue>) {
        self.values
            .insert(name.trim_start_matches('$').to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name.trim_start_matches('$'))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Wire form: `$name` keys, string values
    pub(crate) fn to_wire(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (format!("${}", k), v.to_string()))
            .collect()
    }
}

/// A named query with declared parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    params: Vec<(String, VarType)>,
    body: String,
}

impl Template {
    /// `body` is the query block list without the `query name(...)` header
    pub fn new(name: &str, body: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            body: body.into(),
        }
    }

    pub fn param(mut self, name: &str, var_type: VarType) -> Self {
        self.params
            .push((name.trim_start_matches('$').to_string(), var_type));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, VarType)] {
        &self.params
    }

    /// Full DQL text including the parameter header
    pub fn text(&self) -> String {
        if self.params.is_empty() {
            return format!("query {} {}", self.name, self.body);
        }
        let header = self
            .params
            .iter()
            .map(|(name, ty)| format!("${}: {}", name, ty.as_dql()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("query {}({}) {}", self.name, header, self.body)
    }

    /// Check `vars` against the declaration and produce a request
    pub fn bind(&self, vars: &Vars) -> Result<Request, DgraphError> {
        for (name, ty) in &self.params {
            match vars.get(name) {
                None => {
                    return Err(DgraphError::invalid(format!(
                        "query '{}' is missing parameter ${}",
                        self.name, name
                    )))
                }
                Some(value) if value.var_type() != *ty => {
                    return Err(DgraphError::invalid(format!(
                        "parameter ${} of query '{}' expects {}, got {}",
                        name,
                        self.name,
                        ty.as_dql(),
                        value.var_type().as_dql()
                    )))
                }
                Some(_) => {}
            }
        }
        if let Some((unknown, _)) = vars
            .iter()
            .find(|(name, _)| !self.params.iter().any(|(p, _)| p == name))
        {
            return Err(DgraphError::invalid(format!(
                "query '{}' has no parameter ${}",
                self.name, unknown
            )));
        }

        Ok(Request {
            query: self.text(),
            vars: vars.to_wire(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> Template {
        Template::new("lookup", "{ all(func: eq(name, $value)) { uid } }")
            .param("value", VarType::String)
    }

    #[test]
    fn test_bind_keeps_value_out_of_text() {
        let hostile = "x\") { uid } } delete { * * * }";
        let request = lookup().bind(&Vars::new().with("value", hostile)).unwrap();

        assert_eq!(
            request.query,
            "query lookup($value: string) { all(func: eq(name, $value)) { uid } }"
        );
        assert!(!request.query.contains(hostile));
        assert_eq!(request.vars.get("$value").map(String::as_str), Some(hostile));
    }

    #[test]
    fn test_bind_rejects_missing_parameter() {
        let err = lookup().bind(&Vars::new()).unwrap_err();
        assert!(err.to_string().contains("missing parameter $value"));
    }

    #[test]
    fn test_bind_rejects_type_mismatch() {
        let err = lookup().bind(&Vars::new().with("value", 5i64)).unwrap_err();
        assert!(err.to_string().contains("expects string, got int"));
    }

    #[test]
    fn test_bind_rejects_unknown_parameter() {
        let vars = Vars::new().with("value", "a").with("$extra", "b");
        let err = lookup().bind(&vars).unwrap_err();
        assert!(err.to_string().contains("no parameter $extra"));
    }

    #[test]
    fn test_parse_typed_values() {
        assert_eq!(VarValue::parse_as(VarType::Int, "5").unwrap(), VarValue::Int(5));
        assert_eq!(
            VarValue::parse_as(VarType::Bool, "true").unwrap(),
            VarValue::Bool(true)
        );
        assert!(VarValue::parse_as(VarType::Int, "five").is_err());
    }

    #[test]
    fn test_template_without_params() {
        let template = Template::new("everything", "{ q(func: has(name)) { uid } }");
        assert_eq!(template.text(), "query everything { q(func: has(name)) { uid } }");
        assert!(template.bind(&Vars::new()).unwrap().vars.is_empty());
    }
}
