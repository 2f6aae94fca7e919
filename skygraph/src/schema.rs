// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Schema declaration and installation
//!
//! A [`Schema`] is a list of type definitions plus global predicate
//! declarations. It is validated locally, rendered to Dgraph schema text and
//! sent through an alter operation. Re-installing the same schema is
//! idempotent on the server.

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::client::{Client, Operation};
use crate::error::{DgraphError, Error, Result};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("identifier pattern"));

/// True when `name` can appear unquoted as a predicate or type name
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Scalar or edge type of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    Uid,
}

impl ValueType {
    fn as_dql(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::DateTime => "datetime",
            ValueType::Uid => "uid",
        }
    }
}

/// Index tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Equality and ordering on strings
    Exact,
    /// Equality on strings
    Hash,
    /// Term matching on strings
    Term,
    Int,
    Float,
    Bool,
}

impl IndexKind {
    fn as_dql(self) -> &'static str {
        match self {
            IndexKind::Exact => "exact",
            IndexKind::Hash => "hash",
            IndexKind::Term => "term",
            IndexKind::Int => "int",
            IndexKind::Float => "float",
            IndexKind::Bool => "bool",
        }
    }

    fn applies_to(self, value_type: ValueType) -> bool {
        match self {
            IndexKind::Exact | IndexKind::Hash | IndexKind::Term => value_type == ValueType::String,
            IndexKind::Int => value_type == ValueType::Int,
            IndexKind::Float => value_type == ValueType::Float,
            IndexKind::Bool => value_type == ValueType::Bool,
        }
    }
}

/// Global predicate declaration
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateDef {
    pub name: String,
    pub value_type: ValueType,
    pub list: bool,
    pub indexes: Vec<IndexKind>,
    pub reverse: bool,
    pub count: bool,
}

impl PredicateDef {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            list: false,
            indexes: Vec::new(),
            reverse: false,
            count: false,
        }
    }

    /// `[uid]` edge predicate
    pub fn edges(name: &str) -> Self {
        Self::new(name, ValueType::Uid).list()
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn index(mut self, kind: IndexKind) -> Self {
        self.indexes.push(kind);
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    fn validate(&self) -> std::result::Result<(), DgraphError> {
        if !is_identifier(&self.name) {
            return Err(DgraphError::invalid(format!(
                "'{}' is not a valid predicate name",
                self.name
            )));
        }
        if let Some(kind) = self.indexes.iter().find(|k| !k.applies_to(self.value_type)) {
            return Err(DgraphError::invalid(format!(
                "index '{}' cannot be used on {} predicate '{}'",
                kind.as_dql(),
                self.value_type.as_dql(),
                self.name
            )));
        }
        if self.reverse && self.value_type != ValueType::Uid {
            return Err(DgraphError::invalid(format!(
                "@reverse requires a uid predicate, '{}' is {}",
                self.name,
                self.value_type.as_dql()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for PredicateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list {
            write!(f, "{}: [{}]", self.name, self.value_type.as_dql())?;
        } else {
            write!(f, "{}: {}", self.name, self.value_type.as_dql())?;
        }
        if !self.indexes.is_empty() {
            let kinds: Vec<&str> = self.indexes.iter().map(|k| k.as_dql()).collect();
            write!(f, " @index({})", kinds.join(", "))?;
        }
        if self.reverse {
            write!(f, " @reverse")?;
        }
        if self.count {
            write!(f, " @count")?;
        }
        write!(f, " .")
    }
}

/// Type definition listing its member predicates
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub fields: Vec<String>,
}

impl TypeDef {
    pub fn new(name: &str, fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type {} {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        write!(f, "}}")
    }
}

/// Declarative schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub types: Vec<TypeDef>,
    pub predicates: Vec<PredicateDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.types.push(def);
        self
    }

    pub fn with_predicate(mut self, def: PredicateDef) -> Self {
        self.predicates.push(def);
        self
    }

    /// Airline/flight and user/artist/album/song graph
    pub fn flights_and_music() -> Self {
        Schema::new()
            .with_type(TypeDef::new("Airline", &["name", "schedules"]))
            .with_type(TypeDef::new("Flight", &["ID", "wait"]))
            .with_type(TypeDef::new("User", &["username", "likes"]))
            .with_type(TypeDef::new("Artist", &["name", "publishes"]))
            .with_type(TypeDef::new("Album", &["name", "contains"]))
            .with_type(TypeDef::new("Song", &["name", "length"]))
            .with_predicate(PredicateDef::new("name", ValueType::String).index(IndexKind::Exact))
            .with_predicate(PredicateDef::edges("schedules").reverse())
            .with_predicate(PredicateDef::new("ID", ValueType::Int).index(IndexKind::Int))
            .with_predicate(PredicateDef::new("wait", ValueType::Int).index(IndexKind::Int))
            .with_predicate(
                PredicateDef::new("username", ValueType::String).index(IndexKind::Exact),
            )
            .with_predicate(PredicateDef::edges("likes").count())
            .with_predicate(PredicateDef::edges("publishes"))
            .with_predicate(PredicateDef::edges("contains"))
            .with_predicate(PredicateDef::new("length", ValueType::Int))
    }

    /// Local checks that do not need the server
    pub fn validate(&self) -> std::result::Result<(), DgraphError> {
        for (i, pred) in self.predicates.iter().enumerate() {
            pred.validate()?;
            if self.predicates[..i].iter().any(|p| p.name == pred.name) {
                return Err(DgraphError::invalid(format!(
                    "predicate '{}' is declared twice",
                    pred.name
                )));
            }
        }
        for def in &self.types {
            if !is_identifier(&def.name) {
                return Err(DgraphError::invalid(format!(
                    "'{}' is not a valid type name",
                    def.name
                )));
            }
            if let Some(field) = def
                .fields
                .iter()
                .find(|f| !self.predicates.iter().any(|p| &p.name == *f))
            {
                return Err(DgraphError::invalid(format!(
                    "type '{}' references undeclared predicate '{}'",
                    def.name, field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for def in &self.types {
            writeln!(f, "{}", def)?;
            writeln!(f)?;
        }
        for pred in &self.predicates {
            writeln!(f, "{}", pred)?;
        }
        Ok(())
    }
}

/// Validate and install a schema
pub fn install(client: &Client, schema: &Schema) -> Result<()> {
    schema.validate().map_err(Error::Schema)?;
    install_text(client, &schema.to_string())
}

/// Install raw schema text; malformed text is rejected by the server
pub fn install_text(client: &Client, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Schema(DgraphError::invalid("schema text is empty")));
    }
    client
        .alter(&Operation::Schema(text.to_string()))
        .map_err(Error::Schema)?;
    info!("Schema installed ({} bytes)", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, ScriptedTransport};

    #[test]
    fn test_default_schema_renders_indexes() {
        let text = Schema::flights_and_music().to_string();

        assert!(text.contains("type Airline {\n    name\n    schedules\n}"));
        assert!(text.contains("name: string @index(exact) ."));
        assert!(text.contains("schedules: [uid] @reverse ."));
        assert!(text.contains("ID: int @index(int) ."));
        assert!(text.contains("wait: int @index(int) ."));
        assert!(text.contains("likes: [uid] @count ."));
    }

    #[test]
    fn test_default_schema_is_valid() {
        Schema::flights_and_music().validate().unwrap();
    }

    #[test]
    fn test_rejects_mismatched_index() {
        let schema = Schema::new()
            .with_predicate(PredicateDef::new("wait", ValueType::Int).index(IndexKind::Exact));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("index 'exact' cannot be used on int"));
    }

    #[test]
    fn test_rejects_reverse_on_scalar() {
        let schema =
            Schema::new().with_predicate(PredicateDef::new("name", ValueType::String).reverse());
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_rejects_undeclared_field() {
        let schema = Schema::new()
            .with_predicate(PredicateDef::new("name", ValueType::String))
            .with_type(TypeDef::new("Airline", &["name", "schedules"]));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("undeclared predicate 'schedules'"));
    }

    #[test]
    fn test_rejects_duplicate_predicate() {
        let schema = Schema::new()
            .with_predicate(PredicateDef::new("name", ValueType::String))
            .with_predicate(PredicateDef::new("name", ValueType::Int));
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_invalid_schema_is_not_sent() {
        let script = ScriptedTransport::new();
        let client = Client::with_transport(script.clone());
        let schema = Schema::new().with_predicate(PredicateDef::new("bad name", ValueType::String));

        assert!(matches!(install(&client, &schema), Err(Error::Schema(_))));
        assert!(script.calls().is_empty());
    }

    #[test]
    fn test_install_twice_sends_identical_alters() {
        let script = ScriptedTransport::new();
        let client = Client::with_transport(script.clone());
        let schema = Schema::flights_and_music();

        install(&client, &schema).unwrap();
        install(&client, &schema).unwrap();

        let calls = script.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert!(matches!(&calls[0], Call::Alter(Operation::Schema(_))));
    }

    #[test]
    fn test_server_rejection_is_schema_error() {
        let script = ScriptedTransport::new();
        script.fail_next_alter(DgraphError::Server {
            code: "Error".into(),
            message: "Schema change not allowed from scalar to uid".into(),
        });
        let client = Client::with_transport(script);

        let err = install_text(&client, "name: uid .").unwrap_err();
        assert!(matches!(err, Error::Schema(DgraphError::Server { .. })));
    }
}
