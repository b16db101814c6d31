//! Parameterized Cypher statements.
//!
//! Statement text never contains caller data. Values travel as named bind
//! parameters and are only combined with the text by the Neo4j driver.

use std::collections::BTreeMap;

/// Cypher text plus its named string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    text: String,
    params: BTreeMap<String, String>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    /// Bind `$key` to `value`.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Concatenate statements into one, one clause block per line.
    ///
    /// Returns `None` for an empty input. Parameter names are expected to be
    /// unique across the joined statements.
    pub fn join(statements: impl IntoIterator<Item = Statement>) -> Option<Statement> {
        let mut joined: Option<Statement> = None;
        for stmt in statements {
            match joined.as_mut() {
                None => joined = Some(stmt),
                Some(acc) => {
                    acc.text.push('\n');
                    acc.text.push_str(&stmt.text);
                    acc.params.extend(stmt.params);
                }
            }
        }
        joined
    }

    /// Convert into a driver query with every parameter bound.
    pub fn into_query(self) -> neo4rs::Query {
        self.params
            .into_iter()
            .fold(neo4rs::query(&self.text), |q, (key, value)| {
                q.param(&key, value)
            })
    }
}

/// Quote a label or relationship type as a Cypher identifier.
///
/// Labels cannot be bound as parameters, so they are backtick-quoted with
/// any embedded backtick doubled.
pub fn quote_identifier(raw: &str) -> String {
    format!("`{}`", raw.replace('`', "``"))
}
