//! Read statements for the dependency graph.
//!
//! Both queries return one row per edge with the columns `source`,
//! `relationship` and `target`, each a map projection read back by
//! [`crate::mapper`].

use serde::Deserialize;

use crate::statement::Statement;

/// Relationship type of every dependency edge.
pub const REQUIRES: &str = "Requires";

/// Bounds on the number of `Requires` hops in a path query.
pub const MIN_PATH_HOPS: u32 = 1;
pub const MAX_PATH_HOPS: u32 = 10;

/// Result column names, in row order.
pub const SOURCE_COLUMN: &str = "source";
pub const RELATIONSHIP_COLUMN: &str = "relationship";
pub const TARGET_COLUMN: &str = "target";

/// Tunables for the read queries, loaded from the `[query]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Label marking top-level projects; path queries start from these.
    pub root_label: String,
    /// Package name hidden from the full-graph query (the runtime platform).
    pub excluded_name: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            root_label: "Project".to_string(),
            excluded_name: "php".to_string(),
        }
    }
}

/// The package a path query ends at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTarget {
    pub vendor: String,
    pub name: String,
}

impl PathTarget {
    /// Interpret a (vendor, package) filter.
    ///
    /// Only a filter with both parts set selects a path query. A filter with
    /// just one part set is treated as no filter at all and falls back to the
    /// full graph.
    pub fn from_filter(vendor: &str, package: &str) -> Option<Self> {
        match (vendor.is_empty(), package.is_empty()) {
            (false, false) => Some(Self {
                vendor: vendor.to_string(),
                name: package.to_string(),
            }),
            (true, true) => None,
            _ => {
                tracing::debug!(
                    vendor,
                    package,
                    "Incomplete package filter, falling back to full graph"
                );
                None
            }
        }
    }
}

/// Every edge in the store, minus those touching the excluded package.
pub fn build_full_graph_query(options: &QueryOptions) -> Statement {
    Statement::new(format!(
        "MATCH (n)-[r]->(m)
         WHERE NOT (n.name = $excluded_name OR m.name = $excluded_name)
         {}",
        return_clause()
    ))
    .param("excluded_name", options.excluded_name.as_str())
}

/// Edges among the nodes lying on any `Requires` path of 1 to 10 hops from
/// a root project to `target`.
///
/// Path nodes are collected first and every direct edge between them is
/// matched again, so that packages sharing a dependency show their own
/// interconnections, not only the path edges.
pub fn build_bounded_path_query(target: &PathTarget, options: &QueryOptions) -> Statement {
    Statement::new(format!(
        "MATCH p = (root)-[:{REQUIRES}*{MIN_PATH_HOPS}..{MAX_PATH_HOPS}]->(dep)
         WHERE head(labels(root)) = $root_label
           AND dep.vendor = $vendor AND dep.name = $name
         UNWIND nodes(p) AS visited
         WITH collect(DISTINCT visited) AS closure
         UNWIND closure AS n
         UNWIND closure AS m
         MATCH (n)-[r]->(m)
         {}",
        return_clause()
    ))
    .param("root_label", options.root_label.as_str())
    .param("vendor", target.vendor.as_str())
    .param("name", target.name.as_str())
}

fn return_clause() -> String {
    format!(
        "RETURN {} AS {SOURCE_COLUMN},
                {} AS {RELATIONSHIP_COLUMN},
                {} AS {TARGET_COLUMN}",
        node_projection("n"),
        relationship_projection("r"),
        node_projection("m"),
    )
}

fn node_projection(var: &str) -> String {
    format!(
        "{{id: id({var}), size: COUNT {{ ({var})<--() }}, vendor: {var}.vendor, name: {var}.name, \
         type: head(labels({var})), version: {var}.version, url: {var}.url}}"
    )
}

/// `size` counts the other edges converging on `r`'s target. Relationships in
/// one pattern are distinct, so `r` itself is never counted.
fn relationship_projection(var: &str) -> String {
    format!(
        "{{id: id({var}), size: COUNT {{ ()-->()<-[{var}]-() }}, version: {var}.version, \
         `for`: {var}.`for`}}"
    )
}
