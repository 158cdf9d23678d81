//! Compiled statement output.

use crate::bind::{Bind, BindKind};
use serde::Serialize;

/// Parameterized SQL text plus the values bound to its `?` placeholders.
///
/// Immutable once produced by [`Aql::compile`](crate::Aql::compile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementResult {
    sql: String,
    binds: Vec<Bind>,
}

impl StatementResult {
    pub(crate) fn new(sql: String, binds: Vec<Bind>) -> Self {
        Self { sql, binds }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    /// Kind of every bound value, in bind order.
    pub fn types(&self) -> Vec<BindKind> {
        self.binds.iter().map(Bind::kind).collect()
    }

    /// Number of `?` characters in the text, including any inside raw fragments.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    pub fn into_parts(self) -> (String, Vec<Bind>, Vec<BindKind>) {
        let types = self.types();
        (self.sql, self.binds, types)
    }
}

impl std::fmt::Display for StatementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
