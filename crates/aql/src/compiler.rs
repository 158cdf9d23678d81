//! Clause assembler.
//!
//! [`Aql`] turns a statement spec into a [`StatementResult`]. Clauses are
//! rendered in a fixed order regardless of their order in the spec:
//!
//! `select`/`prefix`, `insert`, `update`, `delete`, `from`, `set`, `values`,
//! `values_bulk`, `join`, `where`, `group`, `having`, `order`, `limit`, `offset`.
//!
//! # Example
//! ```ignore
//! use aql::{Aql, list, map};
//!
//! let result = Aql::default().compile(&map! {
//!     "select" => list!["post_id", "post_title"],
//!     "from" => "post",
//!     "where" => map! { "post_level:ge" => 2, "post_status" => list!["draft", "live"] },
//!     "order" => "post_id DESC",
//!     "limit" => 10,
//! })?;
//!
//! assert_eq!(
//!     result.sql(),
//!     "SELECT post_id, post_title FROM post WHERE post_level >= ? AND post_status IN (?,?) \
//!      ORDER BY post_id DESC LIMIT ?"
//! );
//! # Ok::<(), aql::AqlError>(())
//! ```

use crate::build::Build;
use crate::condition::{RAW_PREFIX, compile_condition};
use crate::error::{AqlError, AqlResult};
use crate::platform::{Dialect, MySqlPlatform, Platform};
use crate::result::StatementResult;
use crate::value::{Key, Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Statement compiler bound to one identifier [`Platform`].
///
/// Cheap to clone and safe to share: each call to [`Aql::compile`] uses its own
/// buffer.
#[derive(Debug, Clone)]
pub struct Aql {
    platform: Arc<dyn Platform>,
}

impl Default for Aql {
    /// MySQL quoting.
    fn default() -> Self {
        Self::new(MySqlPlatform)
    }
}

impl Aql {
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self {
            platform: Arc::new(platform),
        }
    }

    /// Use an already shared platform instance.
    pub fn with_platform(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    pub fn builder() -> AqlBuilder {
        AqlBuilder::default()
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Quote an identifier with this compiler's platform.
    pub fn quote_identifier(&self, identifier: &str) -> String {
        self.platform.quote_identifier(identifier)
    }

    /// Compile a statement spec.
    pub fn compile(&self, spec: &Map) -> AqlResult<StatementResult> {
        let result = self.assemble(spec);
        self.trace(&result);
        result
    }

    /// Compile a statement spec given as JSON. The top level must be an object.
    pub fn compile_json(&self, json: serde_json::Value) -> AqlResult<StatementResult> {
        match Value::from(json) {
            Value::Map(spec) => self.compile(&spec),
            other => Err(AqlError::malformed_clause(
                "statement",
                format!("expected an object, got {}", other.kind_name()),
            )),
        }
    }

    /// Compile a lone condition group, e.g. to splice into hand-written SQL.
    pub fn condition(&self, node: &Value) -> AqlResult<StatementResult> {
        let mut build = Build::new();
        compile_condition(node, &mut build, self.platform())?;
        Ok(build.finish())
    }

    fn assemble(&self, spec: &Map) -> AqlResult<StatementResult> {
        let mut build = Build::new();

        self.select(spec, &mut build)?;
        self.insert(spec, &mut build)?;
        self.update(spec, &mut build)?;
        self.delete(spec, &mut build)?;
        self.from(spec, &mut build)?;
        self.set(spec, &mut build)?;
        self.values(spec, &mut build)?;
        self.values_bulk(spec, &mut build)?;
        self.join(spec, &mut build)?;
        self.where_(spec, &mut build)?;
        self.group(spec, &mut build)?;
        self.having(spec, &mut build)?;
        self.order(spec, &mut build)?;
        self.limit(spec, &mut build)?;
        self.offset(spec, &mut build)?;

        Ok(build.finish())
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, result: &AqlResult<StatementResult>) {
        match result {
            Ok(statement) => tracing::trace!(
                target: "aql.compile",
                dialect = self.platform.name(),
                sql = statement.sql(),
                binds = statement.binds().len(),
                "compiled statement"
            ),
            Err(err) => tracing::debug!(
                target: "aql.compile",
                dialect = self.platform.name(),
                error = %err,
                "statement compilation failed"
            ),
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn trace(&self, _result: &AqlResult<StatementResult>) {}

    fn quote(&self, identifier: &str) -> String {
        self.platform.quote_identifier(identifier)
    }

    fn select(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let select = clause(spec, "select");
        let prefix = clause(spec, "prefix");
        if select.is_none() && prefix.is_none() {
            return Ok(());
        }

        build.push(" SELECT");

        if let Some(prefix) = prefix {
            build.push(" ").push(&raw_fragment("prefix", prefix)?);
        }

        let Some(select) = select else {
            return Ok(());
        };

        let entries: Vec<(Option<&Key>, &Value)> = match select {
            Value::Str(sql) => {
                build.push(" ").push(sql);
                return Ok(());
            }
            Value::List(items) => items.iter().map(|v| (None, v)).collect(),
            Value::Map(map) => map.iter().map(|(k, v)| (Some(k), v)).collect(),
            other => return Err(unexpected("select", "a string, list or map", other)),
        };

        let mut fields = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let column = text("select", value)?;
            let mut field = match column.strip_prefix(RAW_PREFIX) {
                Some(raw) => raw.to_string(),
                None => self.quote(column),
            };
            if let Some(Key::Name(alias)) = key {
                match alias.strip_prefix(RAW_PREFIX) {
                    Some(raw) => {
                        field.push_str(" as ");
                        field.push_str(raw);
                    }
                    None => {
                        field.push_str(" as '");
                        field.push_str(alias);
                        field.push('\'');
                    }
                }
            }
            fields.push(field);
        }
        build.push_joined(&fields, ", ");

        Ok(())
    }

    fn insert(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(table) = clause(spec, "insert") {
            build
                .push(" INSERT INTO ")
                .push(&self.quote(text("insert", table)?));
        }
        Ok(())
    }

    fn update(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(table) = clause(spec, "update") {
            build
                .push(" UPDATE ")
                .push(&self.quote(text("update", table)?));
        }
        Ok(())
    }

    fn delete(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(table) = clause(spec, "delete") {
            build
                .push(" DELETE FROM ")
                .push(&self.quote(text("delete", table)?));
        }
        Ok(())
    }

    fn from(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(from) = clause(spec, "from") else {
            return Ok(());
        };

        build.push(" FROM ");

        match from {
            Value::Str(table) => match table.strip_prefix(RAW_PREFIX) {
                Some(raw) => build.push(raw),
                None => build.push(&self.quote(table)),
            },
            Value::Map(map) if map.len() == 1 => {
                let Some((Key::Name(alias), table)) = map.first() else {
                    return Err(AqlError::malformed_clause(
                        "from",
                        "the alias of an aliased table must be a name",
                    ));
                };
                build
                    .push(&self.quote(text("from", table)?))
                    .push(" as '")
                    .push(alias)
                    .push("'")
            }
            Value::Map(map) => {
                return Err(AqlError::malformed_clause(
                    "from",
                    format!("expected a single alias => table entry, got {}", map.len()),
                ));
            }
            other => return Err(unexpected("from", "a string or an alias map", other)),
        };

        Ok(())
    }

    fn set(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(set) = clause(spec, "set") else {
            return Ok(());
        };
        let set = non_empty_map("set", set)?;

        build.push(" SET");

        for (i, (key, value)) in set.iter().enumerate() {
            build.push(if i == 0 { " " } else { ", " });
            let column = column_name("set", key)?;
            match column.strip_prefix(RAW_PREFIX) {
                Some(column) => {
                    build
                        .push(&self.quote(column))
                        .push(" = ")
                        .push(&raw_fragment("set", value)?);
                }
                None => {
                    build.push(&self.quote(column)).push(" = ").push_bind(value)?;
                }
            }
        }

        Ok(())
    }

    fn values(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(values) = clause(spec, "values") else {
            return Ok(());
        };
        let row = non_empty_map("values", values)?;

        let columns = row
            .keys()
            .map(|key| column_name("values", key))
            .collect::<AqlResult<Vec<_>>>()?;

        self.column_list(&columns, build);
        build.push(" VALUES ");
        write_tuple(
            "values",
            columns.iter().copied().zip(row.values()),
            build,
        )
    }

    fn values_bulk(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(bulk) = clause(spec, "values_bulk") else {
            return Ok(());
        };
        let rows = bulk
            .sequence_items()
            .ok_or_else(|| unexpected("values_bulk", "a list of rows", bulk))?;
        let Some(first) = rows.first() else {
            return Ok(());
        };

        let columns = non_empty_map("values_bulk", first)?
            .keys()
            .map(|key| column_name("values_bulk", key))
            .collect::<AqlResult<Vec<_>>>()?;

        self.column_list(&columns, build);
        build.push(" VALUES");

        for (i, row) in rows.iter().enumerate() {
            let row = non_empty_map("values_bulk", row)?;
            if row.len() != columns.len() {
                return Err(AqlError::malformed_clause(
                    "values_bulk",
                    format!(
                        "row {i} has {} columns, expected {}",
                        row.len(),
                        columns.len()
                    ),
                ));
            }

            let cells = columns
                .iter()
                .map(|&column| {
                    row.get(column).map(|value| (column, value)).ok_or_else(|| {
                        AqlError::malformed_clause(
                            "values_bulk",
                            format!("row {i} is missing column '{column}'"),
                        )
                    })
                })
                .collect::<AqlResult<Vec<_>>>()?;

            build.push(if i == 0 { " " } else { ", " });
            write_tuple("values_bulk", cells, build)?;
        }

        Ok(())
    }

    /// ` (a, b, c)`; raw markers are dropped, names are still quoted.
    fn column_list(&self, columns: &[&str], build: &mut Build) {
        build.push(" (");
        for (i, &column) in columns.iter().enumerate() {
            if i > 0 {
                build.push(", ");
            }
            let column = column.strip_prefix(RAW_PREFIX).unwrap_or(column);
            build.push(&self.quote(column));
        }
        build.push(")");
    }

    fn join(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(join) = clause(spec, "join") {
            build.push_joined(&fragments("join", join)?, " ");
        }
        Ok(())
    }

    fn where_(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(condition) = clause(spec, "where") else {
            return Ok(());
        };
        if !condition.is_sequence() {
            return Err(unexpected("where", "a condition map or list", condition));
        }
        if is_empty_group(condition) {
            return Ok(());
        }

        build.push(" WHERE ");
        compile_condition(condition, build, self.platform())
    }

    fn group(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(group) = clause(spec, "group") {
            build
                .push(" GROUP BY")
                .push_joined(&fragments("group", group)?, ", ");
        }
        Ok(())
    }

    fn having(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        let Some(having) = clause(spec, "having") else {
            return Ok(());
        };

        match having {
            Value::Str(sql) => {
                build.push(" HAVING ").push(sql);
                Ok(())
            }
            Value::Map(_) | Value::List(_) if is_empty_group(having) => Ok(()),
            Value::Map(_) | Value::List(_) => {
                build.push(" HAVING ");
                compile_condition(having, build, self.platform())
            }
            other => Err(unexpected("having", "a string or a condition map", other)),
        }
    }

    fn order(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(order) = clause(spec, "order") {
            build
                .push(" ORDER BY")
                .push_joined(&fragments("order", order)?, " ");
        }
        Ok(())
    }

    fn limit(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(limit) = clause(spec, "limit") {
            build
                .push(" LIMIT ")
                .push_bind_value(integer("limit", limit)?);
        }
        Ok(())
    }

    fn offset(&self, spec: &Map, build: &mut Build) -> AqlResult<()> {
        if let Some(offset) = clause(spec, "offset") {
            build
                .push(" OFFSET ")
                .push_bind_value(integer("offset", offset)?);
        }
        Ok(())
    }
}

/// Builder for [`Aql`] when the platform is chosen at runtime.
///
/// ```ignore
/// use aql::{Aql, Dialect};
///
/// let dialect: Dialect = std::env::var("SQL_DIALECT")?.parse()?;
/// let aql = Aql::builder().dialect(dialect).build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AqlBuilder {
    platform: Option<Arc<dyn Platform>>,
}

impl AqlBuilder {
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.platform = Some(dialect.platform());
        self
    }

    pub fn platform(mut self, platform: impl Platform + 'static) -> Self {
        self.platform = Some(Arc::new(platform));
        self
    }

    pub fn shared_platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Fails with [`AqlError::MissingPlatform`] if no platform was set.
    pub fn build(self) -> AqlResult<Aql> {
        self.platform
            .map(Aql::with_platform)
            .ok_or(AqlError::MissingPlatform)
    }
}

/// A clause is present when its key exists with a non-null value.
fn clause<'a>(spec: &'a Map, name: &str) -> Option<&'a Value> {
    spec.get(name).filter(|v| !matches!(v, Value::Null))
}

fn unexpected(clause: &'static str, expected: &str, got: &Value) -> AqlError {
    AqlError::malformed_clause(
        clause,
        format!("expected {expected}, got {}", got.kind_name()),
    )
}

fn text<'a>(clause: &'static str, value: &'a Value) -> AqlResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| unexpected(clause, "a string", value))
}

/// SQL inlined without binding: strings verbatim, integers in decimal.
fn raw_fragment<'a>(clause: &'static str, value: &'a Value) -> AqlResult<Cow<'a, str>> {
    match value {
        Value::Str(sql) => Ok(Cow::Borrowed(sql)),
        Value::Int(i) => Ok(Cow::Owned(i.to_string())),
        other => Err(unexpected(clause, "raw SQL text", other)),
    }
}

/// A string, or a sequence of strings.
fn fragments<'a>(clause: &'static str, value: &'a Value) -> AqlResult<Vec<&'a str>> {
    match value {
        Value::Str(sql) => Ok(vec![sql]),
        Value::List(_) | Value::Map(_) => value
            .sequence_items()
            .unwrap_or_default()
            .into_iter()
            .map(|item| text(clause, item))
            .collect(),
        other => Err(unexpected(clause, "a string or a list of strings", other)),
    }
}

fn non_empty_map<'a>(clause: &'static str, value: &'a Value) -> AqlResult<&'a Map> {
    match value {
        Value::Map(map) if !map.is_empty() => Ok(map),
        Value::Map(_) => Err(AqlError::malformed_clause(clause, "expected at least one column")),
        other => Err(unexpected(clause, "a column => value map", other)),
    }
}

fn column_name<'a>(clause: &'static str, key: &'a Key) -> AqlResult<&'a str> {
    key.as_name().ok_or_else(|| {
        AqlError::malformed_clause(clause, format!("column keys must be names, got index {key}"))
    })
}

fn write_tuple<'a>(
    clause: &'static str,
    cells: impl IntoIterator<Item = (&'a str, &'a Value)>,
    build: &mut Build,
) -> AqlResult<()> {
    build.push("(");
    for (i, (column, value)) in cells.into_iter().enumerate() {
        if i > 0 {
            build.push(", ");
        }
        if column.starts_with(RAW_PREFIX) {
            build.push(&raw_fragment(clause, value)?);
        } else {
            build.push_bind(value)?;
        }
    }
    build.push(")");
    Ok(())
}

fn is_empty_group(value: &Value) -> bool {
    match value {
        Value::Map(map) => map.is_empty(),
        Value::List(items) => items.is_empty(),
        _ => false,
    }
}

/// LIMIT/OFFSET are always bound as integers.
fn integer(clause: &'static str, value: &Value) -> AqlResult<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Str(s) => s.trim().parse().map_err(|_| {
            AqlError::malformed_clause(clause, format!("'{s}' is not an integer"))
        }),
        other => Err(unexpected(clause, "an integer", other)),
    }
}
