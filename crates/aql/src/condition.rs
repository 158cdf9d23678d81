//! Condition compiler for WHERE and HAVING.
//!
//! A condition group is a [`Map`](crate::Map) (or a [`Value::List`], whose entries
//! are all positional). Entries render in order, joined by the group's logical
//! operator:
//!
//! - `"column" => value`: `column = ?`
//! - `"column:gt" => value` / `"column >" => value`: any comparison token after
//!   the first `:` or whitespace, resolved through [`Comparison::parse`]
//! - `"|expr" => value`: the column part is emitted verbatim, not quoted
//! - `0 => "raw sql"`: emitted verbatim
//! - `0 => map! { .. }`: a nested group wrapped in parentheses
//! - `":operator" => "or"`: join this group's direct entries with `OR`

use crate::build::Build;
use crate::error::{AqlError, AqlResult};
use crate::platform::Platform;
use crate::value::Value;

/// Meta key selecting the logical operator of its own group.
pub const OPERATOR_DIRECTIVE: &str = ":operator";

/// Prefix marking a key or value as raw SQL.
pub const RAW_PREFIX: char = '|';

/// Logical operator joining sibling terms of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logical {
    #[default]
    And,
    Or,
}

impl Logical {
    fn joiner(self) -> &'static str {
        match self {
            Logical::And => " AND ",
            Logical::Or => " OR ",
        }
    }
}

/// Comparison operator of a condition term.
///
/// Aliases (`gt`, `notin`, ...) and their SQL spellings resolve to the same
/// variant; anything unrecognized is kept verbatim in [`Comparison::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    Like,
    In,
    NotIn,
    Between,
    NotBetween,
    /// Native SQL operator passed through as written, e.g. `<>` or `REGEXP`.
    Other(String),
}

impl Comparison {
    pub fn parse(token: &str) -> Self {
        match token {
            "eq" | "=" => Comparison::Eq,
            "gt" | ">" => Comparison::Gt,
            "ge" | ">=" => Comparison::Ge,
            "lt" | "<" => Comparison::Lt,
            "le" | "<=" => Comparison::Le,
            "not" | "neq" | "!=" => Comparison::Ne,
            "like" | "LIKE" => Comparison::Like,
            "in" | "IN" => Comparison::In,
            "notin" | "NOT IN" => Comparison::NotIn,
            "between" | "BETWEEN" => Comparison::Between,
            "notbetween" | "NOT BETWEEN" => Comparison::NotBetween,
            other => Comparison::Other(other.to_string()),
        }
    }

    pub fn as_sql(&self) -> &str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Like => "LIKE",
            Comparison::In => "IN",
            Comparison::NotIn => "NOT IN",
            Comparison::Between => "BETWEEN",
            Comparison::NotBetween => "NOT BETWEEN",
            Comparison::Other(op) => op,
        }
    }
}

/// A condition key split into its column and comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKey<'a> {
    pub column: &'a str,
    /// Emit `column` verbatim instead of quoting it.
    pub raw: bool,
    pub comparison: Comparison,
}

impl<'a> ColumnKey<'a> {
    /// Split `key` at the first `:` or whitespace character.
    ///
    /// A missing or blank comparison token means `=`.
    pub fn parse(key: &'a str) -> Self {
        let (raw, rest) = match key.strip_prefix(RAW_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, key),
        };

        let separator = rest
            .char_indices()
            .find(|&(_, c)| c == ':' || c.is_whitespace());
        let (column, token) = match separator {
            Some((i, sep)) => (&rest[..i], rest[i + sep.len_utf8()..].trim()),
            None => (rest, ""),
        };

        let comparison = if token.is_empty() {
            Comparison::Eq
        } else {
            Comparison::parse(token)
        };

        Self {
            column,
            raw,
            comparison,
        }
    }
}

/// The value of a term, shaped by its comparison.
#[derive(Debug)]
enum Operand<'a> {
    Scalar(&'a Value),
    Pair(&'a Value, &'a Value),
    Sequence(Vec<&'a Value>),
}

impl<'a> Operand<'a> {
    fn resolve(column: &str, comparison: &Comparison, value: &'a Value) -> AqlResult<Self> {
        match comparison {
            Comparison::Between | Comparison::NotBetween => match value.sequence_items() {
                Some(items) if items.len() == 2 => Ok(Operand::Pair(items[0], items[1])),
                Some(items) => Err(AqlError::malformed_condition(format!(
                    "'{column} {}' expects exactly 2 values, got {}",
                    comparison.as_sql(),
                    items.len()
                ))),
                None => Err(AqlError::malformed_condition(format!(
                    "'{column} {}' expects a pair of values, got {}",
                    comparison.as_sql(),
                    value.kind_name()
                ))),
            },
            Comparison::In | Comparison::NotIn => match value.sequence_items() {
                Some(items) if !items.is_empty() => Ok(Operand::Sequence(items)),
                Some(_) => Err(AqlError::malformed_condition(format!(
                    "'{column} {}' expects at least one value",
                    comparison.as_sql()
                ))),
                None => Err(AqlError::malformed_condition(format!(
                    "'{column} {}' expects a list of values, got {}",
                    comparison.as_sql(),
                    value.kind_name()
                ))),
            },
            _ => Ok(Operand::Scalar(value)),
        }
    }

    fn write(&self, build: &mut Build) -> AqlResult<()> {
        match self {
            Operand::Scalar(value) => {
                build.push_bind(value)?;
            }
            Operand::Pair(from, to) => {
                build.push_bind(from)?.push(" AND ").push_bind(to)?;
            }
            Operand::Sequence(items) => {
                build.push("(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        build.push(",");
                    }
                    build.push_bind(item)?;
                }
                build.push(")");
            }
        }
        Ok(())
    }
}

/// Render a condition group into `build`.
///
/// `node` must be a map or a list; anything else is a malformed condition.
pub fn compile_condition(node: &Value, build: &mut Build, platform: &dyn Platform) -> AqlResult<()> {
    let terms: Vec<(Option<&str>, &Value)> = match node {
        Value::Map(map) => map.iter().map(|(k, v)| (k.as_name(), v)).collect(),
        Value::List(items) => items.iter().map(|v| (None, v)).collect(),
        other => {
            return Err(AqlError::malformed_condition(format!(
                "expected a condition group, got {}",
                other.kind_name()
            )));
        }
    };

    let logical = terms
        .iter()
        .find(|(k, _)| *k == Some(OPERATOR_DIRECTIVE))
        .and_then(|(_, v)| v.as_str())
        .filter(|op| op.eq_ignore_ascii_case("or"))
        .map_or(Logical::And, |_| Logical::Or);

    let mut first = true;
    for (key, value) in terms {
        if key == Some(OPERATOR_DIRECTIVE) {
            continue;
        }
        if !first {
            build.push(logical.joiner());
        }
        first = false;

        match key {
            None => compile_positional(value, build, platform)?,
            Some(key) => compile_term(key, value, build, platform)?,
        }
    }

    Ok(())
}

fn compile_positional(value: &Value, build: &mut Build, platform: &dyn Platform) -> AqlResult<()> {
    match value {
        Value::Str(sql) => {
            build.push(sql);
            Ok(())
        }
        Value::Map(_) | Value::List(_) => {
            build.push("(");
            compile_condition(value, build, platform)?;
            build.push(")");
            Ok(())
        }
        other => Err(AqlError::malformed_condition(format!(
            "positional entries must be raw SQL or a nested group, got {}",
            other.kind_name()
        ))),
    }
}

fn compile_term(key: &str, value: &Value, build: &mut Build, platform: &dyn Platform) -> AqlResult<()> {
    let ColumnKey {
        column,
        raw,
        mut comparison,
    } = ColumnKey::parse(key);

    if comparison == Comparison::Eq && value.is_sequence() {
        comparison = Comparison::In;
    }

    let operand = Operand::resolve(column, &comparison, value)?;

    if raw {
        build.push(column);
    } else {
        build.push(&platform.quote_identifier(column));
    }
    build.push(" ").push(comparison.as_sql()).push(" ");
    operand.write(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Bind;
    use crate::platform::MySqlPlatform;
    use crate::{list, map};

    fn render(node: impl Into<Value>) -> AqlResult<(String, Vec<Bind>)> {
        let mut build = Build::new();
        compile_condition(&node.into(), &mut build, &MySqlPlatform)?;
        let (sql, binds, _) = build.finish().into_parts();
        Ok((sql, binds))
    }

    #[test]
    fn key_grammar_splits_on_colon_or_whitespace() {
        assert_eq!(
            ColumnKey::parse("post_level"),
            ColumnKey {
                column: "post_level",
                raw: false,
                comparison: Comparison::Eq
            }
        );
        assert_eq!(ColumnKey::parse("a:gt").comparison, Comparison::Gt);
        assert_eq!(ColumnKey::parse("a >=").comparison, Comparison::Ge);
        assert_eq!(
            ColumnKey::parse("a NOT BETWEEN").comparison,
            Comparison::NotBetween
        );
        assert_eq!(
            ColumnKey::parse("a\tREGEXP").comparison,
            Comparison::Other("REGEXP".into())
        );

        let key = ColumnKey::parse("|COUNT(*):gt");
        assert!(key.raw);
        assert_eq!(key.column, "COUNT(*)");
        assert_eq!(key.comparison, Comparison::Gt);
    }

    #[test]
    fn alias_table() {
        for (alias, sql) in [
            ("eq", "="),
            ("gt", ">"),
            ("ge", ">="),
            ("lt", "<"),
            ("le", "<="),
            ("not", "!="),
            ("neq", "!="),
            ("like", "LIKE"),
            ("in", "IN"),
            ("notin", "NOT IN"),
            ("between", "BETWEEN"),
            ("notbetween", "NOT BETWEEN"),
            ("<>", "<>"),
        ] {
            assert_eq!(Comparison::parse(alias).as_sql(), sql, "alias {alias}");
        }
    }

    #[test]
    fn blank_comparison_defaults_to_eq() {
        assert_eq!(ColumnKey::parse("a:").comparison, Comparison::Eq);
        assert_eq!(ColumnKey::parse("a ").comparison, Comparison::Eq);
    }

    #[test]
    fn nested_or_group_is_parenthesized() {
        let (sql, binds) = render(map! {
            "a" => 1,
            0 => map! { ":operator" => "OR", "b" => 2, "c" => 3 },
        })
        .unwrap();
        assert_eq!(sql, "a = ? AND (b = ? OR c = ?)");
        assert_eq!(binds, vec![Bind::Int(1), Bind::Int(2), Bind::Int(3)]);
    }

    #[test]
    fn operator_directive_does_not_leak_into_nested_groups() {
        let (sql, _) = render(map! {
            ":operator" => "or",
            "a" => 1,
            0 => map! { "b" => 2, "c" => 3 },
        })
        .unwrap();
        assert_eq!(sql, "a = ? OR (b = ? AND c = ?)");
    }

    #[test]
    fn operator_directive_position_does_not_matter() {
        let (sql, _) = render(map! { "a" => 1, "b" => 2, ":operator" => "Or" }).unwrap();
        assert_eq!(sql, "a = ? OR b = ?");

        let (sql, _) = render(map! { ":operator" => "xor", "a" => 1, "b" => 2 }).unwrap();
        assert_eq!(sql, "a = ? AND b = ?");
    }

    #[test]
    fn positional_raw_sql_is_verbatim() {
        let (sql, binds) = render(map! { 0 => "a IS NULL", "b:lt" => 5 }).unwrap();
        assert_eq!(sql, "a IS NULL AND b < ?");
        assert_eq!(binds, vec![Bind::Int(5)]);
    }

    #[test]
    fn list_groups_are_positional() {
        let (sql, _) = render(list!["a = 1", list!["b = 2", "c = 3"]]).unwrap();
        assert_eq!(sql, "a = 1 AND (b = 2 AND c = 3)");
    }

    #[test]
    fn reserved_columns_are_quoted_unless_raw() {
        let (sql, _) = render(map! { "order" => 1, "|group" => 2 }).unwrap();
        assert_eq!(sql, "`order` = ? AND group = ?");
    }

    #[test]
    fn eq_with_sequence_promotes_to_in() {
        let implicit = render(map! { "id" => list!["a", "b", "c"] }).unwrap();
        let explicit = render(map! { "id:in" => list!["a", "b", "c"] }).unwrap();
        assert_eq!(implicit, explicit);
        assert_eq!(implicit.0, "id IN (?,?,?)");
        assert_eq!(
            implicit.1,
            vec![
                Bind::String("a".into()),
                Bind::String("b".into()),
                Bind::String("c".into())
            ]
        );
    }

    #[test]
    fn in_accepts_map_values_in_order() {
        let (sql, binds) = render(map! { "id NOT IN" => map! { "x" => 2, "y" => 1 } }).unwrap();
        assert_eq!(sql, "id NOT IN (?,?)");
        assert_eq!(binds, vec![Bind::Int(2), Bind::Int(1)]);
    }

    #[test]
    fn between_preserves_bind_kinds() {
        let (sql, binds) = render(map! { "lvl:between" => list![4, 5] }).unwrap();
        assert_eq!(sql, "lvl BETWEEN ? AND ?");
        assert_eq!(binds, vec![Bind::Int(4), Bind::Int(5)]);

        let (_, binds) = render(map! { "lvl notbetween" => list!["4", "5"] }).unwrap();
        assert_eq!(binds, vec![Bind::String("4".into()), Bind::String("5".into())]);
    }

    #[test]
    fn between_requires_exactly_two_values() {
        let err = render(map! { "lvl:between" => list![1, 2, 3] }).unwrap_err();
        assert!(err.is_malformed_condition());

        let err = render(map! { "lvl:between" => 1 }).unwrap_err();
        assert!(err.is_malformed_condition());
    }

    #[test]
    fn in_requires_a_non_empty_sequence() {
        assert!(render(map! { "id:in" => 1 }).unwrap_err().is_malformed_condition());
        assert!(render(map! { "id:in" => list![] }).unwrap_err().is_malformed_condition());
    }

    #[test]
    fn non_scalar_for_plain_comparison_is_unsupported_bind_kind() {
        let err = render(map! { "a:gt" => list![1, 2] }).unwrap_err();
        assert_eq!(err, AqlError::UnsupportedBindKind { kind: "list" });

        let err = render(map! { "a" => 1.5 }).unwrap_err();
        assert_eq!(err, AqlError::UnsupportedBindKind { kind: "float" });
    }

    #[test]
    fn positional_scalar_is_malformed() {
        let err = render(map! { 0 => 42 }).unwrap_err();
        assert!(err.is_malformed_condition());
    }

    #[test]
    fn scalar_node_is_malformed() {
        let err = render("a = 1").unwrap_err();
        assert!(err.is_malformed_condition());
    }
}
