//! Output buffer shared by all clauses of one compilation.
//!
//! `Build` keeps the SQL text and the bound values side by side so that every
//! `?` pushed into the text is matched by exactly one bind, in order.

use crate::bind::{Bind, Binder};
use crate::error::AqlResult;
use crate::result::StatementResult;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Build {
    sql: String,
    binder: Binder,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw SQL.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append `' '` followed by `parts` joined with `glue`.
    pub fn push_joined<S: AsRef<str>>(&mut self, parts: &[S], glue: &str) -> &mut Self {
        self.sql.push(' ');
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(glue);
            }
            self.sql.push_str(part.as_ref());
        }
        self
    }

    /// Bind a spec value and append its placeholder.
    pub fn push_bind(&mut self, value: &Value) -> AqlResult<&mut Self> {
        let placeholder = self.binder.bind(value)?;
        self.sql.push_str(placeholder);
        Ok(self)
    }

    /// Bind an already classified value and append its placeholder.
    pub fn push_bind_value(&mut self, bind: impl Into<Bind>) -> &mut Self {
        let placeholder = self.binder.bind_value(bind);
        self.sql.push_str(placeholder);
        self
    }

    /// The SQL accumulated so far (untrimmed).
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Freeze into a result; surrounding whitespace is trimmed from the text.
    pub fn finish(self) -> StatementResult {
        StatementResult::new(self.sql.trim().to_string(), self.binder.into_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_placeholders_in_order() {
        let mut b = Build::new();
        b.push(" WHERE a = ")
            .push_bind(&Value::Int(1))
            .unwrap()
            .push(" AND b = ")
            .push_bind(&Value::from("x"))
            .unwrap();

        let result = b.finish();
        assert_eq!(result.sql(), "WHERE a = ? AND b = ?");
        assert_eq!(
            result.binds(),
            &[Bind::Int(1), Bind::String("x".into())]
        );
    }

    #[test]
    fn push_joined_prefixes_a_space() {
        let mut b = Build::new();
        b.push(" GROUP BY").push_joined(&["a", "b"], ", ");
        assert_eq!(b.sql(), " GROUP BY a, b");
    }

    #[test]
    fn failed_bind_leaves_text_untouched() {
        let mut b = Build::new();
        b.push("x = ");
        assert!(b.push_bind(&Value::Float(0.5)).is_err());
        assert_eq!(b.sql(), "x = ");
        assert!(b.binder().is_empty());
    }
}
