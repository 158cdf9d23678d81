//! Dialect-aware identifier quoting.
//!
//! A [`Platform`] decides, per identifier segment, whether quoting is needed.
//! Only reserved words are quoted so generated SQL stays readable:
//!
//! ```ignore
//! use aql::platform::{MySqlPlatform, Platform};
//!
//! assert_eq!(MySqlPlatform.quote_identifier("post_id"), "post_id");
//! assert_eq!(MySqlPlatform.quote_identifier("order"), "`order`");
//! assert_eq!(MySqlPlatform.quote_identifier("shop.order"), "shop.`order`");
//! ```

mod mysql;
mod postgres;
mod sqlite;


pub use mysql::MySqlPlatform;
pub use postgres::PostgreSqlPlatform;
pub use sqlite::SqlitePlatform;

use crate::error::AqlError;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Identifier quoting rules of one SQL dialect.
///
/// Implementors supply the quote character and the reserved-word check; the
/// splitting of dotted identifiers and the escaping are shared.
pub trait Platform: Send + Sync + fmt::Debug {
    /// Short dialect name, used in logs.
    fn name(&self) -> &'static str;

    fn quote_char(&self) -> char;

    /// Whether a single identifier segment collides with a reserved word.
    fn is_reserved(&self, segment: &str) -> bool;

    /// Quote a possibly dotted identifier, segment by segment.
    fn quote_identifier(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len() + 2);
        for (i, segment) in identifier.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            if self.is_reserved(segment) {
                write_quoted(&mut out, segment, self.quote_char());
            } else {
                out.push_str(segment);
            }
        }
        out
    }
}

/// Wrap `segment` in `quote`, doubling any embedded quote characters.
fn write_quoted(out: &mut String, segment: &str, quote: char) {
    out.push(quote);
    for ch in segment.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}

/// A platform with a caller-supplied quote character and keyword list.
#[derive(Debug, Clone)]
pub struct KeywordPlatform {
    quote: char,
    keywords: HashSet<String>,
}

impl KeywordPlatform {
    /// Keywords are matched case-insensitively.
    pub fn new<I, S>(quote: char, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            quote,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }
}

impl Platform for KeywordPlatform {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn quote_char(&self) -> char {
        self.quote
    }

    fn is_reserved(&self, segment: &str) -> bool {
        self.keywords.contains(&segment.to_ascii_uppercase())
    }
}

/// Built-in dialects, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
    Sqlite,
}

impl Dialect {
    /// A shareable platform instance for this dialect.
    pub fn platform(self) -> Arc<dyn Platform> {
        match self {
            Dialect::MySql => Arc::new(MySqlPlatform),
            Dialect::PostgreSql => Arc::new(PostgreSqlPlatform),
            Dialect::Sqlite => Arc::new(SqlitePlatform),
        }
    }
}

impl FromStr for Dialect {
    type Err = AqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pgsql" => Ok(Dialect::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(AqlError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Sqlite => "sqlite",
        })
    }
}
