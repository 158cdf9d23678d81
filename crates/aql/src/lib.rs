//! # aql
//!
//! Array Query Language: describe a SQL statement as nested, ordered key/value
//! data and compile it into parameterized SQL plus its bound values.
//!
//! ## Features
//!
//! - **Injection-safe**: values are always bound to `?` placeholders
//! - **Readable output**: identifiers are quoted only when they hit a reserved word
//! - **Dialect-aware quoting**: MySQL, PostgreSQL, SQLite or a custom keyword list
//! - **Raw escape hatch**: a leading `|` on a key or value emits it verbatim
//! - **Pure**: no I/O, no connection; the result is handed to any `?`-style driver
//!
//! ```ignore
//! use aql::{Aql, BindKind, list, map};
//!
//! let result = Aql::default().compile(&map! {
//!     "select" => map! { 0 => "post_id", "title" => "post_title" },
//!     "from" => "post",
//!     "where" => map! {
//!         "post_level:between" => list![2, 5],
//!         0 => map! { ":operator" => "or", "post_owner" => "John", "post_status" => "draft" },
//!     },
//!     "limit" => 10,
//! })?;
//!
//! assert_eq!(
//!     result.sql(),
//!     "SELECT post_id, post_title as 'title' FROM post \
//!      WHERE post_level BETWEEN ? AND ? AND (post_owner = ? OR post_status = ?) LIMIT ?"
//! );
//! assert_eq!(result.types()[0], BindKind::Int);
//! # Ok::<(), aql::AqlError>(())
//! ```

pub mod bind;
pub mod build;
pub mod compiler;
pub mod condition;
pub mod error;
pub mod platform;
pub mod result;
pub mod value;

pub use bind::{Bind, BindKind, Binder, PLACEHOLDER};
pub use build::Build;
pub use compiler::{Aql, AqlBuilder};
pub use condition::{ColumnKey, Comparison, Logical, compile_condition};
pub use error::{AqlError, AqlResult};
pub use platform::{
    Dialect, KeywordPlatform, MySqlPlatform, Platform, PostgreSqlPlatform, SqlitePlatform,
};
pub use result::StatementResult;
pub use value::{Key, Map, Value};
