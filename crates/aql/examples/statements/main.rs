//! Compile a few statements and print their SQL, binds and bind kinds.
//!
//! Run with: `cargo run -p aql --example statements -- [mysql|postgresql|sqlite]`

use aql::{Aql, AqlResult, Dialect, Map, list, map};

fn show(title: &str, aql: &Aql, spec: &Map) -> AqlResult<()> {
    let result = aql.compile(spec)?;
    let types: Vec<&str> = result.types().iter().map(|k| k.as_str()).collect();
    println!("-- {title}");
    println!("{}", result.sql());
    println!("binds: {:?}", result.binds());
    println!("types: {types:?}\n");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dialect: Dialect = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("mysql")
        .parse()?;
    let aql = Aql::builder().dialect(dialect).build()?;
    println!("dialect: {dialect}\n");

    show(
        "select with nested OR group",
        &aql,
        &map! {
            "select" => map! { 0 => "post_id", "title" => "post_title", "|total" => "|COUNT(*)" },
            "from" => "post",
            "where" => map! {
                "post_level:between" => list![2, 5],
                0 => map! { ":operator" => "or", "post_owner" => "John", "post_status" => "draft" },
            },
            "group" => list!["post_id", "post_title"],
            "order" => "post_id DESC",
            "limit" => 10,
        },
    )?;

    show(
        "insert many rows",
        &aql,
        &map! {
            "insert" => "order",
            "values_bulk" => list![
                map! { "user" => 1, "total" => 100, "|created_at" => "CURRENT_TIMESTAMP" },
                map! { "user" => 2, "total" => 250, "|created_at" => "CURRENT_TIMESTAMP" },
            ],
        },
    )?;

    show(
        "update with raw expression",
        &aql,
        &map! {
            "update" => "user",
            "set" => map! { "name" => "Alice", "|visits" => "visits + 1" },
            "where" => map! { "id" => 7 },
        },
    )?;

    Ok(())
}
