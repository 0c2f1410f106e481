//! Pure SQL text generators.
//!
//! No input validation happens here: an empty column set or a missing WHERE
//! on update produces the corresponding malformed statement. Guarding those
//! would change SQL semantics the caller owns, so they are documented caller
//! obligations instead (the schema layer is where validation lives).

use crate::value::Value;

/// One column clause of a `CREATE TABLE` statement, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnClause {
    pub name: String,
    pub sql_type: String,
    pub unique: bool,
    pub not_null: bool,
    /// Foreign-key targets: `(referenced table, referenced columns)`.
    pub references: Vec<(String, Vec<String>)>,
}

impl ColumnClause {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self { name: name.into(), sql_type: sql_type.into(), ..Default::default() }
    }
}

pub fn create_table(table: &str, columns: &[ColumnClause]) -> String {
    let clauses = columns
        .iter()
        .map(|column| {
            let mut clause = format!("{} {}", column.name, column.sql_type);
            if column.unique {
                clause.push_str(" UNIQUE");
            }
            if column.not_null {
                clause.push_str(" NOT NULL");
            }
            for (ref_table, ref_columns) in &column.references {
                clause.push_str(&format!(" REFERENCES {} ({})", ref_table, ref_columns.join(", ")));
            }
            clause
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("CREATE TABLE {} ({})", table, clauses)
}

pub fn drop_table(table: &str) -> String { format!("DROP TABLE {}", table) }

pub fn table_exists(table: &str, schema: &str) -> String {
    format!("SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}');", schema, table)
}

pub fn column_exists(table: &str, column: &str, schema: &str) -> String {
    format!(
        "SELECT EXISTS (SELECT FROM information_schema.columns WHERE table_schema = '{}' AND table_name = '{}' AND column_name = '{}');",
        schema, table, column
    )
}

pub fn row_exists(table: &str, where_text: &str) -> String {
    format!("SELECT EXISTS (SELECT FROM {} WHERE {} LIMIT 1);", table, where_text)
}

/// `SELECT * FROM ..` with optional WHERE / ORDER BY / LIMIT clauses.
///
/// A clause is appended only when its text is present and non-empty, so the
/// [`crate::Condition::Empty`] null-object flows through without branching at
/// the call site. A limit of zero is treated as absent.
pub fn select(table: &str, where_text: Option<&str>, order_by: Option<&str>, limit: Option<u32>) -> String {
    let mut query = format!("SELECT * FROM {}", table);
    if let Some(text) = where_text {
        if !text.is_empty() {
            query.push_str(&format!(" WHERE {}", text));
        }
    }
    if let Some(text) = order_by {
        if !text.is_empty() {
            query.push_str(&format!(" ORDER BY {}", text));
        }
    }
    if let Some(count) = limit {
        if count > 0 {
            query.push_str(&format!(" LIMIT {}", count));
        }
    }
    query.push(';');
    query
}

/// `INSERT INTO ..`. Entries whose value is `Null` are skipped entirely:
/// an absent value is not an explicit NULL assignment in this design.
pub fn insert(table: &str, entries: &[(String, Value)]) -> String {
    let mut names = Vec::new();
    let mut values = Vec::new();
    for (name, value) in entries {
        if !value.is_null() {
            names.push(name.clone());
            values.push(value.encode());
        }
    }
    format!("INSERT INTO {} ({}) VALUES ({});", table, names.join(","), values.join(","))
}

/// `UPDATE .. SET .. WHERE ..`. Null entries are skipped like [`insert`];
/// `where_text` is mandatory but deliberately not validated.
pub fn update(table: &str, entries: &[(String, Value)], where_text: &str) -> String {
    let assignments = entries
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| format!("{}={}", name, value.encode()))
        .collect::<Vec<_>>()
        .join(",");
    format!("UPDATE {} SET {} WHERE {};", table, assignments, where_text)
}

/// Introspection query used to reflect live column metadata into the schema
/// model: name, declared type, nullability, updatability and the type oid
/// (via the underlying type's `regtype`).
pub fn columns(table: &str, schema: &str) -> String {
    format!(
        "SELECT column_name, data_type, is_nullable, is_updatable, udt_name::regtype::oid AS type_code FROM information_schema.columns WHERE table_schema = '{}' AND table_name = '{}';",
        schema, table
    )
}

/// Resolve a type oid to its SQL type name.
pub fn type_name(type_code: u32) -> String { format!("SELECT {}::regtype::text;", type_code) }
