use crate::schema::Table;
use pgquill_sql::value::Value;
use std::collections::HashMap;

/// One record's worth of column values: an ephemeral name-to-value map,
/// built either from a fetched result tuple or by the caller on the write
/// path. Presence is defined as "value is not `Null`" - the statement
/// builder drops null entries from INSERT/UPDATE lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self { Self::default() }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) { self.values.insert(column.into(), value.into()); }

    /// Chainable form of [`Row::set`] for literal row construction.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// The value for a column; `Null` when the column was never set.
    pub fn get(&self, column: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(column).unwrap_or(&NULL)
    }

    pub fn contains(&self, column: &str) -> bool { !self.get(column).is_null() }

    /// Map a positional result tuple into a row.
    ///
    /// `ordinals` comes from the query's result metadata (column name to
    /// tuple position) - never from declaration order, so the mapping stays
    /// correct when the live schema orders columns differently. A column
    /// missing from the metadata, or a tuple shorter than expected, yields
    /// `Null` rather than an error.
    pub fn from_positional(table: &Table, ordinals: &HashMap<String, usize>, tuple: &[Value]) -> Row {
        let mut row = Row::new();
        for column in table.columns() {
            let value = ordinals.get(column.name()).and_then(|&index| tuple.get(index)).cloned().unwrap_or(Value::Null);
            row.values.insert(column.name().to_owned(), value);
        }
        row
    }

    /// The inverse mapping, feeding INSERT/UPDATE: ordered `(name, value)`
    /// pairs for exactly the table's declared columns. Anything else set on
    /// the row is ignored.
    pub fn to_column_values(&self, table: &Table) -> Vec<(String, Value)> {
        table.columns().iter().map(|column| (column.name().to_owned(), self.get(column.name()).clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSpec, Table};
    use anyhow::Result;
    use pgquill_sql::statement;

    fn people() -> Result<Table> {
        Ok(Table::builder("people")
            .column("id", ColumnSpec::new("integer").not_null())
            .column("name", ColumnSpec::new("text"))
            .build()?)
    }

    #[test]
    fn positional_mapping_is_name_keyed() -> Result<()> {
        let table = people()?;
        let ordinals = HashMap::from([("id".to_owned(), 0), ("name".to_owned(), 1)]);
        let row = Row::from_positional(&table, &ordinals, &[Value::Integer(7), Value::from("bob")]);
        assert_eq!(row.get("id"), &Value::Integer(7));
        assert_eq!(row.get("name"), &Value::Text("bob".to_owned()));
        Ok(())
    }

    #[test]
    fn reordered_result_metadata_still_maps_correctly() -> Result<()> {
        let table = people()?;
        // Result order differs from declaration order.
        let ordinals = HashMap::from([("name".to_owned(), 0), ("id".to_owned(), 1)]);
        let row = Row::from_positional(&table, &ordinals, &[Value::from("bob"), Value::Integer(7)]);
        assert_eq!(row.get("id"), &Value::Integer(7));
        assert_eq!(row.get("name"), &Value::Text("bob".to_owned()));
        Ok(())
    }

    #[test]
    fn short_tuple_pads_with_null() -> Result<()> {
        let table = people()?;
        let ordinals = HashMap::from([("id".to_owned(), 0), ("name".to_owned(), 1)]);
        let row = Row::from_positional(&table, &ordinals, &[Value::Integer(7)]);
        assert_eq!(row.get("id"), &Value::Integer(7));
        assert!(row.get("name").is_null());
        assert!(!row.contains("name"));
        Ok(())
    }

    #[test]
    fn unset_column_reads_as_null() {
        let row = Row::new().with("id", 1);
        assert!(row.get("name").is_null());
        assert!(row.contains("id"));
    }

    #[test]
    fn write_path_considers_declared_columns_only() -> Result<()> {
        let table = people()?;
        let row = Row::new().with("id", 1).with("name", "x").with("stray", "ignored");
        let entries = row.to_column_values(&table);
        assert_eq!(
            entries,
            vec![("id".to_owned(), Value::Integer(1)), ("name".to_owned(), Value::Text("x".to_owned()))]
        );
        Ok(())
    }

    #[test]
    fn null_valued_columns_never_reach_the_insert_list() -> Result<()> {
        let table = people()?;
        let row = Row::new().with("id", 1); // name never set
        let entries = row.to_column_values(&table);
        assert_eq!(statement::insert(table.name(), &entries), "INSERT INTO people (id) VALUES (1);");
        Ok(())
    }
}
