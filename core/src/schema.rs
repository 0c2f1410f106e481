use crate::error::SchemaError;
use pgquill_sql::condition::Condition;
use pgquill_sql::statement::{self, ColumnClause};
use pgquill_sql::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared attributes of a column, prior to registration on a table.
///
/// The name and owning table are supplied at registration time by
/// [`TableBuilder::column`]; everything else is declared here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    data_type: String,
    nullable: bool,
    unique: bool,
    primary_key: bool,
    updatable: bool,
    references: Vec<(String, String)>,
    precision: Option<i32>,
    scale: Option<i32>,
    type_code: Option<u32>,
}

impl ColumnSpec {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            nullable: true,
            unique: false,
            primary_key: false,
            updatable: true,
            references: Vec::new(),
            precision: None,
            scale: None,
            type_code: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the column as not updatable (generated columns, view columns).
    /// Reflection sets this from `information_schema.columns.is_updatable`.
    pub fn read_only(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Add a foreign-key target: `(table, column)` in the referenced table.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.references.push((table.into(), column.into()));
        self
    }

    pub fn numeric(mut self, precision: i32, scale: i32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Postgres type oid, populated when reflecting live metadata.
    pub fn type_code(mut self, code: u32) -> Self {
        self.type_code = Some(code);
        self
    }
}

/// A named, typed field of a table. Immutable once registered: name and
/// owning table are set exactly once, by the builder that registers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    table_name: String,
    spec: ColumnSpec,
}

impl Column {
    /// Build a standalone column from live database metadata, outside any
    /// declared [`Table`]. Used by schema reflection.
    pub fn reflected(table_name: impl Into<String>, name: impl Into<String>, spec: ColumnSpec) -> Self {
        Self { name: name.into(), table_name: table_name.into(), spec }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn table_name(&self) -> &str { &self.table_name }

    pub fn data_type(&self) -> &str { &self.spec.data_type }

    pub fn is_nullable(&self) -> bool { self.spec.nullable }

    pub fn is_unique(&self) -> bool { self.spec.unique }

    pub fn is_primary_key(&self) -> bool { self.spec.primary_key }

    pub fn is_updatable(&self) -> bool { self.spec.updatable }

    pub fn references(&self) -> &[(String, String)] { &self.spec.references }

    pub fn precision(&self) -> Option<i32> { self.spec.precision }

    pub fn scale(&self) -> Option<i32> { self.spec.scale }

    pub fn type_code(&self) -> Option<u32> { self.spec.type_code }

    // Filter constructors, so condition trees bind to declared columns.

    pub fn equal(&self, value: impl Into<Value>) -> Condition { Condition::equal(&self.name, value) }

    pub fn not_equal(&self, value: impl Into<Value>) -> Condition { Condition::not_equal(&self.name, value) }

    pub fn greater(&self, value: impl Into<Value>) -> Condition { Condition::greater(&self.name, value) }

    pub fn greater_or_equal(&self, value: impl Into<Value>) -> Condition { Condition::greater_or_equal(&self.name, value) }

    pub fn less(&self, value: impl Into<Value>) -> Condition { Condition::less(&self.name, value) }

    pub fn less_or_equal(&self, value: impl Into<Value>) -> Condition { Condition::less_or_equal(&self.name, value) }

    fn clause(&self) -> ColumnClause {
        // Group reference targets per referenced table, preserving order.
        let mut references: Vec<(String, Vec<String>)> = Vec::new();
        for (ref_table, ref_column) in &self.spec.references {
            match references.iter_mut().find(|(table, _)| table == ref_table) {
                Some((_, columns)) => columns.push(ref_column.clone()),
                None => references.push((ref_table.clone(), vec![ref_column.clone()])),
            }
        }
        ColumnClause {
            name: self.name.clone(),
            sql_type: self.spec.data_type.clone(),
            unique: self.spec.unique,
            not_null: !self.spec.nullable,
            references,
        }
    }
}

/// An ordered, name-keyed collection of columns. Constructed once through
/// [`Table::builder`] and read-only thereafter.
///
/// Column declaration order drives table creation, but result-row mapping is
/// keyed off column names from the query's result metadata - the live schema
/// is free to order columns differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    ordinals: HashMap<String, usize>,
}

impl Table {
    pub fn builder(name: impl Into<String>) -> TableBuilder { TableBuilder { name: name.into(), columns: Vec::new() } }

    pub fn name(&self) -> &str { &self.name }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] { &self.columns }

    pub fn column(&self, name: &str) -> Option<&Column> { self.ordinals.get(name).map(|&index| &self.columns[index]) }

    /// Declaration ordinal of a column. Not meaningful for result-row
    /// mapping, which is name-keyed.
    pub fn position(&self, name: &str) -> Option<usize> { self.ordinals.get(name).copied() }

    pub fn create_statement(&self) -> String {
        let clauses: Vec<ColumnClause> = self.columns.iter().map(Column::clause).collect();
        statement::create_table(&self.name, &clauses)
    }

    pub fn drop_statement(&self) -> String { statement::drop_table(&self.name) }
}

/// Declarative, ordered column registration. Validation happens in
/// [`TableBuilder::build`]: an empty table name, an empty column name, or a
/// duplicate column name is a configuration error.
pub struct TableBuilder {
    name: String,
    columns: Vec<(String, ColumnSpec)>,
}

impl TableBuilder {
    pub fn column(mut self, name: impl Into<String>, spec: ColumnSpec) -> Self {
        self.columns.push((name.into(), spec));
        self
    }

    pub fn build(self) -> Result<Table, SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingTableName);
        }
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut ordinals = HashMap::with_capacity(self.columns.len());
        for (name, spec) in self.columns {
            if name.is_empty() {
                return Err(SchemaError::MissingColumnName);
            }
            if ordinals.contains_key(&name) {
                return Err(SchemaError::DuplicateColumn(name));
            }
            ordinals.insert(name.clone(), columns.len());
            columns.push(Column { name, table_name: self.name.clone(), spec });
        }
        Ok(Table { name: self.name, columns, ordinals })
    }
}
