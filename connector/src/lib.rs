//! Pooled Postgres connector for pgquill.
//!
//! Every operation acquires a pooled connection, executes exactly one
//! statement, and releases the connection on all exit paths. There is no
//! multi-statement transaction coordination, no retry, and no reconnection
//! logic here - those belong to the driver and pool layers.

pub mod decode;
pub mod error;

pub use error::ConnectorError;
pub use pgquill_core::{Column, ColumnSpec, Row, SchemaError, Table, TableBuilder};
pub use pgquill_sql::{Comparison, Condition, ConditionError, Connective, NotifyPayload, Value};

use bb8_postgres::{tokio_postgres::NoTls, PostgresConnectionManager};
use pgquill_sql::{notify, statement};
use tracing::debug;

const DEFAULT_SCHEMA: &str = "public";

/// A bounded pool of Postgres connections plus the default schema the
/// introspection probes run against.
pub struct Connector {
    pool: bb8::Pool<PostgresConnectionManager<NoTls>>,
    schema: String,
}

impl Connector {
    /// Wrap an existing pool.
    pub fn new(pool: bb8::Pool<PostgresConnectionManager<NoTls>>) -> Self { Self { pool, schema: DEFAULT_SCHEMA.to_owned() } }

    /// Connect with a libpq-style connection string, keeping between
    /// `min_connections` and `max_connections` live connections. Acquisition
    /// blocks when the pool is exhausted.
    pub async fn connect(dsn: &str, min_connections: u32, max_connections: u32) -> Result<Self, ConnectorError> {
        let manager = PostgresConnectionManager::new_from_stringlike(dsn, NoTls)?;
        let pool = bb8::Pool::builder().min_idle(Some(min_connections)).max_size(max_connections).build(manager).await?;
        Ok(Self::new(pool))
    }

    /// Override the default `public` schema used by the introspection probes.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub async fn create_table(&self, table: &Table) -> Result<(), ConnectorError> {
        let query = table.create_statement();
        debug!("Connector.create_table: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    pub async fn drop_table(&self, table: &str) -> Result<(), ConnectorError> {
        let query = statement::drop_table(table);
        debug!("Connector.drop_table: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, ConnectorError> {
        let query = statement::table_exists(table, &self.schema);
        debug!("Connector.table_exists: {query}");
        let client = self.pool.get().await?;
        let row = client.query_one(&query, &[]).await?;
        Ok(row.try_get(0)?)
    }

    pub async fn column_exists(&self, table: &str, column: &str) -> Result<bool, ConnectorError> {
        let query = statement::column_exists(table, column, &self.schema);
        debug!("Connector.column_exists: {query}");
        let client = self.pool.get().await?;
        let row = client.query_one(&query, &[]).await?;
        Ok(row.try_get(0)?)
    }

    pub async fn row_exists(&self, table: &str, filter: &Condition) -> Result<bool, ConnectorError> {
        let query = statement::row_exists(table, &filter.to_sql());
        debug!("Connector.row_exists: {query}");
        let client = self.pool.get().await?;
        let row = client.query_one(&query, &[]).await?;
        Ok(row.try_get(0)?)
    }

    /// Fetch rows matching `filter`, mapped into [`Row`]s keyed by the
    /// result metadata's column names.
    pub async fn fetch_rows(
        &self,
        table: &Table,
        filter: &Condition,
        order_by: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Row>, ConnectorError> {
        let where_text = filter.to_sql();
        let query = statement::select(table.name(), Some(&where_text), order_by, limit);
        debug!("Connector.fetch_rows: {query}");
        let client = self.pool.get().await?;
        let fetched = client.query(&query, &[]).await?;
        fetched.iter().map(|row| decode::row_from_result(table, row)).collect()
    }

    /// Insert one row. Columns whose value is `Null` are omitted from the
    /// statement entirely.
    pub async fn insert_row(&self, table: &Table, row: &Row) -> Result<(), ConnectorError> {
        let entries = row.to_column_values(table);
        let query = statement::insert(table.name(), &entries);
        debug!("Connector.insert_row: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    /// Update rows matching `filter`, returning the affected-row count.
    /// Null-valued columns are skipped; an empty filter is a caller error
    /// and is deliberately not guarded against.
    pub async fn update_rows(&self, table: &Table, row: &Row, filter: &Condition) -> Result<u64, ConnectorError> {
        let entries = row.to_column_values(table);
        let query = statement::update(table.name(), &entries, &filter.to_sql());
        debug!("Connector.update_rows: {query}");
        let client = self.pool.get().await?;
        Ok(client.execute(&query, &[]).await?)
    }

    /// Reflect the live column metadata of a table into [`Column`] records.
    pub async fn columns(&self, table: &str) -> Result<Vec<Column>, ConnectorError> {
        let query = statement::columns(table, &self.schema);
        debug!("Connector.columns: {query}");
        let client = self.pool.get().await?;
        let fetched = client.query(&query, &[]).await?;

        let mut columns = Vec::with_capacity(fetched.len());
        for row in fetched {
            let name: String = row.try_get("column_name")?;
            let data_type: String = row.try_get("data_type")?;
            let is_nullable: String = row.try_get("is_nullable")?;
            let is_updatable: String = row.try_get("is_updatable")?;
            let type_code: u32 = row.try_get("type_code")?;
            let mut spec = ColumnSpec::new(data_type).type_code(type_code);
            if is_nullable != "YES" {
                spec = spec.not_null();
            }
            if is_updatable != "YES" {
                spec = spec.read_only();
            }
            columns.push(Column::reflected(table, name, spec));
        }
        Ok(columns)
    }

    /// Resolve a type oid to its SQL type name.
    pub async fn type_name(&self, type_code: u32) -> Result<String, ConnectorError> {
        let query = statement::type_name(type_code);
        debug!("Connector.type_name: {query}");
        let client = self.pool.get().await?;
        let row = client.query_one(&query, &[]).await?;
        Ok(row.try_get(0)?)
    }

    // Trigger/notify management. Each call executes one statement; wiring a
    // trigger takes a create_notify_function call followed by create_trigger,
    // or the set_trigger convenience that does both.

    pub async fn create_notify_function(&self, function: &str, channel: &str, payload: NotifyPayload) -> Result<(), ConnectorError> {
        let query = notify::create_notify_function(function, channel, payload);
        debug!("Connector.create_notify_function: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    pub async fn drop_notify_function(&self, function: &str) -> Result<(), ConnectorError> {
        let query = notify::drop_function(function);
        debug!("Connector.drop_notify_function: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    pub async fn create_trigger(&self, trigger: &str, table: &str, function: &str) -> Result<(), ConnectorError> {
        let query = notify::create_trigger(trigger, table, function);
        debug!("Connector.create_trigger: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    pub async fn drop_trigger(&self, trigger: &str, table: &str) -> Result<(), ConnectorError> {
        let query = notify::drop_trigger(trigger, table);
        debug!("Connector.drop_trigger: {query}");
        let client = self.pool.get().await?;
        client.execute(&query, &[]).await?;
        Ok(())
    }

    /// Wire a notify trigger onto a table: create the trigger function, then
    /// the trigger itself. Two single-statement calls back to back; if the
    /// second fails the function is left behind for the caller to drop.
    pub async fn set_trigger(
        &self,
        trigger: &str,
        table: &str,
        function: &str,
        channel: &str,
        payload: NotifyPayload,
    ) -> Result<(), ConnectorError> {
        self.create_notify_function(function, channel, payload).await?;
        self.create_trigger(trigger, table, function).await?;
        Ok(())
    }
}
