//! Decoding of driver result rows into [`Row`]s.
//!
//! Mapping is keyed off the result metadata's column names, never off the
//! table's declaration order - the live schema may order columns
//! differently than the descriptor does.

use crate::error::ConnectorError;
use pgquill_core::{Row, Table};
use pgquill_sql::Value;
use std::collections::HashMap;
use tokio_postgres::types::Type;

/// Convert one fetched row into a [`Row`] for the given table descriptor.
pub fn row_from_result(table: &Table, fetched: &tokio_postgres::Row) -> Result<Row, ConnectorError> {
    let mut ordinals = HashMap::with_capacity(fetched.columns().len());
    for (index, column) in fetched.columns().iter().enumerate() {
        ordinals.insert(column.name().to_owned(), index);
    }

    let mut tuple = Vec::with_capacity(fetched.len());
    for index in 0..fetched.len() {
        tuple.push(cell_value(fetched, index)?);
    }

    Ok(Row::from_positional(table, &ordinals, &tuple))
}

/// Extract a single cell as a [`Value`], by the column's Postgres type.
/// An unhandled type is an error, not a silent null.
fn cell_value(fetched: &tokio_postgres::Row, index: usize) -> Result<Value, ConnectorError> {
    let ty = fetched.columns()[index].type_().clone();

    let value = if ty == Type::BOOL {
        fetched.try_get::<_, Option<bool>>(index)?.map(Value::Boolean)
    } else if ty == Type::INT2 {
        fetched.try_get::<_, Option<i16>>(index)?.map(|v| Value::Integer(v as i64))
    } else if ty == Type::INT4 {
        fetched.try_get::<_, Option<i32>>(index)?.map(|v| Value::Integer(v as i64))
    } else if ty == Type::INT8 {
        fetched.try_get::<_, Option<i64>>(index)?.map(Value::Integer)
    } else if ty == Type::FLOAT4 {
        fetched.try_get::<_, Option<f32>>(index)?.map(|v| Value::Float(v as f64))
    } else if ty == Type::FLOAT8 {
        fetched.try_get::<_, Option<f64>>(index)?.map(Value::Float)
    } else if ty == Type::TEXT || ty == Type::VARCHAR || ty == Type::BPCHAR || ty == Type::NAME {
        fetched.try_get::<_, Option<String>>(index)?.map(Value::Text)
    } else if ty == Type::BOOL_ARRAY {
        fetched.try_get::<_, Option<Vec<bool>>>(index)?.map(Value::from)
    } else if ty == Type::INT2_ARRAY {
        fetched.try_get::<_, Option<Vec<i16>>>(index)?.map(Value::from)
    } else if ty == Type::INT4_ARRAY {
        fetched.try_get::<_, Option<Vec<i32>>>(index)?.map(Value::from)
    } else if ty == Type::INT8_ARRAY {
        fetched.try_get::<_, Option<Vec<i64>>>(index)?.map(Value::from)
    } else if ty == Type::FLOAT4_ARRAY {
        fetched.try_get::<_, Option<Vec<f32>>>(index)?.map(Value::from)
    } else if ty == Type::FLOAT8_ARRAY {
        fetched.try_get::<_, Option<Vec<f64>>>(index)?.map(Value::from)
    } else if ty == Type::TEXT_ARRAY || ty == Type::VARCHAR_ARRAY {
        fetched.try_get::<_, Option<Vec<String>>>(index)?.map(Value::from)
    } else {
        return Err(ConnectorError::UnsupportedType(ty));
    };

    Ok(value.unwrap_or(Value::Null))
}
