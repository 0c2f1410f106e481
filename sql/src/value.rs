use serde::{Deserialize, Serialize};

/// A typed SQL literal. Arrays nest arbitrarily, matching Postgres
/// array-literal syntax (`'{a,b,c}'`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Render this value as SQL literal text.
    ///
    /// Text is single-quoted, array elements double-quoted, booleans and
    /// numbers unquoted. Embedded quote characters are passed through
    /// verbatim: escaping them would change SQL semantics callers already
    /// rely on, so it is a documented caller obligation instead. The same
    /// goes for non-finite floats: `NaN`/`inf` render verbatim, which is not
    /// a valid unquoted literal (Postgres wants `'NaN'::float8`) - callers
    /// must keep non-finite values out of encoded statements.
    ///
    /// The statement builder never encodes a top-level `Null` - null entries
    /// are dropped from INSERT/UPDATE lists entirely. Inside an array a
    /// `Null` element renders as the array-null token `NULL`.
    pub fn encode(&self) -> String { self.encode_nested(false) }

    fn encode_nested(&self, inside_array: bool) -> String {
        match self {
            Value::Null => "NULL".to_owned(),
            Value::Boolean(true) => "true".to_owned(),
            Value::Boolean(false) => "false".to_owned(),
            Value::Integer(int) => int.to_string(),
            Value::Float(float) => float.to_string(),
            Value::Text(text) => {
                if inside_array {
                    format!(r#""{}""#, text)
                } else {
                    format!("'{}'", text)
                }
            }
            Value::Array(items) => {
                let body = items.iter().map(|item| item.encode_nested(true)).collect::<Vec<_>>().join(",");
                if inside_array {
                    format!("{{{}}}", body)
                } else {
                    format!("'{{{}}}'", body)
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Boolean(v) }
}
impl From<i16> for Value {
    fn from(v: i16) -> Self { Value::Integer(v as i64) }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Integer(v as i64) }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Integer(v) }
}
impl From<f32> for Value {
    fn from(v: f32) -> Self { Value::Float(v as f64) }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_owned()) }
}
impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::Array(v.into_iter().map(Into::into).collect()) }
}
