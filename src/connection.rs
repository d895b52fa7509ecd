//! In-memory DuckDB connection used as the group-by engine.
//!
//! Price records are bulk-loaded through DuckDB's appender into plain tables,
//! then queried with parameterized SQL. Results come back either as loosely
//! typed `serde_json::Value` rows or deserialized into typed row structs.

use crate::error::Result;
use crate::models::PriceRecord;
use duckdb::{params, types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

/// Wraps an in-memory DuckDB connection.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open an empty in-memory database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create (or replace) a table shaped like [`PriceRecord`].
    ///
    /// `seq` holds the input position of each record so that callers can
    /// recover insertion order.
    pub fn create_price_table(&self, table_name: &str) -> Result<()> {
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} (\
               seq BIGINT NOT NULL, \
               date VARCHAR NOT NULL, \
               year INTEGER NOT NULL, \
               month INTEGER NOT NULL, \
               day INTEGER NOT NULL, \
               open DOUBLE NOT NULL, \
               high DOUBLE NOT NULL, \
               low DOUBLE NOT NULL, \
               close DOUBLE NOT NULL)",
            table_name, table_name
        ))?;
        Ok(())
    }

    /// Append records to a table created by [`create_price_table`](Self::create_price_table).
    pub fn append_records(&self, table_name: &str, records: &[PriceRecord]) -> Result<()> {
        let mut appender = self.conn.appender(table_name)?;
        for (seq, r) in records.iter().enumerate() {
            appender.append_row(params![
                seq as i64,
                r.date.to_string(),
                r.year,
                r.month as i32,
                r.day as i32,
                r.open,
                r.high,
                r.low,
                r.close
            ])?;
        }
        appender.flush()?;
        debug!(table = table_name, rows = records.len(), "appended price records");
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let column_names: Vec<String> = match rows.as_ref() {
            Some(stmt) => stmt.column_names().into_iter().map(|s| s.to_string()).collect(),
            None => Vec::new(),
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // Dates, intervals, lists etc. never appear in the price tables.
        _ => serde_json::Value::Null,
    }
}
