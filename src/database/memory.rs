//! In-memory backend with the same row semantics as the hosted service.
//!
//! Keeps rows as JSON values keyed by table name and honors the same
//! ordering, upsert and filter behavior. Backs the test suite and
//! offline development; never used when a real backend is configured.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use super::entity::{self, SortKey};
use super::error::GatewayError;

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    admin: Mutex<Option<(String, String)>>,
    fail_next: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the only credential pair `sign_in` will accept.
    pub fn set_admin(&self, email: &str, password: &str) {
        *self.admin.lock() = Some((email.to_string(), password.to_string()));
    }

    pub fn check_credentials(&self, email: &str, password: &str) -> bool {
        matches!(&*self.admin.lock(), Some((e, p)) if e == email && p == password)
    }

    /// Make the next operation fail with a backend error, so failure
    /// paths can be exercised without a network.
    #[allow(dead_code)]
    pub fn fail_next(&self) {
        *self.fail_next.lock() = true;
    }

    fn take_failure(&self) -> Result<(), GatewayError> {
        let mut flag = self.fail_next.lock();
        if *flag {
            *flag = false;
            return Err(GatewayError::Backend {
                status: 503,
                body: "induced failure".to_string(),
            });
        }
        Ok(())
    }

    pub fn select(
        &self,
        table: &str,
        order: Option<SortKey>,
        filters: &[(&str, String)],
    ) -> Result<Vec<Value>, GatewayError> {
        self.take_failure()?;
        let tables = self.tables.lock();
        let mut rows: Vec<Value> = tables.get(table).cloned().unwrap_or_default();
        rows.retain(|row| filters.iter().all(|(column, expr)| matches(row, column, expr)));
        if let Some(key) = order {
            entity::sort_value_rows(&mut rows, key);
        }
        Ok(rows)
    }

    /// Insert-or-replace rows by the given key field.
    pub fn upsert(
        &self,
        table: &str,
        key_field: &str,
        rows: Vec<Value>,
    ) -> Result<(), GatewayError> {
        self.take_failure()?;
        let mut tables = self.tables.lock();
        let stored = tables.entry(table.to_string()).or_default();
        for row in rows {
            let key = row.get(key_field).cloned();
            match stored.iter_mut().find(|r| r.get(key_field) == key.as_ref()) {
                Some(slot) => *slot = row,
                None => stored.push(row),
            }
        }
        Ok(())
    }

    pub fn delete_matching(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<(), GatewayError> {
        self.take_failure()?;
        let mut tables = self.tables.lock();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| row.get(column).and_then(Value::as_str) != Some(value));
        }
        Ok(())
    }

    /// Pretend object storage: a stable pseudo-URL for the path.
    pub fn store_object(&self, path: &str) -> String {
        format!("memory://media/{path}")
    }
}

/// PostgREST-style filter match. Only the `eq.` operator is needed.
fn matches(row: &Value, column: &str, expr: &str) -> bool {
    let Some(raw) = expr.strip_prefix("eq.") else {
        return true;
    };
    match row.get(column) {
        Some(Value::Bool(b)) => raw.parse::<bool>().map(|v| v == *b).unwrap_or(false),
        Some(Value::Number(n)) => raw
            .parse::<f64>()
            .ok()
            .zip(n.as_f64())
            .map(|(a, b)| a == b)
            .unwrap_or(false),
        Some(Value::String(s)) => s == raw,
        _ => false,
    }
}
