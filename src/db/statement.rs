//! SQL statement representation shared by the builders and the driver.
//!
//! A [`Statement`] carries the query text with `$n` placeholders plus the
//! ordered parameters to bind. Values are never interpolated into the text on
//! the execution path; [`Statement::literal`] exists for compatibility tests
//! and diagnostics only.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;

/// A single bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Legacy literal rendering: integers bare, strings single-quoted with
    /// `''` escaping, timestamps RFC3339 seconds-precision UTC.
    fn to_literal(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Timestamp(ts) => {
                format!("'{}'", ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

/// A complete, executable SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Bindable sqlx query over this statement, parameters in order.
    pub fn to_query(&self) -> Query<'_, sqlx::Postgres, PgArguments> {
        let mut query = sqlx::query(&self.sql);
        for param in &self.params {
            query = match param {
                Value::Int(v) => query.bind(*v),
                Value::Text(s) => query.bind(s.as_str()),
                Value::Timestamp(ts) => query.bind(*ts),
            };
        }
        query
    }

    /// Renders the statement with parameters inlined as quoted literals, in
    /// the exact shape the pre-parameterized habit tracker generated.
    pub fn literal(&self) -> String {
        let mut out = String::with_capacity(self.sql.len());
        let mut chars = self.sql.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            let mut digits = String::new();
            while let Some(d) = chars.peek() {
                if d.is_ascii_digit() {
                    digits.push(*d);
                    chars.next();
                } else {
                    break;
                }
            }
            // One-based placeholder index into the parameter list.
            let resolved = digits
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| self.params.get(i));
            match resolved {
                Some(param) => out.push_str(&param.to_literal()),
                None => {
                    out.push('$');
                    out.push_str(&digits);
                }
            }
        }
        out
    }
}
