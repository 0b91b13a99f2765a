use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::QueryError;

/// A bound value, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Int(i64),
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<Uuid> for SqlParam {
    fn from(v: Uuid) -> Self {
        SqlParam::Uuid(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Row lock taken by a `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    ForUpdate,
    /// Rows locked by another transaction are left out instead of waited on
    ForUpdateSkipLocked,
}

impl RowLock {
    pub fn to_sql(&self) -> &'static str {
        match self {
            RowLock::ForUpdate => "FOR UPDATE",
            RowLock::ForUpdateSkipLocked => "FOR UPDATE SKIP LOCKED",
        }
    }
}

/// Rendered statement plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Collects parameters while a statement is rendered and hands out `$n`
/// placeholders. Nested selects share the sink so numbering stays global.
#[derive(Debug, Default)]
pub struct ParamSink {
    params: Vec<SqlParam>,
}

impl ParamSink {
    pub fn push(&mut self, value: SqlParam) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub fn into_params(self) -> Vec<SqlParam> {
        self.params
    }
}

pub(crate) fn quote_table(name: &str) -> Result<String, QueryError> {
    if !is_identifier(name) {
        return Err(QueryError::InvalidTableName(name.to_string()));
    }
    Ok(format!("\"{}\"", name))
}

/// Quote `column` or `table.column`.
pub(crate) fn quote_column(name: &str) -> Result<String, QueryError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 || !parts.iter().all(|p| is_identifier(p)) {
        return Err(QueryError::InvalidColumn(name.to_string()));
    }
    Ok(parts.iter().map(|p| format!("\"{}\"", p)).collect::<Vec<_>>().join("."))
}

pub(crate) fn quote_columns(columns: &[String]) -> Result<String, QueryError> {
    let quoted = columns
        .iter()
        .map(|c| quote_column(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(", "))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_qualified_columns() {
        assert_eq!(quote_column("pvz.id").unwrap(), "\"pvz\".\"id\"");
        assert_eq!(quote_column("date_time").unwrap(), "\"date_time\"");
    }

    #[test]
    fn rejects_injection_in_identifiers() {
        assert!(quote_column("id; DROP TABLE users").is_err());
        assert!(quote_column("a.b.c").is_err());
        assert!(quote_column("1abc").is_err());
        assert!(quote_table("pvz\"").is_err());
        assert!(quote_table("").is_err());
    }

    #[test]
    fn sink_numbers_placeholders_in_order() {
        let mut sink = ParamSink::default();
        assert_eq!(sink.push("a".into()), "$1");
        assert_eq!(sink.push(2i64.into()), "$2");
        assert_eq!(sink.into_params().len(), 2);
    }
}
