use super::error::QueryError;
use super::predicate::{render_where, Condition, Filterable};
use super::types::{quote_column, quote_columns, quote_table, ParamSink, SqlParam, SqlQuery};

fn returning_clause(columns: &[String]) -> Result<String, QueryError> {
    if columns.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(" RETURNING {}", quote_columns(columns)?))
}

#[derive(Debug, Clone)]
pub struct Insert {
    table_name: String,
    values: Vec<(String, SqlParam)>,
    returning: Vec<String>,
}

impl Insert {
    pub fn into(table_name: impl Into<String>) -> Self {
        Self { table_name: table_name.into(), values: vec![], returning: vec![] }
    }

    pub fn value(mut self, column: &str, value: impl Into<SqlParam>) -> Self {
        self.values.push((column.to_string(), value.into()));
        self
    }

    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn to_sql(&self) -> Result<SqlQuery, QueryError> {
        if self.values.is_empty() {
            return Err(QueryError::EmptyStatement(format!("INSERT INTO {}", self.table_name)));
        }
        let mut sink = ParamSink::default();
        let mut columns = Vec::with_capacity(self.values.len());
        let mut placeholders = Vec::with_capacity(self.values.len());
        for (column, value) in &self.values {
            columns.push(quote_column(column)?);
            placeholders.push(sink.push(value.clone()));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}){}",
            quote_table(&self.table_name)?,
            columns.join(", "),
            placeholders.join(", "),
            returning_clause(&self.returning)?
        );
        Ok(SqlQuery { sql, params: sink.into_params() })
    }
}

#[derive(Debug, Clone)]
pub struct Update {
    table_name: String,
    assignments: Vec<(String, SqlParam)>,
    conditions: Vec<Condition>,
    returning: Vec<String>,
}

impl Update {
    pub fn table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            assignments: vec![],
            conditions: vec![],
            returning: vec![],
        }
    }

    pub fn set(mut self, column: &str, value: impl Into<SqlParam>) -> Self {
        self.assignments.push((column.to_string(), value.into()));
        self
    }

    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn to_sql(&self) -> Result<SqlQuery, QueryError> {
        if self.assignments.is_empty() {
            return Err(QueryError::EmptyStatement(format!("UPDATE {}", self.table_name)));
        }
        let mut sink = ParamSink::default();
        let assignments = self
            .assignments
            .iter()
            .map(|(column, value)| Ok(format!("{} = {}", quote_column(column)?, sink.push(value.clone()))))
            .collect::<Result<Vec<_>, QueryError>>()?;
        let where_clause = render_where(&self.conditions, &mut sink)?;

        let mut sql = format!("UPDATE {} SET {}", quote_table(&self.table_name)?, assignments.join(", "));
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        sql.push_str(&returning_clause(&self.returning)?);
        Ok(SqlQuery { sql, params: sink.into_params() })
    }
}

impl Filterable for Update {
    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}

#[derive(Debug, Clone)]
pub struct Delete {
    table_name: String,
    conditions: Vec<Condition>,
    returning: Vec<String>,
}

impl Delete {
    pub fn from(table_name: impl Into<String>) -> Self {
        Self { table_name: table_name.into(), conditions: vec![], returning: vec![] }
    }

    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn to_sql(&self) -> Result<SqlQuery, QueryError> {
        // An unconditional DELETE is never what a caller means here
        if self.conditions.is_empty() {
            return Err(QueryError::EmptyStatement(format!("DELETE FROM {}", self.table_name)));
        }
        let mut sink = ParamSink::default();
        let where_clause = render_where(&self.conditions, &mut sink)?;
        let sql = format!(
            "DELETE FROM {} {}{}",
            quote_table(&self.table_name)?,
            where_clause,
            returning_clause(&self.returning)?
        );
        Ok(SqlQuery { sql, params: sink.into_params() })
    }
}

impl Filterable for Delete {
    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}
