use super::error::QueryError;
use super::predicate::{render_where, Condition, Filterable};
use super::types::{quote_column, quote_columns, quote_table, ParamSink, RowLock, SortDirection, SqlQuery};

#[derive(Debug, Clone)]
pub struct Select {
    table_name: String,
    columns: Vec<String>,
    distinct: bool,
    conditions: Vec<Condition>,
    order: Vec<(String, SortDirection)>,
    limit: Option<i64>,
    offset: Option<i64>,
    lock: Option<RowLock>,
}

impl Select {
    pub fn from(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: vec![],
            distinct: false,
            conditions: vec![],
            order: vec![],
            limit: None,
            offset: None,
            lock: None,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn order_by(mut self, column: &str, sort: SortDirection) -> Self {
        self.order.push((column.to_string(), sort));
        self
    }

    /// Negative values are clamped to zero.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset.max(0));
        self
    }

    pub fn lock(mut self, lock: RowLock) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn to_sql(&self) -> Result<SqlQuery, QueryError> {
        let mut sink = ParamSink::default();
        let sql = self.render(&mut sink)?;
        Ok(SqlQuery { sql, params: sink.into_params() })
    }

    pub(crate) fn render(&self, sink: &mut ParamSink) -> Result<String, QueryError> {
        let select_clause = if self.columns.is_empty() {
            "*".to_string()
        } else {
            quote_columns(&self.columns)?
        };
        let select_clause = if self.distinct {
            format!("SELECT DISTINCT {}", select_clause)
        } else {
            format!("SELECT {}", select_clause)
        };

        let where_clause = render_where(&self.conditions, sink)?;
        let order_clause = self.build_order_clause()?;
        let limit_clause = self.build_limit_clause();

        Ok([
            select_clause,
            format!("FROM {}", quote_table(&self.table_name)?),
            where_clause,
            order_clause,
            limit_clause,
            self.lock.map(|l| l.to_sql().to_string()).unwrap_or_default(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
    }

    fn build_order_clause(&self) -> Result<String, QueryError> {
        if self.order.is_empty() {
            return Ok(String::new());
        }
        let parts = self
            .order
            .iter()
            .map(|(column, sort)| Ok(format!("{} {}", quote_column(column)?, sort.to_sql())))
            .collect::<Result<Vec<_>, QueryError>>()?;
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            (None, Some(o)) => format!("OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}

impl Filterable for Select {
    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}
