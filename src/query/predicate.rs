use super::error::QueryError;
use super::select::Select;
use super::types::{quote_column, ParamSink, SqlParam};

/// A single `WHERE` term. Terms are always joined with `AND`.
#[derive(Debug, Clone)]
pub enum Condition {
    Eq(String, SqlParam),
    Gte(String, SqlParam),
    Lte(String, SqlParam),
    InSelect(String, Box<Select>),
}

impl Condition {
    fn render(&self, sink: &mut ParamSink) -> Result<String, QueryError> {
        match self {
            Condition::Eq(column, value) => {
                Ok(format!("{} = {}", quote_column(column)?, sink.push(value.clone())))
            }
            Condition::Gte(column, value) => {
                Ok(format!("{} >= {}", quote_column(column)?, sink.push(value.clone())))
            }
            Condition::Lte(column, value) => {
                Ok(format!("{} <= {}", quote_column(column)?, sink.push(value.clone())))
            }
            Condition::InSelect(column, select) => {
                let column = quote_column(column)?;
                Ok(format!("{} IN ({})", column, select.render(sink)?))
            }
        }
    }
}

/// Render `WHERE ...` or an empty string when there are no conditions.
pub(crate) fn render_where(conditions: &[Condition], sink: &mut ParamSink) -> Result<String, QueryError> {
    if conditions.is_empty() {
        return Ok(String::new());
    }
    let parts = conditions
        .iter()
        .map(|c| c.render(sink))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("WHERE {}", parts.join(" AND ")))
}

/// Shared `where_*` builder methods for statements that carry conditions.
pub trait Filterable: Sized {
    fn conditions_mut(&mut self) -> &mut Vec<Condition>;

    fn where_eq(mut self, column: &str, value: impl Into<SqlParam>) -> Self {
        self.conditions_mut().push(Condition::Eq(column.to_string(), value.into()));
        self
    }

    fn where_gte(mut self, column: &str, value: impl Into<SqlParam>) -> Self {
        self.conditions_mut().push(Condition::Gte(column.to_string(), value.into()));
        self
    }

    fn where_lte(mut self, column: &str, value: impl Into<SqlParam>) -> Self {
        self.conditions_mut().push(Condition::Lte(column.to_string(), value.into()));
        self
    }

    fn where_in_select(mut self, column: &str, select: Select) -> Self {
        self.conditions_mut().push(Condition::InSelect(column.to_string(), Box::new(select)));
        self
    }
}
