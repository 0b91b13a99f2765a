//! Binds rendered `query` statements onto sqlx queries.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::query::{SqlParam, SqlQuery};

pub fn query_as<O>(statement: &SqlQuery) -> QueryAs<'_, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    let mut q = sqlx::query_as::<_, O>(&statement.sql);
    for p in statement.params.iter() {
        q = match p {
            SqlParam::Text(s) => q.bind(s.as_str()),
            SqlParam::Uuid(u) => q.bind(*u),
            SqlParam::Timestamp(t) => q.bind(*t),
            SqlParam::Int(i) => q.bind(*i),
        };
    }
    q
}
