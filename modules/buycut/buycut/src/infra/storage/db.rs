//! Connection helpers and `DbErr` translation.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::domain::error::DomainError;

/// Translate a database error for `resource` into a domain error.
///
/// Unique violations become `Duplicate`, foreign-key violations become a
/// missing company, anything else is logged and reported as `Database`.
pub fn db_err(resource: &'static str, err: &DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::duplicate(resource),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::not_found("company", "referenced company")
        }
        _ => {
            error!(error = %err, resource, "Database operation failed");
            DomainError::database(err.to_string())
        }
    }
}

/// Like [`db_err`] for operations that cannot hit a constraint.
pub fn query_err(err: &DbErr) -> DomainError {
    error!(error = %err, "Database query failed");
    DomainError::database(err.to_string())
}

/// Escape character for `LIKE` patterns built by [`name_like`].
const LIKE_ESCAPE: char = '!';

/// `%keyword%` with `%`, `_` and the escape character taken literally.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match of `column` against `keyword`.
///
/// Both sides are lowered by the database so they fold the same way.
pub fn name_like(column: SimpleExpr, keyword: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{LIKE_ESCAPE}'"),
        [column, Expr::val(like_pattern(keyword)).into()],
    )
}

/// Case-insensitive exact match of `column` against `keyword`.
pub fn name_eq(column: SimpleExpr, keyword: &str) -> SimpleExpr {
    Expr::expr(Func::lower(column)).eq(Func::lower(Expr::val(keyword)))
}
