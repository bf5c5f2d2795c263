use sea_orm::{
    ColumnTrait, DbErr, SqlErr,
    sea_query::{Expr, Func, SimpleExpr},
};

pub trait ColumnExt: ColumnTrait {
    /// `LOWER(col) = <lower-cased value>`.
    fn eq_ignore_case(&self, value: &str) -> SimpleExpr {
        Expr::expr(Func::lower(Expr::col(*self))).eq(value.to_lowercase())
    }
}

impl<C: ColumnTrait> ColumnExt for C {}

/// Whether the database rejected a write because of a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
