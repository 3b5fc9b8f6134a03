pub mod artists;
pub mod shows;
pub mod timeline;
pub mod venues;

use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, FromQueryResult,
};
use serde::Serialize;

/// Minimal `(id, name)` projection returned by searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<NamedRef>,
}

impl From<Vec<NamedRef>> for SearchResults {
    fn from(data: Vec<NamedRef>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Case-insensitive substring match; LIKE wildcards in `term` match literally.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}
