// Statement guard
// Every statement the service prepares goes through here first. The dataset
// is opened read-only anyway; this catches a bad statement before SQLite
// sees it and gives a clearer error than a read-only violation.

use crate::error::{CatalogError, CatalogResult};
use sqlparser::ast::Statement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

/// Check that `sql` is exactly one SELECT statement
pub fn ensure_select(sql: &str) -> CatalogResult<()> {
    let dialect = SQLiteDialect {};
    let ast = Parser::parse_sql(&dialect, sql)
        .map_err(|e| CatalogError::Rejected(format!("SQL parsing error: {}", e)))?;

    if ast.len() != 1 {
        return Err(CatalogError::Rejected(format!(
            "expected a single statement, got {}",
            ast.len()
        )));
    }

    match &ast[0] {
        Statement::Query(_) => Ok(()),
        other => Err(CatalogError::Rejected(format!(
            "only SELECT is allowed, got: {}",
            other
        ))),
    }
}
