//! Substring search over `customers.customer_name`.
//!
//! # Invariants
//! - Matching ignores case for all of Unicode: both sides go through
//!   `fold_case` before `LIKE`.
//! - The query is matched as typed; surrounding spaces are significant.
//! - `%`, `_` and `\` in user text match literally.
//! - Blank queries return no rows without touching storage.
//! - Results are ordered like the customer list.

use crate::db::FOLD_CASE_FN;
use crate::model::customer::Customer;
use crate::repo::customer_repo::{customer_from_row, CUSTOMER_SELECT_SQL};
use crate::repo::RepoResult;
use rusqlite::Connection;

const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `text` anywhere in a value.
///
/// Returns `None` when `text` is blank.
pub fn like_pattern(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

/// Searches customers by name substring.
pub fn search_by_name(conn: &Connection, text: &str) -> RepoResult<Vec<Customer>> {
    let Some(pattern) = like_pattern(text) else {
        return Ok(Vec::new());
    };

    let mut stmt = conn.prepare(&format!(
        "{CUSTOMER_SELECT_SQL}
         WHERE {FOLD_CASE_FN}(customer_name) LIKE {FOLD_CASE_FN}(?1) ESCAPE '\\'
         ORDER BY customer_name COLLATE NOCASE ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([pattern.as_str()])?;
    let mut customers = Vec::new();
    while let Some(row) = rows.next()? {
        customers.push(customer_from_row(row)?);
    }
    Ok(customers)
}
