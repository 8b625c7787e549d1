//! Case-insensitive `REGEXP` for SQLite.
//!
//! SQLite parses `X REGEXP Y` but ships no implementation; it calls the
//! user function `regexp(Y, X)`, so `Y` is the pattern and `X` the subject.
//! Registering it here gives queries the same meaning as PostgreSQL's
//! `X ~* Y`.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Error};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        regexp,
    )
}

/// NULL on either side yields NULL, which filters the row out.
fn regexp(ctx: &Context<'_>) -> rusqlite::Result<Option<bool>> {
    if matches!(ctx.get_raw(0), ValueRef::Null) || matches!(ctx.get_raw(1), ValueRef::Null) {
        return Ok(None);
    }

    // Compiled once per statement when the pattern is a bound parameter
    let pattern: Arc<Regex> = ctx.get_or_create_aux(0, |vr| -> Result<_, BoxError> {
        Ok(RegexBuilder::new(vr.as_str()?)
            .case_insensitive(true)
            .build()?)
    })?;

    let subject = ctx
        .get_raw(1)
        .as_str()
        .map_err(|e| Error::UserFunctionError(e.into()))?;

    Ok(Some(pattern.is_match(subject)))
}
