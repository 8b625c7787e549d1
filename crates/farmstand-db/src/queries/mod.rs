//! One function per statement, as methods on [`Session`](crate::Session).

mod favorites;
mod photos;
mod posts;
mod users;

/// Join caller-supplied terms into one regex alternation. Terms are bound as
/// a parameter but not escaped, so regex metacharacters keep their meaning.
/// No terms gives the empty pattern, which matches everything.
pub fn alternation<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|")
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> anyhow::Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> anyhow::Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
