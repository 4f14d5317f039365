use transit::database::DatabaseError;

pub mod line;
pub mod station;

/// Extended result code of a foreign key violation raised through a trigger,
/// as sqlite does for `ON DELETE RESTRICT`.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

fn is_foreign_key_violation(why: &dyn sqlx::error::DatabaseError) -> bool {
    why.is_foreign_key_violation()
        || (why.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
            && why.message().contains("FOREIGN KEY"))
}

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        sqlx::Error::Database(ref inner) if is_foreign_key_violation(inner.as_ref()) => {
            DatabaseError::ForeignKeyViolation
        }
        _ => DatabaseError::Other(Box::new(why)),
    }
}

/// `LIKE` pattern matching `text` anywhere, with `\` as escape character.
pub(crate) fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(contains_pattern("ate"), "%ate%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
