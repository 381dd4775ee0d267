use std::sync::LazyLock;

use regex::Regex;

use crate::error::DataAccessError;

static IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("valid ident regex")
});

static ORDER_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?(\s+(?i:asc|desc))?$")
        .expect("valid order-by regex")
});

const OPERATORS: [&str; 9] = ["=", "!=", "<>", "<", ">", "<=", ">=", "LIKE", "NOT LIKE"];

/// Accept a table or column name that is safe to splice into SQL text.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for anything but a plain (optionally
/// schema-qualified) identifier.
pub fn identifier(name: &str) -> Result<&str, DataAccessError> {
    if IDENT.is_match(name) {
        Ok(name)
    } else {
        Err(DataAccessError::InvalidIdentifier(format!("{name:?}")))
    }
}

/// Accept an ORDER BY list such as `id` or `name DESC, id`.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` if any item is not `ident [ASC|DESC]`.
pub fn order_by(list: &str) -> Result<&str, DataAccessError> {
    let valid = !list.trim().is_empty() && list.split(',').all(|item| ORDER_ITEM.is_match(item.trim()));
    if valid {
        Ok(list.trim())
    } else {
        Err(DataAccessError::InvalidIdentifier(format!("ORDER BY {list:?}")))
    }
}

/// Normalize a comparison operator; `like` and `not   like` become `LIKE` / `NOT LIKE`.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for operators outside the supported set.
pub fn operator(op: &str) -> Result<&'static str, DataAccessError> {
    let normalized = op.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    OPERATORS
        .iter()
        .find(|known| **known == normalized)
        .copied()
        .ok_or_else(|| DataAccessError::InvalidIdentifier(format!("operator {op:?}")))
}

/// Placeholder name for a column; qualifiers are folded into the name.
pub(crate) fn param_name(column: &str) -> String {
    column.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_qualified_identifiers() {
        assert!(identifier("users").is_ok());
        assert!(identifier("app.users").is_ok());
        assert!(identifier("_tmp1").is_ok());
    }

    #[test]
    fn rejects_injection_shaped_identifiers() {
        for bad in ["users; DROP TABLE x", "1abc", "a b", "", "a.b.c", "t`"] {
            assert!(
                matches!(identifier(bad), Err(DataAccessError::InvalidIdentifier(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn order_by_accepts_directions_and_lists() {
        assert_eq!(order_by("id").unwrap(), "id");
        assert_eq!(order_by("name desc, id ASC").unwrap(), "name desc, id ASC");
        assert!(order_by("id; delete from t").is_err());
        assert!(order_by("").is_err());
    }

    #[test]
    fn operators_are_normalized() {
        assert_eq!(operator("like").unwrap(), "LIKE");
        assert_eq!(operator(" not   like ").unwrap(), "NOT LIKE");
        assert_eq!(operator(">=").unwrap(), ">=");
        assert!(operator("= 1 OR 1").is_err());
    }
}
