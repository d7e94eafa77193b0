//! Category resolution for new transactions.

use uuid::Uuid;

use crate::transaction::{TransactionError, TransactionKind};

/// Minimal view of a user's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    /// Category id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Direction.
    pub kind: TransactionKind,
}

/// Picks the category a transaction is filed under.
///
/// Tries `by_id`, then a case-insensitive `by_name` match, then falls back to
/// the first category of `kind` in `categories` order. Only categories of the
/// matching kind are eligible.
///
/// # Errors
///
/// Returns `TransactionError::CategoryTypeMismatch` when `by_id` names a
/// category of the other kind, and `TransactionError::NoCategory` when the
/// user has no category of `kind` at all.
pub fn resolve_category<'a>(
    categories: &'a [CategoryRef],
    kind: TransactionKind,
    by_id: Option<Uuid>,
    by_name: Option<&str>,
) -> Result<&'a CategoryRef, TransactionError> {
    if let Some(id) = by_id
        && let Some(found) = categories.iter().find(|c| c.id == id)
    {
        if found.kind != kind {
            return Err(TransactionError::CategoryTypeMismatch(kind));
        }
        return Ok(found);
    }

    let eligible = move || categories.iter().filter(move |c| c.kind == kind);

    if let Some(name) = by_name.map(str::trim).filter(|n| !n.is_empty())
        && let Some(found) = eligible().find(|c| c.name.eq_ignore_ascii_case(name))
    {
        return Ok(found);
    }

    eligible().next().ok_or(TransactionError::NoCategory(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, kind: TransactionKind) -> CategoryRef {
        CategoryRef {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
        }
    }

    fn fixture() -> Vec<CategoryRef> {
        vec![
            cat("Salary", TransactionKind::Income),
            cat("Food", TransactionKind::Expense),
            cat("Rent", TransactionKind::Expense),
        ]
    }

    #[test]
    fn test_resolve_by_id() {
        let cats = fixture();
        let found =
            resolve_category(&cats, TransactionKind::Expense, Some(cats[2].id), None).unwrap();
        assert_eq!(found.name, "Rent");
    }

    #[test]
    fn test_resolve_by_name_case_insensitive() {
        let cats = fixture();
        let found = resolve_category(&cats, TransactionKind::Expense, None, Some("rent")).unwrap();
        assert_eq!(found.name, "Rent");
    }

    #[test]
    fn test_falls_back_to_first_of_kind() {
        let cats = fixture();
        let found =
            resolve_category(&cats, TransactionKind::Expense, Some(Uuid::new_v4()), Some("Travel"))
                .unwrap();
        assert_eq!(found.name, "Food");

        let income = resolve_category(&cats, TransactionKind::Income, None, None).unwrap();
        assert_eq!(income.name, "Salary");
    }

    #[test]
    fn test_name_of_other_kind_is_ignored() {
        let cats = fixture();
        let found =
            resolve_category(&cats, TransactionKind::Income, None, Some("Food")).unwrap();
        assert_eq!(found.name, "Salary");
    }

    #[test]
    fn test_id_of_other_kind_is_rejected() {
        let cats = fixture();
        assert_eq!(
            resolve_category(&cats, TransactionKind::Income, Some(cats[1].id), None),
            Err(TransactionError::CategoryTypeMismatch(TransactionKind::Income))
        );
    }

    #[test]
    fn test_no_category_of_kind() {
        let cats = vec![cat("Food", TransactionKind::Expense)];
        assert_eq!(
            resolve_category(&cats, TransactionKind::Income, None, None),
            Err(TransactionError::NoCategory(TransactionKind::Income))
        );
    }
}
