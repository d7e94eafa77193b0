//! Categories seeded for every newly verified user.

use crate::transaction::TransactionKind;

/// A built-in category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    /// Display name.
    pub name: &'static str,
    /// Hex color.
    pub color: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
    /// Direction.
    pub kind: TransactionKind,
}

const fn expense(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        color,
        icon,
        kind: TransactionKind::Expense,
    }
}

const fn income(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        color,
        icon,
        kind: TransactionKind::Income,
    }
}

/// Default categories, in seeding order.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 10] = [
    income("Salary", "#10b981", "💼"),
    income("Freelance", "#06b6d4", "💻"),
    income("Investments", "#8b5cf6", "📈"),
    expense("Food", "#f97316", "🍔"),
    expense("Groceries", "#84cc16", "🛒"),
    expense("Transport", "#eab308", "⛽"),
    expense("Rent", "#ef4444", "🏠"),
    expense("Utilities", "#3b82f6", "💡"),
    expense("Entertainment", "#ec4899", "🎬"),
    expense("Shopping", "#a855f7", "🛍️"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults_cover_both_kinds() {
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.kind == TransactionKind::Income));
        assert!(DEFAULT_CATEGORIES.iter().any(|c| c.kind == TransactionKind::Expense));
    }

    #[test]
    fn test_defaults_unique_per_kind() {
        let keys: HashSet<_> = DEFAULT_CATEGORIES.iter().map(|c| (c.name, c.kind)).collect();
        assert_eq!(keys.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_colors_are_hex() {
        for c in DEFAULT_CATEGORIES {
            assert!(c.color.starts_with('#') && c.color.len() == 7, "{}", c.name);
        }
    }
}
