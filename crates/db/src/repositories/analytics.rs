//! Aggregate queries for the dashboard, budgets and analytics endpoints.
//!
//! Every query is scoped to one user and returns sparse rows; zero-filling
//! and percentages are applied by `fintrack_core::analytics`.

use chrono::NaiveDate;
use fintrack_core::analytics::CategoryTotal;
use fintrack_core::period::MonthPeriod;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Statement, Value,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::entities::{
    budgets, categories, sea_orm_active_enums::TransactionType, transactions,
};

/// Half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive start.
    pub from: NaiveDate,
    /// Exclusive end.
    pub to: NaiveDate,
}

impl From<MonthPeriod> for DateRange {
    fn from(month: MonthPeriod) -> Self {
        Self {
            from: month.start_date(),
            to: month.end_date_exclusive(),
        }
    }
}

/// Spend of one category against its limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBudgetRow {
    /// Category ID.
    pub category_id: Uuid,
    /// Category name.
    pub category: String,
    /// Category color.
    pub color: String,
    /// Category icon.
    pub icon: String,
    /// Monthly limit, 0 when unset.
    pub limit: Decimal,
    /// Spend in the requested range.
    pub spent: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct TypeTotalRow {
    transaction_type: TransactionType,
    total: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct FirstDateRow {
    first: Option<NaiveDate>,
}

#[derive(Debug, FromQueryResult)]
struct SumRow {
    total: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct CategoryTotalRow {
    category_id: Uuid,
    category: String,
    color: String,
    total: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct MonthTotalRow {
    year: i32,
    month: i32,
    total: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct MonthCategoryRow {
    year: i32,
    month: i32,
    category: String,
    total: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct DayTotalRow {
    day: NaiveDate,
    total: Decimal,
}

fn month_period(year: i32, month: i32) -> Option<MonthPeriod> {
    let month = u32::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
    Some(MonthPeriod { year, month })
}

fn type_value(kind: TransactionType) -> Value {
    match kind {
        TransactionType::Income => "income".into(),
        TransactionType::Expense => "expense".into(),
    }
}

/// Analytics repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    db: DatabaseConnection,
}

impl AnalyticsRepository {
    /// Creates a new analytics repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `(income, expense)` totals, over all time when `range` is `None`.
    pub async fn totals(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<(Decimal, Decimal), DbErr> {
        let mut query = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::TransactionType)
            .column_as(transactions::Column::Amount.sum(), "total")
            .filter(transactions::Column::UserId.eq(user_id))
            .group_by(transactions::Column::TransactionType);

        if let Some(r) = range {
            query = query
                .filter(transactions::Column::TransactionDate.gte(r.from))
                .filter(transactions::Column::TransactionDate.lt(r.to));
        }

        let rows = query.into_model::<TypeTotalRow>().all(&self.db).await?;

        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for row in rows {
            let total = row.total.unwrap_or_default();
            match row.transaction_type {
                TransactionType::Income => income += total,
                TransactionType::Expense => expense += total,
            }
        }
        Ok((income, expense))
    }

    /// Expense per category, largest first; over all time when `range` is `None`.
    pub async fn expense_by_category(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>, DbErr> {
        let mut query = transactions::Entity::find()
            .select_only()
            .column_as(categories::Column::Id, "category_id")
            .column_as(categories::Column::Name, "category")
            .column_as(categories::Column::Color, "color")
            .column_as(transactions::Column::Amount.sum(), "total")
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::TransactionType.eq(TransactionType::Expense))
            .group_by(categories::Column::Id)
            .group_by(categories::Column::Name)
            .group_by(categories::Column::Color)
            .order_by_desc(Expr::cust("total"))
            .order_by_asc(categories::Column::Name);

        if let Some(r) = range {
            query = query
                .filter(transactions::Column::TransactionDate.gte(r.from))
                .filter(transactions::Column::TransactionDate.lt(r.to));
        }

        let rows = query.into_model::<CategoryTotalRow>().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|r| CategoryTotal {
                category: r.category,
                color: r.color,
                total: r.total.unwrap_or_default(),
            })
            .collect())
    }

    /// Expense filed under one category within `range`.
    pub async fn category_expense(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        range: DateRange,
    ) -> Result<Decimal, DbErr> {
        let row = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::Amount.sum(), "total")
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::CategoryId.eq(category_id))
            .filter(transactions::Column::TransactionType.eq(TransactionType::Expense))
            .filter(transactions::Column::TransactionDate.gte(range.from))
            .filter(transactions::Column::TransactionDate.lt(range.to))
            .into_model::<SumRow>()
            .one(&self.db)
            .await?;

        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }

    /// Date of the user's earliest transaction of any type.
    pub async fn first_transaction_date(&self, user_id: Uuid) -> Result<Option<NaiveDate>, DbErr> {
        let row = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::TransactionDate.min(), "first")
            .filter(transactions::Column::UserId.eq(user_id))
            .into_model::<FirstDateRow>()
            .one(&self.db)
            .await?;

        Ok(row.and_then(|r| r.first))
    }

    /// Every expense category with its limit and its spend within `range`,
    /// ordered by name.
    pub async fn budget_usage(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<CategoryBudgetRow>, DbErr> {
        let expense_categories = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::CategoryType.eq(TransactionType::Expense))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;

        let limits = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let spend = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::CategoryId)
            .column_as(categories::Column::Name, "category")
            .column_as(categories::Column::Color, "color")
            .column_as(transactions::Column::Amount.sum(), "total")
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::TransactionType.eq(TransactionType::Expense))
            .filter(transactions::Column::TransactionDate.gte(range.from))
            .filter(transactions::Column::TransactionDate.lt(range.to))
            .group_by(transactions::Column::CategoryId)
            .group_by(categories::Column::Name)
            .group_by(categories::Column::Color)
            .into_model::<CategoryTotalRow>()
            .all(&self.db)
            .await?;

        Ok(expense_categories
            .into_iter()
            .map(|c| CategoryBudgetRow {
                limit: limits
                    .iter()
                    .find(|b| b.category_id == c.id)
                    .map_or(Decimal::ZERO, |b| b.amount),
                spent: spend
                    .iter()
                    .find(|s| s.category_id == c.id)
                    .and_then(|s| s.total)
                    .unwrap_or_default(),
                category_id: c.id,
                category: c.name,
                color: c.color,
                icon: c.icon,
            })
            .collect())
    }

    /// Monthly totals of one type within `range`, oldest first; months
    /// without transactions are absent.
    pub async fn monthly_totals(
        &self,
        user_id: Uuid,
        kind: TransactionType,
        range: DateRange,
    ) -> Result<Vec<(MonthPeriod, Decimal)>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r"
            SELECT EXTRACT(YEAR FROM transaction_date)::int AS year,
                   EXTRACT(MONTH FROM transaction_date)::int AS month,
                   SUM(amount) AS total
            FROM transactions
            WHERE user_id = $1
              AND transaction_type = $2::transaction_type
              AND transaction_date >= $3
              AND transaction_date < $4
            GROUP BY 1, 2
            ORDER BY 1, 2
            ",
            [
                user_id.into(),
                type_value(kind),
                range.from.into(),
                range.to.into(),
            ],
        );

        let rows = MonthTotalRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| month_period(r.year, r.month).map(|m| (m, r.total)))
            .collect())
    }

    /// Daily totals of one type within `range`; days without transactions
    /// are absent.
    pub async fn daily_totals(
        &self,
        user_id: Uuid,
        kind: TransactionType,
        range: DateRange,
    ) -> Result<Vec<(NaiveDate, Decimal)>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r"
            SELECT transaction_date AS day, SUM(amount) AS total
            FROM transactions
            WHERE user_id = $1
              AND transaction_type = $2::transaction_type
              AND transaction_date >= $3
              AND transaction_date < $4
            GROUP BY transaction_date
            ORDER BY transaction_date
            ",
            [
                user_id.into(),
                type_value(kind),
                range.from.into(),
                range.to.into(),
            ],
        );

        let rows = DayTotalRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(|r| (r.day, r.total)).collect())
    }

    /// Expense per month and category within `range`.
    pub async fn monthly_expense_by_category(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<(MonthPeriod, String, Decimal)>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r"
            SELECT EXTRACT(YEAR FROM t.transaction_date)::int AS year,
                   EXTRACT(MONTH FROM t.transaction_date)::int AS month,
                   c.name AS category,
                   SUM(t.amount) AS total
            FROM transactions t
            JOIN categories c ON c.id = t.category_id
            WHERE t.user_id = $1
              AND t.transaction_type = 'expense'
              AND t.transaction_date >= $2
              AND t.transaction_date < $3
            GROUP BY 1, 2, 3
            ORDER BY 1, 2, 3
            ",
            [user_id.into(), range.from.into(), range.to.into()],
        );

        let rows = MonthCategoryRow::find_by_statement(stmt)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| month_period(r.year, r.month).map(|m| (m, r.category, r.total)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_period_guard() {
        assert_eq!(month_period(2024, 3), Some(MonthPeriod { year: 2024, month: 3 }));
        assert_eq!(month_period(2024, 0), None);
        assert_eq!(month_period(2024, 13), None);
        assert_eq!(month_period(2024, -1), None);
    }

    #[test]
    fn test_range_from_month() {
        let range = DateRange::from(MonthPeriod { year: 2023, month: 12 });
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
