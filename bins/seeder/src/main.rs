//! Database seeder for Fintrack development and testing.
//!
//! Seeds a verified demo user (with the admin flag), the default categories,
//! three months of sample transactions, budgets, a savings goal and a loan.
//! Re-running is a no-op once the demo user is verified.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use fintrack_core::auth::hash_password;
use fintrack_core::period::MonthPeriod;
use fintrack_db::entities::sea_orm_active_enums::{ContactType, TransactionType};
use fintrack_db::repositories::{
    CreateGoalInput, CreateLoanInput, CreateTransactionInput, RegisterUserInput,
};
use fintrack_db::{
    BudgetRepository, CategoryRepository, GoalRepository, LoanRepository, TransactionRepository,
    UserRepository,
};

const DEMO_CONTACT: &str = "demo@fintrack.dev";
const DEMO_PASSWORD: &str = "demo-password";

/// `(category, type, day of month, amount, note, recurring)`
const MONTHLY_ENTRIES: &[(&str, TransactionType, u64, Decimal, &str, bool)] = &[
    ("Salary", TransactionType::Income, 0, dec!(55000), "Monthly salary", true),
    ("Rent", TransactionType::Expense, 2, dec!(15000), "Monthly rent", true),
    ("Utilities", TransactionType::Expense, 4, dec!(1850), "Electricity bill", false),
    ("Groceries", TransactionType::Expense, 6, dec!(3240.50), "Weekly groceries", false),
    ("Food", TransactionType::Expense, 9, dec!(780), "Dinner out", false),
    ("Transport", TransactionType::Expense, 11, dec!(1200), "Metro pass", true),
    ("Entertainment", TransactionType::Expense, 14, dec!(649), "Streaming", true),
    ("Shopping", TransactionType::Expense, 18, dec!(2499), "Shoes", false),
    ("Freelance", TransactionType::Income, 20, dec!(8000), "Website project", false),
];

const BUDGETS: &[(&str, Decimal)] = &[
    ("Rent", dec!(15000)),
    ("Food", dec!(3000)),
    ("Groceries", dec!(6000)),
    ("Transport", dec!(1500)),
    ("Shopping", dec!(2000)),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = fintrack_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding demo user...");
    let Some(user_id) = seed_demo_user(&db).await? else {
        println!("  Demo user already verified, skipping...");
        return Ok(());
    };

    println!("Seeding default categories...");
    let created = CategoryRepository::new(db.clone()).seed_defaults(user_id).await?;
    println!("  Created {created} categories");

    println!("Seeding transactions...");
    seed_transactions(&db, user_id).await?;

    println!("Seeding budgets...");
    seed_budgets(&db, user_id).await?;

    println!("Seeding goal and loan...");
    seed_goal_and_loan(&db, user_id).await?;

    println!("Seeding complete! Log in as {DEMO_CONTACT} / {DEMO_PASSWORD}");
    Ok(())
}

/// Registers and verifies the demo user. Returns `None` if it was already verified.
async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<Option<Uuid>> {
    let users = UserRepository::new(db.clone());
    if users
        .find_by_contact(DEMO_CONTACT)
        .await?
        .is_some_and(|u| u.is_verified)
    {
        return Ok(None);
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    let user = users
        .register(RegisterUserInput {
            name: "Demo User".to_string(),
            contact: DEMO_CONTACT.to_string(),
            contact_type: ContactType::Email,
            password_hash,
        })
        .await?;
    users.mark_verified(user.id).await?;
    users.set_admin(user.id, true).await?;

    println!("  Created demo user: {DEMO_CONTACT}");
    Ok(Some(user.id))
}

async fn seed_transactions(db: &DatabaseConnection, user_id: Uuid) -> anyhow::Result<()> {
    let categories = CategoryRepository::new(db.clone());
    let transactions = TransactionRepository::new(db.clone());
    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for month in MonthPeriod::containing(today).trailing(3) {
        for (category, kind, day, amount, note, recurring) in MONTHLY_ENTRIES {
            let date = month
                .start_date()
                .checked_add_days(Days::new(*day))
                .unwrap_or_else(|| month.start_date());
            if date > today {
                continue;
            }

            let Some(category) = categories.find_by_name(user_id, category, *kind).await? else {
                eprintln!("  Missing category {category}, skipping");
                continue;
            };

            transactions
                .create(
                    user_id,
                    CreateTransactionInput {
                        category_id: category.id,
                        amount: *amount,
                        transaction_type: *kind,
                        transaction_date: date,
                        payment_mode: if *kind == TransactionType::Income {
                            "Bank Transfer".to_string()
                        } else {
                            "UPI".to_string()
                        },
                        note: Some((*note).to_string()),
                        is_recurring: *recurring,
                    },
                )
                .await?;
            inserted += 1;
        }
    }

    println!("  Created {inserted} transactions");
    Ok(())
}

async fn seed_budgets(db: &DatabaseConnection, user_id: Uuid) -> anyhow::Result<()> {
    let categories = CategoryRepository::new(db.clone());
    let budgets = BudgetRepository::new(db.clone());

    for (name, limit) in BUDGETS {
        if let Some(category) = categories
            .find_by_name(user_id, name, TransactionType::Expense)
            .await?
        {
            budgets.upsert(user_id, category.id, *limit).await?;
            println!("  {name}: {limit}");
        }
    }
    Ok(())
}

async fn seed_goal_and_loan(db: &DatabaseConnection, user_id: Uuid) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();

    let goals = GoalRepository::new(db.clone());
    let goal = goals
        .create(
            user_id,
            CreateGoalInput {
                name: "Emergency fund".to_string(),
                target_amount: dec!(150000),
                deadline: today.checked_add_months(Months::new(12)),
            },
        )
        .await?;
    goals.add_contribution(user_id, goal.id, dec!(42000)).await?;

    LoanRepository::new(db.clone())
        .create(
            user_id,
            CreateLoanInput {
                name: "Car loan".to_string(),
                principal: dec!(600000),
                annual_rate: dec!(9.5),
                tenure_months: 60,
                start_date: today
                    .checked_sub_months(Months::new(8))
                    .unwrap_or(NaiveDate::MIN),
            },
        )
        .await?;

    Ok(())
}
