//! User repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::ContactType, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// A verified account already uses this contact.
    #[error("An account with this contact already exists")]
    AlreadyRegistered,

    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    /// Display name.
    pub name: String,
    /// Normalized contact.
    pub contact: String,
    /// Contact kind.
    pub contact_type: ContactType,
    /// Argon2id hash.
    pub password_hash: String,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by contact.
    pub async fn find_by_contact(&self, contact: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Contact.eq(contact))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates an unverified user, or refreshes the name and password of an
    /// existing unverified one.
    ///
    /// # Errors
    ///
    /// Returns `UserError::AlreadyRegistered` if the contact belongs to a
    /// verified user.
    pub async fn register(&self, input: RegisterUserInput) -> Result<users::Model, UserError> {
        let now = Utc::now().into();

        if let Some(existing) = self.find_by_contact(&input.contact).await? {
            if existing.is_verified {
                return Err(UserError::AlreadyRegistered);
            }

            let mut active: users::ActiveModel = existing.into();
            active.name = Set(input.name);
            active.contact_type = Set(input.contact_type);
            active.password_hash = Set(input.password_hash);
            active.updated_at = Set(now);
            return Ok(active.update(&self.db).await?);
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            contact: Set(input.contact),
            contact_type: Set(input.contact_type),
            password_hash: Set(input.password_hash),
            is_verified: Set(false),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(user.insert(&self.db).await?)
    }

    /// Marks a user as verified.
    pub async fn mark_verified(&self, id: Uuid) -> Result<users::Model, UserError> {
        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;
        if user.is_verified {
            return Ok(user);
        }

        let mut active: users::ActiveModel = user.into();
        active.is_verified = Set(true);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Grants or revokes the admin flag.
    pub async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<users::Model, UserError> {
        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.is_admin = Set(is_admin);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Total number of users.
    pub async fn count(&self) -> Result<u64, DbErr> {
        users::Entity::find().count(&self.db).await
    }
}
