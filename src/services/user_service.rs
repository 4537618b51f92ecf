use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    ActiveValue::NotSet,
};

use crate::{
    entity::users::{self, ActiveModel, Column, Entity as Users},
    error::{StoreError, StoreResult},
    models::User,
};

const DUPLICATE_EMAIL: &str = "Email is already registered";

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

/// Full row including the password hash; never serialize it.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> StoreResult<Option<users::Model>> {
    let user = Users::find().filter(Column::Email.eq(email)).one(db).await?;
    Ok(user)
}

pub async fn create_user(db: &DatabaseConnection, new: NewUser) -> StoreResult<User> {
    let active = ActiveModel {
        id: NotSet,
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        name: Set(new.name),
        role: Set(new.role),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let user = active
        .insert(db)
        .await
        .map_err(|e| StoreError::on_write(e, DUPLICATE_EMAIL))?;

    tracing::debug!(user_id = user.id, role = %user.role, "user created");
    Ok(user.into())
}
