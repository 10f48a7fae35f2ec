use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::admin_user_otp;

pub async fn insert(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
    code: &str,
    created_at: i64,
) -> Result<admin_user_otp::Model, InternalError> {
    admin_user_otp::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        otp: Set(code.to_owned()),
        is_redeemed: Set(false),
        is_consumed: Set(false),
        admin_user_id: Set(admin_user_id.to_owned()),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_admin_user_otp", e))
}

/// Most recently created code for the admin user
///
/// Ties on `created_at` are broken by the time-ordered id.
pub async fn latest_for(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
) -> Result<Option<admin_user_otp::Model>, InternalError> {
    admin_user_otp::Entity::find()
        .filter(admin_user_otp::Column::AdminUserId.eq(admin_user_id))
        .order_by_desc(admin_user_otp::Column::CreatedAt)
        .order_by_desc(admin_user_otp::Column::Id)
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_latest_admin_user_otp", e))
}

pub async fn mark_redeemed(
    conn: &impl ConnectionTrait,
    otp: admin_user_otp::Model,
    redeemed_at: i64,
) -> Result<(), InternalError> {
    let mut active: admin_user_otp::ActiveModel = otp.into();
    active.is_redeemed = Set(true);
    active.updated_at = Set(redeemed_at);

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("redeem_admin_user_otp", e))?;

    Ok(())
}

pub async fn mark_consumed(
    conn: &impl ConnectionTrait,
    otp: admin_user_otp::Model,
    consumed_at: i64,
) -> Result<(), InternalError> {
    let mut active: admin_user_otp::ActiveModel = otp.into();
    active.is_consumed = Set(true);
    active.updated_at = Set(consumed_at);

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("consume_admin_user_otp", e))?;

    Ok(())
}
