use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::favorite;

/// Feature names favorited by `user_id`, oldest first.
pub async fn list_feature_names<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<String>, DbErr> {
    favorite::Entity::find()
        .select_only()
        .column(favorite::Column::FeatureName)
        .filter(favorite::Column::UserId.eq(user_id))
        .order_by_asc(favorite::Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await
}

pub async fn find_by_user_and_feature<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    feature_name: &str,
) -> Result<Option<favorite::Model>, DbErr> {
    favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::FeatureName.eq(feature_name))
        .one(db)
        .await
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    feature_name: &str,
) -> Result<favorite::Model, DbErr> {
    let now = Utc::now();
    favorite::ActiveModel {
        user_id: Set(user_id),
        feature_name: Set(feature_name.to_string()),
        created: Set(Some(now)),
        updated: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Returns the existing row for the pair, inserting it first if absent.
/// Run it inside a transaction so the check and the insert see the same state.
pub async fn first_or_create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    feature_name: &str,
) -> Result<favorite::Model, DbErr> {
    if let Some(existing) = find_by_user_and_feature(db, user_id, feature_name).await? {
        return Ok(existing);
    }
    create(db, user_id, feature_name).await
}

/// Number of rows removed, zero when the pair was never favorited.
pub async fn delete<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    feature_name: &str,
) -> Result<u64, DbErr> {
    let result = favorite::Entity::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::FeatureName.eq(feature_name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
