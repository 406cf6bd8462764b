use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{AdminRepository, DomainResult};
use crate::infrastructure::database::entities::admin;

pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn is_admin(&self, user_id: &str) -> DomainResult<bool> {
        let found = admin::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(found.is_some())
    }

    async fn grant(&self, user_id: &str) -> DomainResult<()> {
        if self.is_admin(user_id).await? {
            return Ok(());
        }

        let active = admin::ActiveModel {
            user_id: Set(user_id.to_string()),
            granted_at: Set(Utc::now()),
        };
        active.insert(&self.db).await?;
        Ok(())
    }

    async fn revoke(&self, user_id: &str) -> DomainResult<bool> {
        let result = admin::Entity::delete_by_id(user_id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_ids(&self) -> DomainResult<Vec<String>> {
        let models = admin::Entity::find()
            .order_by_asc(admin::Column::GrantedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.user_id).collect())
    }
}
