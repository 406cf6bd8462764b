use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{Account, AccountRepository, DomainError, DomainResult, NewAccount};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &str) -> DomainResult<account::Model> {
        account::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Account",
                field: "id",
                value: id.to_string(),
            })
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        last_login_at: model.last_login_at,
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        let active = account::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(new.email.clone()),
            password_hash: Set(new.password_hash),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
        };

        let model = active.insert(&self.db).await.map_err(|e| match DomainError::from(e) {
            DomainError::Conflict(_) => {
                DomainError::Conflict(format!("An account for {} already exists", new.email))
            }
            other => other,
        })?;

        Ok(account_model_to_domain(model))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(account_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(account_model_to_domain))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let mut active: account::ActiveModel = self.find_model(id).await?.into();
        active.password_hash = Set(password_hash.to_string());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let mut active: account::ActiveModel = self.find_model(id).await?.into();
        active.last_login_at = Set(Some(at));
        active.update(&self.db).await?;
        Ok(())
    }
}
