use crate::core::models::Item;
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, item};
use super::types::SeaOrmDatabase;

impl item::Model {
    /// Convert to the domain item
    pub fn to_domain_item(&self) -> Item {
        Item {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            email: self.email.clone(),
        }
    }
}

#[async_trait]
impl ItemStore for SeaOrmDatabase {
    async fn list_all_ids(&self) -> Result<Vec<i64>> {
        debug!("Listing item ids");

        let ids: Vec<i64> = entities::Item::find()
            .select_only()
            .column(item::Column::Id)
            .order_by_asc(item::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        Ok(ids)
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        debug!("Listing items");

        let models = entities::Item::find()
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        Ok(models.iter().map(item::Model::to_domain_item).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        debug!("Finding item by ID: {}", id);

        let model = entities::Item::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        Ok(model.map(|m| m.to_domain_item()))
    }

    async fn save(&self, item: Item) -> Result<Item> {
        debug!("Saving item: {:?}", item.id);

        let existing = match item.id {
            Some(id) => entities::Item::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(ServiceError::Database)?,
            None => None,
        };

        let model = match existing {
            Some(current) => {
                let mut active_model: item::ActiveModel = current.into();
                active_model.name = Set(item.name);
                active_model.description = Set(item.description);
                active_model.status = Set(item.status);
                active_model.email = Set(item.email);

                active_model
                    .update(&self.db)
                    .await
                    .map_err(ServiceError::Database)?
            }
            None => {
                let id = match item.id {
                    Some(id) => Set(id),
                    None => NotSet,
                };
                let active_model = item::ActiveModel {
                    id,
                    name: Set(item.name),
                    description: Set(item.description),
                    status: Set(item.status),
                    email: Set(item.email),
                };

                active_model
                    .insert(&self.db)
                    .await
                    .map_err(ServiceError::Database)?
            }
        };

        Ok(model.to_domain_item())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        debug!("Deleting item: {}", id);

        let result = entities::Item::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        Ok(result.rows_affected > 0)
    }

    async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");

        entities::Item::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(ServiceError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }
}
