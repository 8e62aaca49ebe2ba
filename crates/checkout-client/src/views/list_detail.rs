//! List detail: the items of one shopping list

use super::ViewContext;
use crate::local_state::{LocalState, LocalUpdate};
use shopsmart_common::models::AddItemRequest;
use shopsmart_common::{coerce_quantity, Item, Result, ValidationError};
use tracing::{debug, info};

#[derive(Debug)]
pub struct ListDetail {
    list_id: String,
    items: LocalState<Item>,
}

impl ListDetail {
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            items: LocalState::new(),
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn items(&self) -> &[Item] {
        self.items.entries()
    }

    /// Fetch the list's items; runs on every entry to the view
    pub async fn load(&mut self, ctx: &mut ViewContext<'_>) -> &[Item] {
        let token = ctx.token();

        match ctx.backend.list_items(token.as_ref(), &self.list_id).await {
            Ok(items) => {
                info!("Loaded {} items for list {}", items.len(), self.list_id);
                self.items.replace_all(items);
            }
            Err(e) => {
                debug!("item fetch failed: {}", e);
                ctx.notices.error("Failed to load items");
            }
        }

        self.items.entries()
    }

    /// Add an item at the top of the list.
    ///
    /// `quantity` is raw user input: missing means 1, anything else is
    /// coerced to an integer of at least 1.
    pub async fn add_item(
        &mut self,
        ctx: &mut ViewContext<'_>,
        name: &str,
        quantity: Option<&str>,
        brand: Option<&str>,
    ) -> Result<Item> {
        if name.trim().is_empty() {
            ctx.notices.error(ValidationError::EmptyItemName.to_string());
            return Err(ValidationError::EmptyItemName.into());
        }

        let token = ctx.token();
        let request = AddItemRequest {
            name: name.to_string(),
            quantity: quantity.map(coerce_quantity).unwrap_or(1),
            brand_preference: brand.unwrap_or_default().to_string(),
        };

        match ctx
            .backend
            .add_item(token.as_ref(), &self.list_id, &request)
            .await
        {
            Ok(item) => {
                self.items
                    .apply_optimistic(LocalUpdate::Prepend(item.clone()));
                Ok(item)
            }
            Err(e) => {
                ctx.notices.error("Failed to add item");
                Err(e.into())
            }
        }
    }

    /// Remove an item. Local state changes only after the backend confirms.
    pub async fn remove_item(&mut self, ctx: &mut ViewContext<'_>, item_id: &str) -> Result<()> {
        let token = ctx.token();
        let confirmation = ctx
            .backend
            .remove_item(token.as_ref(), &self.list_id, item_id);

        match self
            .items
            .apply_confirmed(LocalUpdate::Remove(item_id.to_string()), confirmation)
            .await
        {
            Ok(()) => {
                info!("Removed item {} from list {}", item_id, self.list_id);
                Ok(())
            }
            Err(e) => {
                ctx.notices.error("Failed to remove item");
                Err(e.into())
            }
        }
    }
}
