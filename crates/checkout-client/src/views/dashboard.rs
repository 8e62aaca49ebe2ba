//! List dashboard: the user's shopping lists

use super::ViewContext;
use crate::local_state::{LocalState, LocalUpdate};
use shopsmart_common::models::CreateListRequest;
use shopsmart_common::{Result, ShoppingList, ValidationError};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Dashboard {
    /// `None` while the first load is in flight
    lists: Option<LocalState<ShoppingList>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.lists.is_none()
    }

    pub fn lists(&self) -> &[ShoppingList] {
        self.lists.as_ref().map(LocalState::entries).unwrap_or_default()
    }

    /// Fetch all lists. A failure leaves an empty, loaded dashboard.
    pub async fn load(&mut self, ctx: &mut ViewContext<'_>) -> &[ShoppingList] {
        let token = ctx.token();
        let mut state = LocalState::new();

        match ctx.backend.list_lists(token.as_ref()).await {
            Ok(lists) => {
                info!("Loaded {} lists", lists.len());
                state.replace_all(lists);
            }
            Err(e) => {
                debug!("list fetch failed: {}", e);
                ctx.notices.error("Failed to load lists");
            }
        }

        self.lists.insert(state).entries()
    }

    /// Create a list and put it first. Blank titles are rejected locally.
    pub async fn create_list(
        &mut self,
        ctx: &mut ViewContext<'_>,
        title: &str,
    ) -> Result<ShoppingList> {
        if title.trim().is_empty() {
            ctx.notices.error(ValidationError::EmptyTitle.to_string());
            return Err(ValidationError::EmptyTitle.into());
        }

        let token = ctx.token();
        let request = CreateListRequest {
            title: title.to_string(),
        };

        match ctx.backend.create_list(token.as_ref(), &request).await {
            Ok(list) => {
                ctx.notices.success("List created");
                self.lists
                    .get_or_insert_with(LocalState::new)
                    .apply_optimistic(LocalUpdate::Prepend(list.clone()));
                Ok(list)
            }
            Err(e) => {
                ctx.notices.error("Failed to create");
                Err(e.into())
            }
        }
    }
}
