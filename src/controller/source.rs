use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{ListPage, ListQuery};

/// What a [`ListController`](super::ListController) drives: a paginated
/// fetch plus the row actions its page offers.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + Debug + 'static;
    type Action: Send + Debug + 'static;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<Self::Item>, ApiError>;

    async fn apply(&self, action: Self::Action) -> Result<(), ApiError>;
}
