use super::params::{FilterValue, Query, QueryValue};
use crate::Result;
use crate::api::item::Item;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Page size the API applies when `perPage` is not sent.
/// Also used to turn an offset into a page when no limit was set.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Something that can execute a rendered query and hand back items
#[async_trait]
pub trait Queryable: Send + Sync {
    async fn perform(&self, query: Query) -> Result<Vec<Item>>;
}

#[async_trait]
impl<T: Queryable + ?Sized> Queryable for &T {
    async fn perform(&self, query: Query) -> Result<Vec<Item>> {
        (**self).perform(query).await
    }
}

#[async_trait]
impl<T: Queryable + ?Sized> Queryable for Arc<T> {
    async fn perform(&self, query: Query) -> Result<Vec<Item>> {
        (**self).perform(query).await
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct QueryState {
    filters: IndexMap<String, FilterValue>,
    order: Vec<String>,
    limit: Option<u32>,
    page: Option<u64>,
    offset: Option<u64>,
}

impl QueryState {
    fn unpaginated(&self) -> Self {
        Self {
            limit: None,
            page: None,
            offset: None,
            ..self.clone()
        }
    }

    fn single(&self) -> Self {
        Self {
            limit: Some(1),
            page: None,
            offset: None,
            ..self.clone()
        }
    }

    // Offset wins over an explicit page.
    fn effective_page(&self) -> Option<u64> {
        match self.offset {
            Some(offset) => {
                let per_page = u64::from(self.limit.unwrap_or(DEFAULT_PER_PAGE));
                Some(offset / per_page + 1)
            }
            None => self.page,
        }
    }

    fn render(&self) -> Query {
        let mut query = Query::new();

        for (key, value) in &self.filters {
            query.insert(key.clone(), QueryValue::Single(value.render()));
        }

        if !self.order.is_empty() {
            query.insert("orderBy", QueryValue::List(self.order.clone()));
        }

        if let Some(limit) = self.limit {
            query.insert("perPage", QueryValue::Single(limit.to_string()));
        }

        if let Some(page) = self.effective_page() {
            query.insert("page", QueryValue::Single(page.to_string()));
        }

        query
    }
}

/// Fluent builder that accumulates filters, ordering and pagination,
/// renders them into a [`Query`] and hands it to its [`Queryable`].
///
/// Out-of-range pagination input never fails: it simply leaves the
/// parameter unset.
///
/// ```rust,ignore
/// let reviews = Builder::new(&resource)
///     .filter("stars", 5)
///     .order("createdAt", "desc")
///     .limit(50)
///     .get()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Builder<Q> {
    queryable: Q,
    state: QueryState,
}

impl<Q> Builder<Q> {
    pub fn new(queryable: Q) -> Self {
        Self {
            queryable,
            state: QueryState::default(),
        }
    }

    /// Add a filter condition; re-using a key replaces its value in place
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.state.filters.insert(key.into(), value.into());
        self
    }

    /// Append `field.direction` (both lowercased) to the ordering.
    /// The direction is passed through unchecked.
    pub fn order(mut self, field: &str, direction: &str) -> Self {
        self.state.order.push(format!(
            "{}.{}",
            field.to_lowercase(),
            direction.to_lowercase()
        ));
        self
    }

    /// Items per page, kept only when within `1..=MAX_PER_PAGE`
    pub fn limit(mut self, limit: i64) -> Self {
        self.state.limit = u32::try_from(limit)
            .ok()
            .filter(|limit| (1..=MAX_PER_PAGE).contains(limit));
        self
    }

    /// One-based page number, kept only when positive
    pub fn page(mut self, page: i64) -> Self {
        self.state.page = positive(page);
        self
    }

    /// Item offset, kept only when positive. Rendered as a page number.
    pub fn offset(mut self, offset: i64) -> Self {
        self.state.offset = positive(offset);
        self
    }

    /// Render the current state without touching it
    pub fn build(&self) -> Query {
        self.state.render()
    }

    /// The query [`Builder::all`] sends
    pub fn build_all(&self) -> Query {
        self.state.unpaginated().render()
    }

    /// The query [`Builder::first`] sends
    pub fn build_first(&self) -> Query {
        self.state.single().render()
    }
}

impl<Q: Queryable> Builder<Q> {
    pub async fn get(&self) -> Result<Vec<Item>> {
        self.dispatch(self.build()).await
    }

    /// Fetch with page, offset and limit cleared
    pub async fn all(&self) -> Result<Vec<Item>> {
        self.dispatch(self.build_all()).await
    }

    /// Fetch with a limit of one and page/offset cleared.
    /// Returns the collection as-is; callers take the head element.
    pub async fn first(&self) -> Result<Vec<Item>> {
        self.dispatch(self.build_first()).await
    }

    async fn dispatch(&self, query: Query) -> Result<Vec<Item>> {
        log::debug!("Performing query with {} parameter(s): {:?}", query.len(), query);
        self.queryable.perform(query).await
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|value| *value >= 1)
}
