/// Ordering, table and pagination arguments shared by the listing operations.
///
/// Unset fields fall back to `ORDER BY id`, the model's context table, and no
/// pagination. Pagination applies only when both `limit` and `offset` are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order_by: Option<String>,
    pub table: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set `limit` and `offset` together.
    #[must_use]
    pub fn page(self, limit: u64, offset: u64) -> Self {
        self.limit(limit).offset(offset)
    }

    pub(crate) fn order_by_or_default(&self) -> &str {
        self.order_by.as_deref().unwrap_or("id")
    }
}
