use crate::{filter_active, sort_by_recency, CoreError, Popup, PopupId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod memory;

pub use memory::MemoryRepo;

#[async_trait]
pub trait PopupRepository: Send + Sync {
    /// Every stored popup, in stored order.
    async fn list(&self) -> Result<Vec<Popup>, CoreError>;
    /// Create or update; returns the record as stored (id filled in).
    async fn save(&self, popup: Popup) -> Result<Popup, CoreError>;
    /// Returns how many records carried `id`. `None` removes nothing, but
    /// the store is still read, so a broken store still reports an error.
    async fn delete(&self, id: Option<PopupId>) -> Result<usize, CoreError>;

    async fn list_active(&self, today: NaiveDate) -> Result<Vec<Popup>, CoreError> {
        let all = self.list().await?;
        let mut active = filter_active(&all, today);
        sort_by_recency(&mut active);
        Ok(active)
    }
}
