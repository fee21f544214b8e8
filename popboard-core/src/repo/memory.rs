use crate::{remove, upsert, CoreError, IdGenerator, Popup, PopupId};
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Default)]
pub struct MemoryRepo {
    popups: RwLock<Vec<Popup>>,
    ids: IdGenerator,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_popups(popups: Vec<Popup>) -> Self {
        Self {
            popups: RwLock::new(popups),
            ids: IdGenerator::new(),
        }
    }
}

#[async_trait]
impl crate::repo::PopupRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<Popup>, CoreError> {
        Ok(self.popups.read().clone())
    }

    async fn save(&self, popup: Popup) -> Result<Popup, CoreError> {
        let mut v = self.popups.write();
        Ok(upsert(&mut v, popup, &self.ids))
    }

    async fn delete(&self, id: Option<PopupId>) -> Result<usize, CoreError> {
        let mut v = self.popups.write();
        Ok(remove(&mut v, id))
    }
}
