use crate::store::QueryResult;

#[derive(Debug, Default)]
pub struct ResultCache {
    slot: Option<QueryResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, result: QueryResult) {
        self.slot = Some(result);
    }

    pub fn get(&self) -> Option<&QueryResult> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
