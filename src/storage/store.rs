use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Dataset;

/// Holds the most recently analyzed dataset. One slot, replaced wholesale on every write.
#[derive(Debug, Default)]
pub struct DatasetStore {
    slot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `dataset` and returns whatever it replaced.
    pub fn replace(&self, dataset: Dataset) -> Option<Arc<Dataset>> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let previous = slot.replace(Arc::new(dataset));
        tracing::debug!(replaced = previous.is_some(), "Dataset stored");
        previous
    }

    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) -> Option<Arc<Dataset>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisPipeline;
    use crate::models::FeedbackTable;

    fn dataset(texts: &[&str]) -> Dataset {
        let table = FeedbackTable::from_texts("feedback", texts.iter().copied());
        AnalysisPipeline::default().analyze(&table, "feedback").unwrap()
    }

    #[test]
    fn test_last_write_wins() {
        let store = DatasetStore::new();
        assert!(store.is_empty());

        assert!(store.replace(dataset(&["Great plan"])).is_none());
        let previous = store.replace(dataset(&["Bad plan", "Fine plan"])).unwrap();
        assert_eq!(previous.summary.total_feedback, 1);

        let current = store.current().unwrap();
        assert_eq!(current.summary.total_feedback, 2);
    }

    #[test]
    fn test_clear() {
        let store = DatasetStore::new();
        store.replace(dataset(&["Great plan"]));
        assert!(store.clear().is_some());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(DatasetStore::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.replace(dataset(&["Excellent"]));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.current().unwrap().summary.total_feedback, 1);
    }
}
