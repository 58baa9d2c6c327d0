//! In-process data point collection.
//!
//! Used when `STORE_BACKEND=memory` and by the HTTP tests. Lists in
//! insertion order. Contents are lost when the process exits.

use std::sync::Arc;

use datafeed_types::DataPoint;
use tokio::sync::RwLock;

/// A shared, growable collection of data points.
#[derive(Debug, Clone, Default)]
pub struct MemoryPointStore {
    points: Arc<RwLock<Vec<DataPoint>>>,
}

impl MemoryPointStore {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a data point and return the stored copy.
    pub async fn insert(&self, point: &DataPoint) -> DataPoint {
        self.points.write().await.push(point.clone());
        point.clone()
    }

    /// Snapshot of every stored data point.
    pub async fn list_all(&self) -> Vec<DataPoint> {
        self.points.read().await.clone()
    }

    /// Number of stored points.
    pub async fn len(&self) -> usize {
        self.points.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.points.read().await.is_empty()
    }
}
