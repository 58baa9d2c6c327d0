//! Shared type definitions for the Datafeed service.
//!
//! A [`DataPoint`] is the only entity the service stores. Clients submit a
//! [`NewDataPoint`] (identifier and value only); the server stamps it with
//! its own clock to produce the record that is persisted and broadcast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Real-time channel that new data points are published on.
pub const ANALYTICS_CHANNEL: &str = "analytics-channel";

/// Event name used when publishing a newly created data point.
pub const NEW_DATA_EVENT: &str = "new-data";

/// A stored numeric measurement.
///
/// Wire shape: `{"id": string, "value": integer, "time": RFC3339}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Client-chosen identifier. Not validated and not unique.
    pub id: String,
    /// The measurement.
    pub value: i64,
    /// Server-assigned write time.
    pub time: DateTime<Utc>,
}

/// The body accepted by `POST /data`.
///
/// Both fields are required. Any other field in the request, including a
/// client-supplied `time`, is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDataPoint {
    /// Client-chosen identifier.
    pub id: String,
    /// The measurement.
    pub value: i64,
}

impl NewDataPoint {
    /// Attach the server-assigned write time, producing the record to persist.
    pub fn stamp(self, time: DateTime<Utc>) -> DataPoint {
        DataPoint {
            id: self.id,
            value: self.value,
            time,
        }
    }
}
