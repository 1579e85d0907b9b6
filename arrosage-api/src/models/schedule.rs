use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Answer of the scheduler on `GET /api/arrosage/scheduled`.
///
/// Entries are opaque to the bridge: only whether each list is empty matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledWaterings {
    /// Waterings whose start time is now
    #[serde(rename = "arrosagesADemarrer", default, deserialize_with = "null_as_empty")]
    pub to_start: Vec<Value>,
    /// Waterings whose end time is now
    #[serde(rename = "arrosagesAArreter", default, deserialize_with = "null_as_empty")]
    pub to_stop: Vec<Value>,
}

impl ScheduledWaterings {
    pub fn wants_start(&self) -> bool {
        !self.to_start.is_empty()
    }

    pub fn wants_stop(&self) -> bool {
        !self.to_stop.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}
