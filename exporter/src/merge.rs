use crate::model::TimeseriesData;
use serde_json::Value;
use std::collections::BTreeSet;

/// One merged row: a timestamp and one optional value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub ts: i64,
    pub values: Vec<Option<Value>>,
}

/// Aligns per-key samples on the union of their timestamps.
///
/// Rows come out in ascending timestamp order, one per distinct timestamp seen
/// under any key. Column `i` holds the value of `keys[i]` at exactly that
/// timestamp, or `None`. Nearby timestamps are never combined.
pub fn merge_samples(data: &TimeseriesData, keys: &[String]) -> Vec<Row> {
    let timestamps: BTreeSet<i64> = data
        .values()
        .flat_map(|samples| samples.iter().map(|sample| sample.ts))
        .collect();

    timestamps
        .into_iter()
        .map(|ts| Row {
            ts,
            values: keys
                .iter()
                .map(|key| {
                    data.get(key)
                        .and_then(|samples| samples.iter().find(|sample| sample.ts == ts))
                        .map(|sample| sample.value.clone())
                })
                .collect(),
        })
        .collect()
}
