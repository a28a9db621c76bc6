//! Form ranking for characters that share a name

use crate::record::{CharacterRecord, RawRecord};
use std::collections::HashMap;

/// Derive display names and average stats for every record
///
/// Records sharing an exact `name` form a group. A single-member group keeps
/// its name; larger groups are labelled `"{name} (Form k)"` with k ranked by
/// ascending average stats, ties kept in input order. The output keeps the
/// input order and length.
pub fn derive_forms(records: Vec<RawRecord>) -> Vec<CharacterRecord> {
    let labels = form_labels(&records);

    records
        .into_iter()
        .zip(labels)
        .map(|(raw, label)| CharacterRecord::from_raw(raw, label))
        .collect()
}

/// Compute the display label for each record, index-aligned with `records`
fn form_labels(records: &[RawRecord]) -> Vec<String> {
    // name -> indices of its members, in input order
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        groups.entry(record.name.as_str()).or_default().push(idx);
    }

    let mut labels: Vec<String> = records.iter().map(|r| r.name.clone()).collect();

    for (name, mut members) in groups {
        if members.len() < 2 {
            continue;
        }

        // sort_by is stable, so equal averages keep input order
        members.sort_by(|&a, &b| {
            records[a]
                .average_stats()
                .total_cmp(&records[b].average_stats())
        });

        for (rank, idx) in members.into_iter().enumerate() {
            labels[idx] = format!("{} (Form {})", name, rank + 1);
        }
    }

    labels
}
