//! Search view over the record store

use shared::Record;

/// Records whose name, role or department contains `query`, ignoring case.
///
/// Order follows `records`; an empty query returns everything.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            [&r.name, &r.role, &r.department]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
