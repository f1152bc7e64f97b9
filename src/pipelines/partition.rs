//! Static batch partitioning.
//!
//! The input file list is split up front into disjoint partitions, one
//! per worker; there is no work stealing. Each partition's position in
//! the returned sequence is its stable index, used to keep chunk file
//! names disjoint across concurrently running workers.

/// Split `items` into at most `workers` partitions.
///
/// Every partition has `max(1, len / workers)` items except the last,
/// which absorbs the remainder. Order is preserved.
pub fn partition<T>(mut items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let workers = workers.max(1);
    let size = (items.len() / workers).max(1);
    let count = workers.min(items.len());

    let mut parts = Vec::with_capacity(count);
    for _ in 0..count - 1 {
        let rest = items.split_off(size);
        parts.push(std::mem::replace(&mut items, rest));
    }
    parts.push(items);
    parts
}
