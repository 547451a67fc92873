//! Linear selection over an already loaded collection.
//!
//! Stores have no indexes, so filtering and sorting always happen on the full
//! result of `find_all`, keeping the store's order.

/// Keeps the entities whose `field` satisfies `predicate`, in their original order.
pub fn filter_by<E, T, F, P>(entities: Vec<E>, field: F, predicate: P) -> Vec<E>
where
    T: ?Sized,
    F: Fn(&E) -> &T,
    P: Fn(&T) -> bool,
{
    entities
        .into_iter()
        .filter(|entity| predicate(field(entity)))
        .collect()
}

/// Stable ascending sort by the extracted key.
pub fn sort_by_field<E, K, F>(mut entities: Vec<E>, key: F) -> Vec<E>
where
    K: Ord,
    F: Fn(&E) -> K,
{
    entities.sort_by_key(key);
    entities
}
