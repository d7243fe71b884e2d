use rsql_model::{Entry, Predicate};

/// Deep-merges two predicate objects field by field. Keys unique to either
/// side are kept; when both sides hold a nested predicate under the same
/// key the nesting is merged recursively; any other collision takes `b`'s
/// entry verbatim. Operator values are opaque leaves and are never
/// traversed, which is why repeated constraints on one field must be
/// combined into a composite before this merge runs.
pub fn merge(a: &Predicate, b: &Predicate) -> Predicate {
    let mut out = a.clone();
    for (key, entry) in b.iter() {
        let next = match (out.get(key), entry) {
            (Some(Entry::Nested(left)), Entry::Nested(right)) => Entry::Nested(merge(left, right)),
            _ => entry.clone(),
        };
        out.insert(key.clone(), next);
    }
    out
}
