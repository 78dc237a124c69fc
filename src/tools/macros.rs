//! Shared Macros

/// Map every item, drop empty results, and deduplicate while preserving order.
#[macro_export]
macro_rules! dedupe {
    ($list:expr, $fn:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            let processed = $fn(item);
            if !processed.is_empty() && seen.insert(processed.clone()) {
                result.push(processed);
            }
        }
        result
    }};
}
