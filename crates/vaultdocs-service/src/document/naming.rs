//! Storage filename derivation.
//!
//! A stored file is named `{type}-{normalized name}.pdf`. Re-uploading the
//! same type for the same submitter overwrites the earlier file; within a
//! single request, repeated types get a positional suffix (`-2`, `-3`, ...).

use std::collections::HashMap;

use vaultdocs_entity::document::DocumentType;

/// Lowercase, trim, and collapse whitespace runs to `_`.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Storage filename for the `ordinal`-th file (1-based) of `doc_type` in a request.
pub fn storage_name(doc_type: DocumentType, normalized_name: &str, ordinal: usize) -> String {
    if ordinal <= 1 {
        format!("{doc_type}-{normalized_name}.pdf")
    } else {
        format!("{doc_type}-{normalized_name}-{ordinal}.pdf")
    }
}

/// Storage filenames for a request's files, in input order.
pub fn plan_names(doc_types: &[DocumentType], name: &str) -> Vec<String> {
    let normalized = normalize_name(name);
    let mut seen: HashMap<DocumentType, usize> = HashMap::new();
    doc_types
        .iter()
        .map(|&doc_type| {
            let ordinal = seen.entry(doc_type).or_insert(0);
            *ordinal += 1;
            storage_name(doc_type, &normalized, *ordinal)
        })
        .collect()
}
