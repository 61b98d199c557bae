use thiserror::Error;

use crate::walk::ElementKind;

/// A symbolic reference whose target id is not part of the tree it was resolved against.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("reference `{reference}` does not point to any known id")]
pub struct UnknownReference {
    pub reference: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A document does not match the expected shape. `path` is the dotted path of the offending
    /// field, e.g. `ome.nodes[1].attributes`.
    #[error("{path}: {message}")]
    Validation { path: String, message: String },

    #[error("{path}: unknown node kind `{kind}`")]
    UnknownNodeKind { path: String, kind: String },

    #[error("single scale `{id}` carries a path reference and can only be written inline")]
    UnsupportedWrite { id: String },

    #[error(transparent)]
    UnknownReference(#[from] UnknownReference),

    #[error("{} unresolved reference(s): {}", .0.len(), join_references(.0))]
    UnresolvedReferences(Vec<UnknownReference>),

    #[error("`{id}` refers to a {found}, expected a {expected}")]
    KindMismatch {
        id: String,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("id `{0}` is used by more than one distinct element")]
    DuplicateId(String),
}

impl Error {
    pub(crate) fn validation(path: impl ToString, message: impl ToString) -> Error {
        Error::Validation {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

fn join_references(references: &[UnknownReference]) -> String {
    references
        .iter()
        .map(|r| format!("`{}`", r.reference))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_references_message_lists_all() {
        let error = Error::UnresolvedReferences(vec![
            UnknownReference { reference: "a".to_string() },
            UnknownReference { reference: "b".to_string() },
        ]);
        assert_eq!(error.to_string(), "2 unresolved reference(s): `a`, `b`");
    }

    #[test]
    fn validation_message_carries_path() {
        let error = Error::validation("ome.nodes[0].name", "invalid type");
        assert_eq!(error.to_string(), "ome.nodes[0].name: invalid type");
    }
}
