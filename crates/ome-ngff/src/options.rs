use serde::{Deserialize, Serialize};

/// What to do when two elements of a tree share an id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateIds {
    /// The element visited last is kept.
    #[default]
    #[serde(rename = "lastWins")]
    LastWins,

    /// Two structurally different elements with the same id are an error. Identical copies, e.g.
    /// a coordinate system repeated in every merged scale, are tolerated.
    #[serde(rename = "reject")]
    Reject,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    #[serde(rename = "duplicateIds")]
    pub duplicate_ids: DuplicateIds,

    /// Limits how deep the tree is walked. `None` walks the whole tree.
    #[serde(rename = "maxDepth")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_str;

    #[test]
    fn deserialize_defaults() {
        assert_eq!(from_str::<ValidationOptions>("{}").unwrap(), ValidationOptions::default());
    }

    #[test]
    fn deserialize_reject() {
        let options = from_str::<ValidationOptions>(r#"{"duplicateIds": "reject", "maxDepth": 3}"#).unwrap();
        assert_eq!(options.duplicate_ids, DuplicateIds::Reject);
        assert_eq!(options.max_depth, Some(3));
    }
}
