use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coordinate_system::CoordinateSystem;
use crate::coordinate_transformations::CoordinateTransformation;

/// The structured payload of a node.
///
/// Both known keys are written in camelCase and accepted in either spelling. Keys that are not
/// known are kept as they are.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(rename = "coordinateSystems", alias = "coordinate_systems")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coordinate_systems: Vec<CoordinateSystem>,

    #[serde(rename = "coordinateTransformations", alias = "coordinate_transformations")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coordinate_transformations: Vec<CoordinateTransformation>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Attributes {
    /// True if the canonical form of these attributes is an empty mapping.
    pub fn is_empty(&self) -> bool {
        self.coordinate_systems.is_empty()
            && self.coordinate_transformations.is_empty()
            && self.other.is_empty()
    }

    /// Shallow key-level merge: every key present in `self` wins, `external` fills in the rest.
    /// An empty list counts as absent, just like in the canonical form.
    pub fn merge_over(self, external: Attributes) -> Attributes {
        let mut other = external.other;
        other.extend(self.other);
        Attributes {
            coordinate_systems: if self.coordinate_systems.is_empty() {
                external.coordinate_systems
            } else {
                self.coordinate_systems
            },
            coordinate_transformations: if self.coordinate_transformations.is_empty() {
                external.coordinate_transformations
            } else {
                self.coordinate_transformations
            },
            other,
        }
    }
}
