use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AxisType};
use crate::util::random_id;

/// A named set of axes that coordinate transformations map from and to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    #[serde(default = "random_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub axes: Vec<Axis>,
}

impl CoordinateSystem {
    /// Creates a coordinate system with a random id.
    pub fn new(name: impl Into<String>, axes: Vec<Axis>) -> Self {
        Self::with_id(random_id(), name, axes)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, axes: Vec<Axis>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            axes,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    pub fn get_axes(&self, axis_type: AxisType) -> Vec<&Axis> {
        self.axes
            .iter()
            .filter(|a| a.axis_type == axis_type)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, to_string, Value};

    fn world() -> CoordinateSystem {
        CoordinateSystem::with_id(
            "w0",
            "world",
            vec![
                Axis::space("z", Some("micrometer")),
                Axis::space("y", Some("micrometer")),
                Axis::space("x", Some("micrometer")),
            ],
        )
    }

    fn world_json() -> String {
        r#"{
            "id": "w0",
            "name": "world",
            "axes": [
                {"name": "z", "type": "space", "unit": "micrometer"},
                {"name": "y", "type": "space", "unit": "micrometer"},
                {"name": "x", "type": "space", "unit": "micrometer"}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn serialize_coordinate_system() {
        assert_eq!(
            from_str::<Value>(&to_string(&world()).unwrap()).unwrap(),
            from_str::<Value>(&world_json()).unwrap()
        );
    }

    #[test]
    fn deserialize_coordinate_system() {
        assert_eq!(from_str::<CoordinateSystem>(&world_json()).unwrap(), world());
    }

    #[test]
    fn missing_id_is_generated() {
        let cs = from_str::<CoordinateSystem>(r#"{"name": "world"}"#).unwrap();
        assert_eq!(cs.id.len(), 36);
        assert!(cs.axes.is_empty());
    }

    #[test]
    fn empty_axes_are_written() {
        let cs = CoordinateSystem::with_id("w0", "world", vec![]);
        assert_eq!(
            from_str::<Value>(&to_string(&cs).unwrap()).unwrap(),
            from_str::<Value>(r#"{"id": "w0", "name": "world", "axes": []}"#).unwrap()
        );
    }

    #[test]
    fn axis_queries() {
        let mut cs = world();
        cs.axes.insert(0, Axis::time("t", None));
        assert_eq!(cs.dimensions(), 4);
        assert_eq!(cs.get_axes(AxisType::Space).len(), 3);
        assert_eq!(cs.get_axes(AxisType::Time)[0].name, "t");
        assert!(cs.get_axes(AxisType::Channel).is_empty());
    }
}
