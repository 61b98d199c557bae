use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Space,
    Time,
    Channel,
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AxisType::Space => "space",
            AxisType::Time => "time",
            AxisType::Channel => "channel",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,

    #[serde(rename = "type")]
    pub axis_type: AxisType,

    // free-form, e.g. "micrometer" or "millisecond"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Axis {
    pub fn new(name: impl Into<String>, axis_type: AxisType, unit: Option<&str>) -> Self {
        Self {
            name: name.into(),
            axis_type,
            unit: unit.map(str::to_string),
        }
    }

    pub fn space(name: impl Into<String>, unit: Option<&str>) -> Self {
        Axis::new(name, AxisType::Space, unit)
    }

    pub fn time(name: impl Into<String>, unit: Option<&str>) -> Self {
        Axis::new(name, AxisType::Time, unit)
    }

    pub fn channel(name: impl Into<String>) -> Self {
        Axis::new(name, AxisType::Channel, None)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{from_str, to_string, Value};
    use super::*;

    fn space_no_unit_json() -> String {
        r#"{"name": "x", "type": "space"}"#.to_string()
    }

    fn space_json() -> String {
        r#"{"name": "z", "type": "space", "unit": "micrometer"}"#.to_string()
    }

    fn time_json() -> String {
        r#"{"name": "t", "type": "time", "unit": "millisecond"}"#.to_string()
    }

    fn channel_json() -> String {
        r#"{"name": "c", "type": "channel"}"#.to_string()
    }

    fn custom_json() -> String {
        r#"{"name": "foo", "type": "bar"}"#.to_string()
    }

    fn missing_name_json() -> String {
        r#"{"type": "space"}"#.to_string()
    }

    #[test]
    fn serialize_space_no_unit() {
        assert_eq!(
            from_str::<Value>(&to_string(&Axis::space("x", None)).unwrap()).unwrap(),
            from_str::<Value>(&space_no_unit_json()).unwrap()
        );
    }

    #[test]
    fn deserialize_space() {
        assert_eq!(
            from_str::<Axis>(&space_json()).unwrap(),
            Axis::space("z", Some("micrometer"))
        );
    }

    #[test]
    fn deserialize_time() {
        let axis = from_str::<Axis>(&time_json()).unwrap();
        assert_eq!(axis.axis_type, AxisType::Time);
        assert_eq!(axis.unit.as_deref(), Some("millisecond"));
    }

    #[test]
    fn serialize_channel() {
        assert_eq!(
            from_str::<Value>(&to_string(&Axis::channel("c")).unwrap()).unwrap(),
            from_str::<Value>(&channel_json()).unwrap()
        );
    }

    #[test]
    #[should_panic]
    fn deserialize_custom_type() {
        from_str::<Axis>(&custom_json()).unwrap();
    }

    #[test]
    #[should_panic]
    fn deserialize_missing_name() {
        from_str::<Axis>(&missing_name_json()).unwrap();
    }
}
