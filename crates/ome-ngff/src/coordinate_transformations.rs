use serde::{Deserialize, Serialize};

use crate::reference::Ref;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub input: Ref,
    pub output: Ref,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub translation: Vec<f64>,

    pub input: Ref,
    pub output: Ref,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(default)]
    pub scale: Vec<f64>,

    pub input: Ref,
    pub output: Ref,
}

impl Scale {
    pub fn new(scale: Vec<f64>, input: Ref, output: Ref) -> Self {
        Self {
            scale,
            input,
            output,
        }
    }
}

/// Maps coordinates of `input` to coordinates of `output`. Both are expected to refer to
/// coordinate systems (or to the node the transformation belongs to), which is up to the
/// caller to check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(tag = "type")]
pub enum CoordinateTransformation {
    Identity(Identity),
    Translation(Translation),
    Scale(Scale),
}

impl CoordinateTransformation {
    pub fn input(&self) -> &Ref {
        match self {
            CoordinateTransformation::Identity(t) => &t.input,
            CoordinateTransformation::Translation(t) => &t.input,
            CoordinateTransformation::Scale(t) => &t.input,
        }
    }

    pub fn output(&self) -> &Ref {
        match self {
            CoordinateTransformation::Identity(t) => &t.output,
            CoordinateTransformation::Translation(t) => &t.output,
            CoordinateTransformation::Scale(t) => &t.output,
        }
    }

    /// The per-axis vector of scale factors or offsets. `None` for identities.
    pub fn vector(&self) -> Option<&[f64]> {
        match self {
            CoordinateTransformation::Identity(_) => None,
            CoordinateTransformation::Translation(t) => Some(&t.translation),
            CoordinateTransformation::Scale(t) => Some(&t.scale),
        }
    }
}

impl From<Scale> for CoordinateTransformation {
    fn from(scale: Scale) -> Self {
        CoordinateTransformation::Scale(scale)
    }
}
