//! Soft checks. They log a warning (with the `log` feature) and return `false` instead of
//! failing, since documents violating them are still readable. Loaders run them whenever
//! reference validation is requested.

use std::collections::HashSet;

use crate::axis::AxisType;
use crate::coordinate_system::CoordinateSystem;
use crate::util::warn_unless;
use crate::walk::{Element, ElementKind, Tree};

pub fn is_valid(tree: &Tree) -> bool {
    let coordinate_systems_valid = tree
        .collect_all(None)
        .iter()
        .filter_map(Element::as_coordinate_system)
        .fold(true, |valid, cs| are_axes_valid(cs) && valid);
    are_transformation_dimensions_valid(tree) && coordinate_systems_valid
}

/// Checks that every scale or translation vector has as many entries as the coordinate system
/// its output refers to has axes. Outputs that do not resolve locally are skipped.
pub fn are_transformation_dimensions_valid(tree: &Tree) -> bool {
    let ids = tree.collect_ids();
    tree.collect_all(None)
        .iter()
        .filter_map(|element| match element {
            Element::Transformation(t) => Some(*t),
            _ => None,
        })
        .fold(true, |valid, transformation| {
            let Some(vector) = transformation.vector() else {
                return valid;
            };
            let Ok(output) = transformation
                .output()
                .resolve_local_as(&ids, ElementKind::CoordinateSystem)
            else {
                return valid;
            };
            let dimensions = output
                .as_coordinate_system()
                .map_or(vector.len(), CoordinateSystem::dimensions);
            warn_unless!(
                vector.len() == dimensions,
                "The length of a scale or translation must match the axes of its output `{}`. Got (axes,transformation): ({},{})",
                transformation.output().reference,
                dimensions,
                vector.len(),
            ) && valid
        })
}

/// At most one time and one channel axis, and no axis name twice.
pub fn are_axes_valid(coordinate_system: &CoordinateSystem) -> bool {
    let time_count = coordinate_system.get_axes(AxisType::Time).len();
    let channel_count = coordinate_system.get_axes(AxisType::Channel).len();
    let mut names = HashSet::new();
    let names_unique = coordinate_system.axes.iter().all(|a| names.insert(a.name.as_str()));
    warn_unless!(
        time_count <= 1 && channel_count <= 1,
        "Coordinate system `{}` may contain at most one time and one channel axis. Got (time,channel): ({},{})",
        coordinate_system.id,
        time_count,
        channel_count,
    ) && warn_unless!(
        names_unique,
        "Axis names of coordinate system `{}` must be unique.",
        coordinate_system.id,
    )
}
