use ngff_collections::ome_ngff::{
    collect_all, validate_references, Attributes, Axis, Collection, CoordinateSystem, Multiscale,
    Node, PathRef, Ref, Root, Scale, SingleScale, Tree, UnknownReference,
};
use ngff_collections::ome_zarr::{self, LoadOptions};
use ngff_collections::zarr_store::{DataType, Group, PersistenceMode};
use ngff_collections::Report;
use serde_json::{json, Value};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn world() -> CoordinateSystem {
    CoordinateSystem::with_id("w0", "world", vec![Axis::space("x", None)])
}

fn scenario_a() -> SingleScale {
    SingleScale {
        id: "s0".to_string(),
        attributes: Attributes {
            coordinate_systems: vec![world()],
            coordinate_transformations: vec![Scale::new(
                vec![1.0, 1.0, 1.0],
                Ref::local("s0"),
                Ref::local("w0"),
            )
            .into()],
            ..Default::default()
        },
        ..Default::default()
    }
}

fn scenario_b() -> SingleScale {
    let mut scale = scenario_a();
    scale.attributes.coordinate_systems.clear();
    scale
}

#[test]
fn local_references_resolve() {
    init_logging();
    assert_eq!(validate_references(&scenario_a()), Ok(()));
}

#[test]
fn missing_coordinate_system_is_the_only_violation() {
    init_logging();
    assert_eq!(
        validate_references(&scenario_b()),
        Err(vec![UnknownReference {
            reference: "w0".to_string()
        }])
    );
}

#[test]
fn multiscale_scales_merge_stored_attributes() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let group = Group::open(dir.path().join("image.zarr"), PersistenceMode::Create).unwrap();

    let stored = |id: &str, factor: f64| Attributes {
        coordinate_systems: vec![world()],
        coordinate_transformations: vec![Scale::new(vec![factor], Ref::local(id), Ref::local("w0")).into()],
        ..Default::default()
    };
    for (key, id, factor) in [("0", "s0", 1.0), ("1", "s1", 2.0)] {
        let array = group
            .create_array(key, vec![16], DataType::Uint16, false)
            .unwrap();
        let scale = SingleScale {
            id: id.to_string(),
            attributes: stored(id, factor),
            ..Default::default()
        };
        ome_zarr::write_array(&Root::new(scale), &array).unwrap();
    }

    let mut local = Attributes::default();
    local.other.insert("note".to_string(), json!("declared in the multiscale"));
    let multiscale = Multiscale {
        id: "m0".to_string(),
        name: Some("image".to_string()),
        nodes: vec![
            SingleScale {
                id: "s0".to_string(),
                path: Some(PathRef::store("./0")),
                attributes: local.clone(),
                ..Default::default()
            },
            SingleScale {
                id: "s1".to_string(),
                path: Some(PathRef::store("./1")),
                attributes: Attributes::default(),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    ome_zarr::write_group(&Root::new(multiscale), &group).unwrap();

    let loaded = ome_zarr::read_multiscale(&group).unwrap();
    assert_eq!(loaded.nodes[0].attributes, local.merge_over(stored("s0", 1.0)));
    assert_eq!(loaded.nodes[1].attributes, stored("s1", 2.0));
    assert_eq!(validate_references(&loaded), Ok(()));

    let tree = Tree::new(&loaded);
    let report = Report::new(&tree).unwrap();
    assert_eq!(report.ids(), &["m0", "s0", "w0", "s1"]);
}

#[test]
fn documents_round_trip_through_a_store() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let group = Group::open(dir.path().join("collection.zarr"), PersistenceMode::Create).unwrap();
    let collection = Collection {
        id: "c0".to_string(),
        name: Some("experiment".to_string()),
        nodes: vec![
            Node::from(scenario_a()),
            Node::from(Multiscale {
                id: "m0".to_string(),
                attributes: Attributes {
                    coordinate_systems: vec![world()],
                    ..Default::default()
                },
                ..Default::default()
            }),
        ],
        ..Default::default()
    };
    let root = Root::new(collection);
    ome_zarr::write_group(&root, &group).unwrap();

    let loaded = ome_zarr::read_group(&group, &LoadOptions::default()).unwrap();
    assert_eq!(loaded, root);

    let written = serde_json::to_string(&root).unwrap();
    let rewritten = serde_json::to_string(&loaded).unwrap();
    assert_eq!(written, rewritten);
    let value: Value = serde_json::from_str(&written).unwrap();
    assert!(value["ome"]["nodes"][1].get("nodes").is_none());
    assert!(value["ome"]["nodes"][1]["attributes"].get("coordinateSystems").is_some());
}

#[test]
fn walk_terminates_on_aliased_nodes() {
    init_logging();
    let collection = Collection {
        id: "c0".to_string(),
        nodes: vec![Node::from(scenario_a())],
        ..Default::default()
    };
    let mut tree = Tree::new(&collection);
    let scale = tree.position("s0").unwrap();
    tree.link(scale, Tree::ROOT);
    tree.link(Tree::ROOT, scale);
    assert_eq!(tree.collect_all(None).len(), collect_all(&collection, None).len());
}

#[test]
fn report_matches_script_output() {
    init_logging();
    let scale = scenario_a();
    let tree = Tree::new(&scale);
    assert_eq!(
        Report::new(&tree).unwrap().to_string(),
        "Collected IDs:\n - s0\n - w0\nCollected Refs:\n - s0\n - w0\n"
    );
}
