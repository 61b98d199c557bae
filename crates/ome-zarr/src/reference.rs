use ome_ngff::{ElementKind, Node, NodeKind, Ref};

use crate::context::{Context, Located};
use crate::document::read_json_file;
use crate::error::{Error, Result};
use crate::resolve::Resolve;

/// Loads the document a reference with a location points to and checks that it is the node the
/// reference names.
///
/// `context` is the context of the document holding `reference`. Only file locations are
/// supported as targets, store locations fail with [`Error::Unimplemented`].
pub fn resolve_external(reference: &Ref, context: &Context, expected: NodeKind) -> Result<Node> {
    let Some(location) = &reference.path else {
        return Err(Error::NotExternal(reference.reference.clone()));
    };
    let node = match location.resolve(context)? {
        Located::File(path) => read_json_file(&path)?.node,
        Located::Store(_) => {
            return Err(Error::Unimplemented(
                "resolving references to documents stored in a Zarr hierarchy",
            ))
        }
    };
    if node.id() != reference.reference {
        return Err(Error::IdMismatch {
            expected: reference.reference.clone(),
            found: node.id().to_string(),
        });
    }
    if node.kind() != expected {
        return Err(ome_ngff::Error::KindMismatch {
            id: reference.reference.clone(),
            expected: ElementKind::from(expected),
            found: ElementKind::from(node.kind()),
        }
        .into());
    }
    log::debug!("resolved external reference `{}` via {}", reference.reference, location);
    Ok(node)
}
