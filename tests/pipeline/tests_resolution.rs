//! Closure resolution against a populated store.

use crate::helpers::*;
use modelrepo::{DependencyResolver, InMemoryStore, Model, ModelKind, ModelStore, RegistryError};
use std::collections::HashSet;

fn chain_store(width: usize) -> InMemoryStore {
    // Root references every layer member; each member references the shared leaf.
    let leaf = format!(r#"{{"id": "org.test.Leaf:1", "kind": "Datatype"}}"#);
    let mut models = vec![Model::from_document(leaf.into_bytes()).unwrap()];
    let mut members = Vec::new();
    for i in 0..width {
        let member = format!("org.test.Member{i}:1");
        let doc = format!(
            r#"{{"id": "{member}", "kind": "Functionblock", "references": ["org.test.Leaf:1"]}}"#
        );
        models.push(Model::from_document(doc.into_bytes()).unwrap());
        members.push(format!("\"{member}\""));
    }
    let root = format!(
        r#"{{"id": "org.test.Root:1", "kind": "InformationModel", "references": [{}]}}"#,
        members.join(", ")
    );
    models.push(Model::from_document(root.into_bytes()).unwrap());
    InMemoryStore::with_models(models).unwrap()
}

#[test]
fn test_thermostat_closure() {
    let store = base_store();
    let closure = DependencyResolver::new(&store).resolve(&id(THERMOSTAT)).unwrap();
    let ids: Vec<String> = closure.identifiers().map(|i| i.to_pretty()).collect();
    assert_eq!(ids, vec![THERMOSTAT, TEMPERATURE]);
}

#[test]
fn test_every_identifier_once_with_shared_leaf() {
    let store = chain_store(25);
    let closure = DependencyResolver::new(&store)
        .resolve(&id("org.test.Root:1"))
        .unwrap();
    assert_eq!(closure.len(), 27);
    let unique: HashSet<_> = closure.identifiers().collect();
    assert_eq!(unique.len(), closure.len());
    assert_eq!(closure.root().kind(), ModelKind::InformationModel);
    // The leaf is discovered through the first member.
    assert_eq!(closure.models()[2].identifier(), &id("org.test.Leaf:1"));
}

#[test]
fn test_resolution_is_deterministic() {
    let store = chain_store(10);
    let resolver = DependencyResolver::new(&store);
    let first = resolver.resolve(&id("org.test.Root:1")).unwrap();
    let second = resolver.resolve(&id("org.test.Root:1")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_closure_members_match_direct_fetches() {
    let store = full_store();
    let closure = DependencyResolver::new(&store).resolve(&id(LWM2M_MAPPING)).unwrap();
    assert_eq!(closure.len(), 3);
    for model in &closure {
        let direct = store.get(model.identifier()).unwrap().unwrap();
        assert_eq!(direct.content(), model.content());
    }
}

#[test]
fn test_missing_root_reports_root() {
    let store = base_store();
    let err = DependencyResolver::new(&store)
        .resolve(&id("com.acme.Missing:1.0.0"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::ModelNotFound(ref m) if *m == id("com.acme.Missing:1.0.0")
    ));
}

#[test]
fn test_dangling_reference_reports_parent() {
    let store = InMemoryStore::with_models([thermostat()]).unwrap();
    let err = DependencyResolver::new(&store).resolve(&id(THERMOSTAT)).unwrap_err();
    match err {
        RegistryError::DanglingReference { parent, missing } => {
            assert_eq!(parent, id(THERMOSTAT));
            assert_eq!(missing, id(TEMPERATURE));
        }
        other => panic!("unexpected error: {other}"),
    }
}
