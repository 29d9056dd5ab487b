//! Archive round-trips over resolved closures.

use crate::helpers::*;
use modelrepo::config::{ArchiveConfig, Compression, RegistryConfig};
use modelrepo::{
    ArchiveBuilder, ArchiveReader, DependencyResolver, InMemoryStore, Model, ModelRegistry,
    ModelStore, RegistryError,
};
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
#[case(Compression::Stored)]
#[case(Compression::Deflated)]
fn test_read_build_resolve_matches_direct_fetches(#[case] compression: Compression) {
    let store = full_store();
    let closure = DependencyResolver::new(&store).resolve(&id(LWM2M_MAPPING)).unwrap();
    let builder = ArchiveBuilder::new(ArchiveConfig { compression });

    let bytes = builder.build_bytes(&closure).unwrap();
    let models = ArchiveReader::new()
        .read(&ArchiveReader::new().open(&bytes).unwrap())
        .unwrap();

    let read_back: BTreeMap<String, Vec<u8>> = models
        .iter()
        .map(|m| (m.identifier().to_pretty(), m.content().to_vec()))
        .collect();
    let direct: BTreeMap<String, Vec<u8>> = closure
        .identifiers()
        .map(|i| {
            let model = store.get(i).unwrap().unwrap();
            (i.to_pretty(), model.content().to_vec())
        })
        .collect();
    assert_eq!(read_back, direct);
}

#[test]
fn test_thermostat_archive_example() {
    let registry = ModelRegistry::new(base_store());
    let bytes = registry.bundle(&id(THERMOSTAT)).unwrap();

    let archive = ArchiveReader::new().open(&bytes).unwrap();
    assert_eq!(
        archive.paths().collect::<Vec<_>>(),
        vec![
            "com/acme/Thermostat-1.0.0.fbmodel",
            "com/acme/types/Temperature-1.0.0.type"
        ]
    );

    let closure = ArchiveReader::new().read_closure(&archive).unwrap();
    assert_eq!(closure.len(), 2);
    assert_eq!(closure.root().content(), thermostat().content());
    assert_eq!(closure.models()[1].content(), temperature().content());
}

#[test]
fn test_bundles_are_byte_identical_across_registries() {
    let first = ModelRegistry::new(full_store())
        .bundle(&id(LWM2M_MAPPING))
        .unwrap();
    let second = ModelRegistry::new(full_store())
        .bundle(&id(LWM2M_MAPPING))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stored_config_applies_to_bundles() {
    let config = RegistryConfig {
        archive: ArchiveConfig {
            compression: Compression::Stored,
        },
        ..RegistryConfig::default()
    };
    let registry = ModelRegistry::with_config(base_store(), config).unwrap();
    let bytes = registry.bundle(&id(THERMOSTAT)).unwrap();
    // Stored entries keep the raw document text visible in the container.
    let needle = thermostat().content().to_vec();
    assert!(bytes.windows(needle.len()).any(|w| w == needle.as_slice()));
}

#[test]
fn test_missing_root_produces_no_archive() {
    let registry = ModelRegistry::new(base_store());
    let err = registry.bundle(&id("com.acme.Missing:1.0.0")).unwrap_err();
    assert!(matches!(err, RegistryError::ModelNotFound(_)));
    let err = registry
        .download(&id("com.acme.Missing:1.0.0"), true)
        .unwrap_err();
    assert!(matches!(err, RegistryError::ModelNotFound(_)));
}

#[test]
fn test_published_raw_documents_read_back_unchanged() {
    // Hand-written bytes, not the serializer's canonical form.
    let thermostat = br#"{"kind":"Functionblock","id":"com.acme.Thermostat:1.0.0",
        "references":["com.acme.types.Temperature:1.0.0","com.acme.types.Temperature:1.0.0"]}"#;
    let temperature = br#"{ "id": "com.acme.types.Temperature:1.0.0", "kind": "Datatype" }"#;
    let store = InMemoryStore::with_models([
        Model::from_document(thermostat.to_vec()).unwrap(),
        Model::from_document(temperature.to_vec()).unwrap(),
    ])
    .unwrap();

    let closure = DependencyResolver::new(&store).resolve(&id(THERMOSTAT)).unwrap();
    assert_eq!(closure.root().references(), &[id(TEMPERATURE)]);

    let bytes = ArchiveBuilder::default().build_bytes(&closure).unwrap();
    let back = ArchiveReader::new().read_bytes(&bytes).unwrap();
    assert_eq!(back.models(), closure.models());
    assert_eq!(back.root().content(), thermostat);
}

#[test]
fn test_non_document_content_never_reaches_a_store() {
    let err = Model::from_document(b"functionblock Thermostat {}".to_vec()).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidDocument(_)));

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("thermostat.json"), "functionblock Thermostat {}").unwrap();
    let store = InMemoryStore::new();
    let err = store.load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidDocument(_)));
    assert!(store.is_empty());
}
