//! Independent requests sharing one store across threads.

use crate::helpers::*;
use modelrepo::ModelRegistry;
use std::sync::Arc;
use std::thread;

#[test]
fn test_parallel_requests_agree() {
    let registry = Arc::new(ModelRegistry::new(Arc::new(full_store())));
    let expected = registry.bundle(&id(LWM2M_MAPPING)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let platform = if i % 2 == 0 { "lwm2m" } else { "ble" };
                let content = registry
                    .content_for_platform(&id(THERMOSTAT), platform)
                    .unwrap();
                let bundle = registry.bundle(&id(LWM2M_MAPPING)).unwrap();
                (content.target_platform, bundle)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (platform, bundle) = handle.join().unwrap();
        let want = if i % 2 == 0 { "lwm2m" } else { "ble" };
        assert_eq!(platform.as_deref(), Some(want));
        assert_eq!(bundle, expected);
    }
}

#[test]
fn test_publish_while_resolving() {
    let store = Arc::new(base_store());
    let registry = Arc::new(ModelRegistry::new(Arc::clone(&store)));

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..50 {
                registry.resolve(&id(THERMOSTAT)).unwrap();
            }
        })
    };
    store.publish(lwm2m_mapping()).unwrap();
    reader.join().unwrap();

    let content = registry.content_for_platform(&id(THERMOSTAT), "lwm2m").unwrap();
    assert!(content.is_mapped());
}
