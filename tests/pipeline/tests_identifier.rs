//! Identifier grammar properties.

use modelrepo::{Identifier, RegistryError};
use proptest::prelude::*;
use rstest::rstest;

fn pretty_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z0-9_]{1,8}", 1..4),
        "[A-Z][A-Za-z0-9_]{0,10}",
        "[A-Za-z0-9_.]{1,10}",
    )
        .prop_map(|(segments, name, version)| {
            format!("{}.{}:{}", segments.join("."), name, version)
        })
}

proptest! {
    #[test]
    fn pretty_form_roundtrips(s in pretty_strategy()) {
        let id = Identifier::parse_pretty(&s).unwrap();
        prop_assert_eq!(id.to_pretty(), s);
    }

    #[test]
    fn triple_roundtrips(s in pretty_strategy()) {
        let id = Identifier::parse_pretty(&s).unwrap();
        let again = Identifier::parse_pretty(&id.to_pretty()).unwrap();
        prop_assert_eq!(again, id);
    }

    #[test]
    fn text_without_version_separator_is_rejected(s in "[A-Za-z0-9_.]{0,30}") {
        prop_assert!(Identifier::parse_pretty(&s).is_err());
    }

    #[test]
    fn lowercase_names_are_rejected(
        ns in "[a-z]{1,8}",
        name in "[a-z][a-z0-9_]{0,8}",
        version in "[0-9]{1,3}",
    ) {
        let text = format!("{ns}.{name}:{version}");
        prop_assert!(Identifier::parse_pretty(&text).is_err());
    }
}

#[rstest]
#[case("com.acme.Thermostat", "1.0.0", "com.acme", "Thermostat")]
#[case("Org.Eclipse.Vorto.Switch", "2", "org.eclipse.vorto", "Switch")]
#[case("a.b", "v1", "a", "b")]
fn test_from_qualified_name_and_version(
    #[case] qualified: &str,
    #[case] version: &str,
    #[case] namespace: &str,
    #[case] name: &str,
) {
    let id = Identifier::from_qualified_name_and_version(qualified, version).unwrap();
    assert_eq!(id.namespace(), namespace);
    assert_eq!(id.name(), name);
    assert_eq!(id.version(), version);
}

#[test]
fn test_spec_example_identifier() {
    let id = Identifier::from_qualified_name_and_version("com.acme.Thermostat", "1.0.0").unwrap();
    assert_eq!(id, Identifier::new("com.acme", "Thermostat", "1.0.0"));
    assert_eq!(id, "com.acme.Thermostat:1.0.0".parse().unwrap());
}

#[test]
fn test_malformed_surfaces_as_registry_error() {
    fn parse(text: &str) -> Result<Identifier, RegistryError> {
        Ok(Identifier::parse_pretty(text)?)
    }
    let err = parse("com.acme.Thermostat").unwrap_err();
    assert!(matches!(err, RegistryError::MalformedIdentifier(_)));
    assert!(err.to_string().contains("com.acme.Thermostat"));
}
