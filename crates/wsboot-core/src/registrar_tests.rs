use super::*;
use crate::testing::MockRegistry;
use mockall::Sequence;
use std::collections::BTreeSet;
use wsboot_protocols::{DeploymentError, EndpointAnnotation, EndpointConfig, PojoEndpoint};

fn config(name: &str, path: &str) -> EndpointConfig {
    EndpointConfig::new(name, path)
}

fn pojo(name: &str, path: &str) -> PojoEndpoint {
    PojoEndpoint::new(name, EndpointAnnotation::new(path))
}

#[test]
fn test_empty_deployment_registers_nothing() {
    let mut registry = MockRegistry::new();
    registry.expect_add_endpoint().never();
    registry.expect_add_pojo_endpoint().never();

    let report = Registrar::new(&registry)
        .register(&Deployment::default())
        .unwrap();

    assert_eq!(report, RegistrationReport::default());
    assert_eq!(report.total(), 0);
}

#[test]
fn test_configs_registered_before_pojos() {
    let mut seq = Sequence::new();
    let mut registry = MockRegistry::new();
    registry
        .expect_add_endpoint()
        .times(2)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    registry
        .expect_add_pojo_endpoint()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let deployment = Deployment {
        configs: BTreeSet::from([config("chat::A", "/a"), config("chat::B", "/b")]),
        pojos: BTreeSet::from([pojo("chat::Echo", "/echo")]),
    };

    let report = Registrar::new(&registry).register(&deployment).unwrap();

    assert_eq!(report.endpoints, 2);
    assert_eq!(report.pojos, 1);
    assert_eq!(report.total(), 3);
}

#[test]
fn test_each_entity_registered_once() {
    let mut registry = MockRegistry::new();
    registry
        .expect_add_endpoint()
        .withf(|c| c.path == "/feed")
        .times(1)
        .returning(|_| Ok(()));
    registry
        .expect_add_pojo_endpoint()
        .withf(|p| p.class.as_str() == "chat::Echo")
        .times(1)
        .returning(|_| Ok(()));

    let deployment = Deployment {
        configs: BTreeSet::from([config("chat::Feed", "/feed")]),
        pojos: BTreeSet::from([pojo("chat::Echo", "/echo")]),
    };

    Registrar::new(&registry).register(&deployment).unwrap();
}

#[test]
fn test_config_failure_aborts_remaining() {
    let mut registry = MockRegistry::new();
    registry
        .expect_add_endpoint()
        .withf(|c| c.path == "/a")
        .times(1)
        .returning(|_| Ok(()));
    registry
        .expect_add_endpoint()
        .withf(|c| c.path == "/b")
        .times(1)
        .returning(|c| {
            Err(DeploymentError::DuplicatePath {
                path: c.path,
                existing: "chat::Older".into(),
            })
        });
    registry.expect_add_pojo_endpoint().never();

    let deployment = Deployment {
        configs: BTreeSet::from([
            config("chat::A", "/a"),
            config("chat::B", "/b"),
            config("chat::C", "/c"),
        ]),
        pojos: BTreeSet::from([pojo("chat::Echo", "/echo")]),
    };

    let err = Registrar::new(&registry).register(&deployment).unwrap_err();
    match err {
        StartupError::Deployment { entity, source } => {
            assert_eq!(entity, DeployedEntity::Config(config("chat::B", "/b")));
            assert!(matches!(source, DeploymentError::DuplicatePath { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pojo_failure_names_pojo() {
    let mut registry = MockRegistry::new();
    registry.expect_add_endpoint().returning(|_| Ok(()));
    registry
        .expect_add_pojo_endpoint()
        .returning(|_| Err(DeploymentError::ContainerClosed));

    let deployment = Deployment {
        configs: BTreeSet::from([config("chat::Feed", "/feed")]),
        pojos: BTreeSet::from([pojo("chat::Echo", "/echo")]),
    };

    let err = Registrar::new(&registry).register(&deployment).unwrap_err();
    assert!(err.to_string().contains("annotated endpoint chat::Echo"));
    assert!(err.to_string().contains("closed"));
}
