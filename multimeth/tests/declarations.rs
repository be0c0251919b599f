//! Item-level declarations collected with `inventory`.

use multimeth::{
    BoxError, Dispatcher, MultimethodError, Registry, RegistryError, declarations,
    install_declarations, install_declarations_for,
};

mod common;
use common::Value;

multimeth::declare_method!("describe", "int", |(v,): (Value,)| {
    Ok(format!("an int: {v:?}"))
});

multimeth::declare_method!("orphaned", multimeth::DEFAULT, |_: (Value,)| Ok(()));

#[cfg(feature = "macros")]
#[multimeth::method(dispatcher = "describe", key = "str")]
fn describe_str((v,): (Value,)) -> Result<String, BoxError> {
    match v {
        Value::Str(s) => Ok(format!("a string of {} bytes", s.len())),
        other => Err(format!("expected a string, got {other:?}").into()),
    }
}

#[cfg(feature = "macros")]
#[multimeth::method(dispatcher = "describe", key = default)]
fn describe_other(_: (Value,)) -> Result<String, BoxError> {
    Ok("something else".to_string())
}

const DESCRIBE_METHODS: usize = if cfg!(feature = "macros") { 3 } else { 1 };

fn describe_in(registry: &Registry) -> Dispatcher<(Value,), String> {
    Dispatcher::create_in(registry, "describe", |(v,): &(Value,)| Ok(v.kind())).unwrap()
}

#[test]
fn test_declarations_are_collected() {
    let describe = declarations()
        .filter(|d| d.dispatcher() == "describe")
        .count();
    assert_eq!(describe, DESCRIBE_METHODS);
    assert!(declarations().any(|d| d.dispatcher() == "orphaned"));
}

#[test]
fn test_install_for_one_dispatcher() {
    let registry = Registry::new();
    let describe = describe_in(&registry);

    let installed = install_declarations_for(&registry, "describe").unwrap();
    assert_eq!(installed, DESCRIBE_METHODS);

    assert_eq!(
        describe.invoke((Value::Int(5),)).unwrap(),
        "an int: Int(5)"
    );
    #[cfg(feature = "macros")]
    {
        assert_eq!(
            describe.invoke((Value::str("abc"),)).unwrap(),
            "a string of 3 bytes"
        );
        assert_eq!(describe.invoke((Value::Null,)).unwrap(), "something else");
    }
}

#[test]
fn test_install_requires_existing_dispatchers() {
    let registry = Registry::new();
    let _describe = describe_in(&registry);

    // "orphaned" has no dispatcher in this registry.
    let result = install_declarations(&registry);
    assert!(matches!(
        result,
        Err(MultimethodError::Registry(RegistryError::UnknownDispatcher(ref name)))
            if name == "orphaned"
    ));
    assert!(!registry.contains("orphaned"));
}

#[test]
fn test_install_all_once_targets_exist() {
    let registry = Registry::new();
    let describe = describe_in(&registry);
    let orphaned: Dispatcher<(Value,), ()> =
        Dispatcher::create_in(&registry, "orphaned", |_: &(Value,)| Ok::<_, BoxError>(())).unwrap();

    let installed = install_declarations(&registry).unwrap();
    assert_eq!(installed, DESCRIBE_METHODS + 1);
    assert!(orphaned.has_default());
    assert_eq!(describe.len(), DESCRIBE_METHODS.min(2));
}
