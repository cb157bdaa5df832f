use verity_core::prelude::*;
use verity_params::ConfigError;
use verity_test_utils::{scripted_engine, Documents};

#[test]
fn test_function_section_overrides_global() {
    let docs = Documents::new();
    let path = docs.write("params.yaml", "global:\n  x: 1\nf:\n  x: 2\n");
    let engine = scripted_engine();

    let f = engine
        .using_params(&path)
        .inject(Signature::new("f", ["x"]), |p: &Params| p.get::<i64>("x").map_err(anyhow::Error::from));

    assert_eq!(f.call(Params::new()).unwrap(), 2);
}

#[test]
fn test_unmatched_keys_are_ignored() {
    let docs = Documents::new();
    let path = docs.write("params.json", r#"{"global": {"z": 9}}"#);
    let engine = scripted_engine();

    let f = engine.using_params(&path).inject(Signature::new("f", ["x"]), |p: &Params| {
        Ok::<_, anyhow::Error>(p.get_or::<i64>("x", 5)? + i64::from(p.contains("z")))
    });

    assert_eq!(f.call(Params::new()).unwrap(), 5);
}

#[test]
fn test_config_overrides_caller_values() {
    let docs = Documents::new();
    let path = docs.write("params.yml", "global:\n  seed: 7\n");
    let engine = scripted_engine();

    let f = engine
        .using_params(&path)
        .inject(Signature::new("train", ["seed", "epochs"]), |p: &Params| {
            Ok::<_, anyhow::Error>((p.get::<u32>("seed")?, p.get::<u32>("epochs")?))
        });

    let kwargs = Params::new().with("seed", 1).with("epochs", 3);
    assert_eq!(f.call(kwargs).unwrap(), (7, 3));
}

#[test]
fn test_final_arguments_are_reported() {
    let docs = Documents::new();
    let path = docs.write("params.yaml", "global:\n  lr: 0.1\ntrain:\n  lr: 0.01\n");
    let engine = scripted_engine();

    let train = engine
        .using_params(&path)
        .inject(Signature::new("train", ["lr", "epochs"]), |_: &Params| Ok::<_, anyhow::Error>(()));
    train.call(Params::new().with("epochs", 10)).unwrap();

    let recorded = engine
        .report()
        .with_report(|r| r.model_card().parameters().get("train").cloned())
        .unwrap();
    assert_eq!(recorded.get::<f64>("lr").unwrap(), 0.01);
    assert_eq!(recorded.get::<u32>("epochs").unwrap(), 10);
}

#[test]
fn test_report_flag_disables_capture() {
    let docs = Documents::new();
    let path = docs.write("params.yaml", "global:\n  lr: 0.1\n");
    let engine = scripted_engine();

    let train = engine
        .using_params(&path)
        .report(false)
        .inject(Signature::new("train", ["lr"]), |_: &Params| Ok::<_, anyhow::Error>(()));
    train.call(Params::new()).unwrap();

    assert!(engine
        .report()
        .with_report(|r| r.model_card().parameters().is_empty()));
}

#[test]
fn test_missing_document_fails_on_call_not_wrap() {
    let engine = scripted_engine();
    let f = engine
        .using_params("/nonexistent/params.yaml")
        .inject(Signature::new("f", ["x"]), |_: &Params| Ok::<_, anyhow::Error>(()));

    let err = f.call(Params::new()).unwrap_err();
    assert!(err
        .downcast_ref::<ConfigError>()
        .is_some_and(ConfigError::is_not_found));
}

#[test]
fn test_injected_function_can_be_labeled() {
    let docs = Documents::new();
    let path = docs.write("params.yaml", "accuracy_at:\n  threshold: 0.5\n");
    let engine = scripted_engine();

    let check = engine.accuracy().apply(engine.using_params(&path).inject(
        Signature::new("accuracy_at", ["threshold"]),
        |p: &Params| Ok::<_, anyhow::Error>(p.get::<f64>("threshold")? * 2.0),
    ));
    check.call(Params::new()).unwrap();

    let results = engine.report().results();
    assert_eq!(results[0].key(), "accuracy_at");
    assert_eq!(results[0].result().as_f64(), Some(1.0));
    assert!(engine
        .report()
        .with_report(|r| r.model_card().parameters().contains_key("accuracy_at")));
}
