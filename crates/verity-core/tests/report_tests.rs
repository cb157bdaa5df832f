use pretty_assertions::assert_eq;
use verity_core::prelude::*;
use verity_report::{Figure, ReportDocument, REPORT_FILE};
use verity_test_utils::{
    failure, fixed_report, Documents, FinishedTest, FIXED_DIRECTORY_PREFIX,
};

fn engine_writing_to(docs: &Documents, mode: ExecutionMode) -> Engine {
    Engine::new(fixed_report(), mode).with_report_root(docs.path().join("reports"))
}

#[test]
fn test_reflush_is_idempotent() {
    let docs = Documents::new();
    let engine = engine_writing_to(&docs, ExecutionMode::Scripted);
    engine
        .accuracy()
        .apply(TestFn::nullary("auc", || Ok::<_, anyhow::Error>(0.9)))
        .call(())
        .unwrap();

    let first = engine.flush().unwrap();
    let first_content = std::fs::read_to_string(&first).unwrap();
    let second = engine.flush().unwrap();
    let second_content = std::fs::read_to_string(&second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_content, second_content);
    assert_eq!(
        std::fs::read_dir(docs.path().join("reports")).unwrap().count(),
        1
    );
}

#[test]
fn test_directory_named_from_timestamp_and_title() {
    let docs = Documents::new();
    let engine = engine_writing_to(&docs, ExecutionMode::Scripted);
    engine
        .report()
        .capture_model_details(ModelDetails::new("Credit Risk"));

    let path = engine.flush().unwrap();
    let dir_name = path.parent().unwrap().file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(dir_name, format!("{FIXED_DIRECTORY_PREFIX}_Credit_Risk"));
    assert_eq!(path.file_name().unwrap(), REPORT_FILE);
}

#[test]
fn test_round_trip_preserves_results() {
    let docs = Documents::new();
    let engine = engine_writing_to(&docs, ExecutionMode::Interactive);
    let _ok = engine
        .fairness()
        .description("parity gap")
        .apply(TestFn::nullary("parity", || Ok::<_, anyhow::Error>(0.02)));
    let _bad = engine
        .label(["robustness", "unit"])
        .apply(TestFn::nullary("noise", || Err::<f64, _>(failure("diverged"))));
    engine.execute_promises();
    engine
        .report()
        .capture("manual", TestLabel::Transparency.into(), "documented", "by hand");

    let captured = engine.report().results();
    let doc = ReportDocument::load(engine.flush().unwrap()).unwrap();

    assert_eq!(doc.results.len(), captured.len());
    for (record, result) in doc.results.iter().zip(&captured) {
        assert_eq!(record.key, result.key());
        assert_eq!(&record.labels, result.labels());
        assert_eq!(record.description, result.description());
        assert_eq!(record.success, result.success());
    }
    assert_eq!(doc.passed(), 2);
    assert_eq!(doc.failed(), 1);
}

#[test]
fn test_details_and_figures_are_persisted() {
    let docs = Documents::new();
    let details_path = docs.write("details.yaml", "title: Churn\nowners: [ml-platform]\n");
    let engine = engine_writing_to(&docs, ExecutionMode::Scripted);

    engine
        .model_details(Some(details_path.as_path()))
        .wrap(Signature::nullary("describe"), |_: &Params| Ok::<_, anyhow::Error>(()))
        .call(Params::new())
        .unwrap();
    engine
        .report_figure(Some("Confusion Matrix"))
        .wrap(Signature::nullary("plot"), |_: &Params| {
            Ok::<_, anyhow::Error>(Figure::svg("<svg><rect/></svg>"))
        })
        .call(Params::new())
        .unwrap();

    let path = engine.flush().unwrap();
    let dir = path.parent().unwrap();
    assert!(dir.ends_with(format!("{FIXED_DIRECTORY_PREFIX}_Churn")));

    let doc = ReportDocument::load(dir).unwrap();
    assert_eq!(doc.details.owners, vec!["ml-platform"]);
    assert_eq!(doc.figures[0].file.as_deref(), Some("0_Confusion_Matrix.svg"));
    assert_eq!(
        std::fs::read_to_string(dir.join("0_Confusion_Matrix.svg")).unwrap(),
        "<svg><rect/></svg>"
    );
}

#[test]
fn test_external_results_are_recorded() {
    let docs = Documents::new();
    let engine = engine_writing_to(&docs, ExecutionMode::Scripted);

    engine
        .record_external(&FinishedTest::passed("test_tokenizer", &["unit"]))
        .unwrap();
    engine
        .record_external(&FinishedTest::failed(
            "test_end_to_end",
            &["integration", "minimum-functionality"],
            "assert 0.4 > 0.5",
        ))
        .unwrap();

    let err = engine
        .record_external(&FinishedTest::passed("test_slow", &["slow"]))
        .unwrap_err();
    assert_eq!(err.name(), "slow");

    let doc = ReportDocument::load(engine.flush().unwrap()).unwrap();
    assert_eq!(doc.results.len(), 2);
    assert_eq!(doc.results[0].success, Some(true));
    assert_eq!(doc.results[1].success, Some(false));
    assert_eq!(
        doc.results[1].labels.to_strings(),
        vec!["integration", "minimum-functionality"]
    );
}

#[test]
fn test_non_finite_metric_fails_flush() {
    let docs = Documents::new();
    let engine = engine_writing_to(&docs, ExecutionMode::Scripted);
    engine
        .accuracy()
        .apply(TestFn::nullary("precision", || Ok::<_, anyhow::Error>(f64::NAN)))
        .call(())
        .unwrap();

    let err = engine.flush().unwrap_err();
    assert!(err.is_serialization());
    assert!(!docs.path().join("reports").exists());
}
