use flamefold::commands::{execute_report, validate_args, validate_input_file, ReportArgs};
use flamefold::flamegraph::ColorScheme;
use pretty_assertions::assert_eq;
use std::path::Path;

const SAMPLES: &str = r#"{
    "process": {"pid": 7, "name": "app"},
    "samples": [
        {"tid": 7, "weight": 5, "callchain": [{"function": "main"}, {"function": "foo"}, {"function": "bar"}]},
        {"tid": 7, "weight": 3, "callchain": [{"function": "main"}, {"function": "foo"}, {"function": "baz"}]},
        {"tid": 7, "weight": 2, "callchain": [{"function": "main"}, {"function": "qux"}]},
        {"tid": 8, "weight": 0, "callchain": [{"function": "idle"}]}
    ]
}"#;

fn write_samples(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("samples.json");
    std::fs::write(&path, SAMPLES).unwrap();
    path
}

#[test]
fn test_report_writes_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReportArgs {
        input: write_samples(dir.path()),
        output_html: dir.path().join("report.html"),
        output_json: Some(dir.path().join("report.json")),
        output_collapsed: Some(dir.path().join("stacks.folded")),
        color: "legacy".to_string(),
        ..Default::default()
    };

    let html_path = execute_report(args).unwrap();

    let html = std::fs::read_to_string(html_path).unwrap();
    assert!(html.contains("app Flamegraph Report"));
    assert!(html.contains("Main Thread 7 (10 samples)"));
    assert!(!html.contains("Thread 8"));

    let collapsed = std::fs::read_to_string(dir.path().join("stacks.folded")).unwrap();
    assert_eq!(
        collapsed,
        "thread-7;main;foo;bar 5\nthread-7;main;foo;baz 3\nthread-7;main;qux 2\n"
    );

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["color_scheme"], "legacy");
    assert_eq!(json["skipped"]["zero_weight"], 1);
}

#[test]
fn test_report_overrides_process() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReportArgs {
        input: write_samples(dir.path()),
        output_html: dir.path().join("report.html"),
        pid: Some(99),
        process_name: Some("renamed".to_string()),
        title: Some("Custom".to_string()),
        ..Default::default()
    };

    execute_report(args).unwrap();

    let html = std::fs::read_to_string(dir.path().join("report.html")).unwrap();
    assert!(html.contains("<title>Custom</title>"));
    assert!(html.contains("renamed (99)"));
    assert!(html.contains("Thread 7 (10 samples)"));
    assert!(!html.contains("Main Thread"));
}

#[test]
fn test_unknown_color_fails_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReportArgs {
        input: dir.path().join("does-not-exist.json"),
        output_html: dir.path().join("report.html"),
        color: "purple".to_string(),
        ..Default::default()
    };

    let err = execute_report(args).unwrap_err();
    assert!(err.to_string().contains("Unknown color scheme 'purple'"));
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_report_without_usable_samples_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, r#"{"samples": [{"tid": 1, "weight": -2, "callchain": []}]}"#).unwrap();

    let args = ReportArgs {
        input,
        output_html: dir.path().join("report.html"),
        ..Default::default()
    };

    assert!(execute_report(args).is_err());
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_validate_args_parses_scheme() {
    let args = ReportArgs {
        color: "dso".to_string(),
        ..Default::default()
    };
    assert_eq!(validate_args(&args).unwrap(), ColorScheme::Dso);
}

#[test]
fn test_validate_input_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(validate_input_file(&write_samples(dir.path())).is_ok());
    assert!(validate_input_file(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_collapsed_export_keeps_threads_apart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("threads.jsonl");
    std::fs::write(
        &input,
        concat!(
            r#"{"tid": 1, "pid": 1, "weight": 2, "callchain": [{"function": "main"}, {"function": "a;b"}]}"#,
            "\n",
            r#"{"tid": 2, "pid": 1, "weight": 3, "callchain": [{"function": "main"}, {"function": "a;b"}]}"#,
            "\n",
        ),
    )
    .unwrap();

    let args = ReportArgs {
        input,
        output_html: dir.path().join("report.html"),
        output_collapsed: Some(dir.path().join("stacks.folded")),
        ..Default::default()
    };
    execute_report(args).unwrap();

    let collapsed = std::fs::read_to_string(dir.path().join("stacks.folded")).unwrap();
    assert_eq!(collapsed, "thread-1;main;a:b 2\nthread-2;main;a:b 3\n");
}

#[test]
fn test_overflowing_weight_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.jsonl");
    let line = r#"{"tid": 1, "pid": 1, "weight": 9223372036854775807, "callchain": [{"function": "main"}]}"#;
    std::fs::write(&input, format!("{line}\n{line}\n{line}\n")).unwrap();

    let args = ReportArgs {
        input,
        output_html: dir.path().join("report.html"),
        output_json: Some(dir.path().join("report.json")),
        ..Default::default()
    };
    execute_report(args).unwrap();

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["num_samples"], 2);
    assert_eq!(json["skipped"]["weight_overflow"], 1);
    assert_eq!(json["threads"][0]["total_samples"], 2 * i64::MAX as u64);
}

#[test]
fn test_validate_rejects_file_without_usable_samples() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rejected.json");
    std::fs::write(&input, r#"{"samples": [{"tid": 1, "weight": 0, "callchain": []}]}"#).unwrap();

    let err = validate_input_file(&input).unwrap_err();
    assert!(err.to_string().contains("No usable samples"));
}

#[test]
fn test_package_license_matches_workspace_convention() {
    assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT");
}
