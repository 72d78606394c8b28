//! End-to-end scenarios driven through the public `Session` API.

use matchlab_core::{parse, presets, EngineError, Session, SessionState};

#[test]
fn eslint_compact_extracts_one_diagnostic() {
    let mut session = Session::new();
    session.load_example("eslint-compact").unwrap();

    let preset = presets::find("eslint-compact").unwrap();
    assert_eq!(session.output(), preset.output);
    assert_eq!(session.config_text(), preset.config);

    let matches = session.matches().unwrap();
    assert_eq!(matches.len(), 1);
    let diag = &matches[0];
    assert_eq!(diag.file.as_deref(), Some("badFile.js"));
    assert_eq!(diag.line, Some(50));
    assert_eq!(diag.column, Some(11));
    assert_eq!(diag.severity.as_deref(), Some("Error"));
    assert_eq!(
        diag.message.as_deref(),
        Some("'myVar' is defined but never used.")
    );
    assert_eq!(diag.code.as_deref(), Some("no-unused-vars"));
}

#[test]
fn eslint_stylish_carries_file_through_loop() {
    let mut session = Session::new();
    session.load_example("eslint-stylish").unwrap();

    let matches = session.matches().unwrap();
    let files: Vec<_> = matches.iter().map(|d| d.file.as_deref().unwrap()).collect();
    assert_eq!(files, vec!["test.js", "test.js", "foo.js", "foo.js"]);

    let first = &matches[0];
    assert_eq!(first.line, Some(1));
    assert_eq!(first.column, Some(0));
    assert_eq!(first.severity.as_deref(), Some("error"));
    assert_eq!(
        first.message.as_deref().map(str::trim_end),
        Some(r#"Missing "use strict" statement"#)
    );
    assert_eq!(first.code.as_deref(), Some("strict"));

    let last = &matches[3];
    assert_eq!(last.line, Some(37));
    assert_eq!(last.column, Some(13));
    assert_eq!(last.code.as_deref(), Some("arrow-parens"));
}

#[test]
fn malformed_first_edit_sets_only_config_error() {
    let mut session = Session::new();
    session.edit_configuration("{not valid json");

    assert_eq!(session.state(), SessionState::ConfigInvalid);
    assert!(session.config_error().is_some());
    assert!(session.config().is_none());
    assert!(session.matches().is_none());
    assert!(session.match_error().is_none());
}

#[test]
fn missing_capture_group_sets_match_error() {
    let mut session = Session::new();
    session.load_example("eslint-compact").unwrap();
    session.edit_output("some output line");
    session.edit_configuration(r#"{"owner":"broken","pattern":[{"regexp":"(.*)","file":5}]}"#);

    assert!(session.matches().is_none());
    let err = session.match_error().unwrap();
    assert!(matches!(
        err.engine_error(),
        EngineError::GroupOutOfRange { group: 5, .. }
    ));
}

#[test]
fn examples_load_from_any_state() {
    let mut session = Session::new();
    session.edit_configuration(r#"{"owner":"broken","pattern":[{"regexp":"(.*)","file":5}]}"#);
    assert_eq!(session.state(), SessionState::MatchFailed);
    session.load_example("eslint-stylish").unwrap();
    assert_eq!(session.state(), SessionState::Valid);

    session.edit_configuration("][");
    assert_eq!(session.state(), SessionState::ConfigInvalid);
    session.load_example("eslint-compact").unwrap();
    assert_eq!(session.state(), SessionState::Valid);
    assert_eq!(session.matches().unwrap().len(), 1);
}

#[test]
fn parse_never_panics_on_arbitrary_text() {
    let inputs = [
        "",
        " ",
        "null",
        "42",
        "{}",
        "{\"owner\": 1, \"pattern\": []}",
        "{\"owner\": \"o\", \"pattern\": [{}]}",
        "{\"owner\": \"o\", \"pattern\": [{\"regexp\": \"x\", \"line\": 1.5}]}",
        "\u{0}\u{1}\u{2}",
        "✖✖✖",
        "{\"owner\": \"o\", \"pattern\": [{\"regexp\": \"x\"}]} trailing",
    ];
    for input in inputs {
        assert!(parse(input).is_err(), "expected {input:?} to fail");
    }
    assert!(parse(r#"{"owner":"o","pattern":[]}"#).is_ok());
}

#[test]
fn invoke_never_panics_on_semantically_broken_configs() {
    let configs = [
        r#"{"owner":"o","pattern":[]}"#,
        r#"{"owner":"o","pattern":[{"regexp":"("}]}"#,
        r#"{"owner":"o","pattern":[{"regexp":"(a)","line":1}]}"#,
        r#"{"owner":"o","pattern":[{"regexp":"(a)","loop":true},{"regexp":"(b)"}]}"#,
        r#"{"owner":"o","pattern":[{"regexp":"(.*)","code":0}]}"#,
    ];
    for text in configs {
        let mut session = Session::new();
        session.edit_output("a\nb\n");
        session.edit_configuration(text);
        assert!(session.config_error().is_none(), "{text} should decode");
        assert!(
            session.matches().is_some() || session.match_error().is_some(),
            "{text} should produce an outcome"
        );
    }
}

#[test]
fn unparseable_line_number_does_not_hide_other_matches() {
    let mut session = Session::new();
    session.load_example("eslint-compact").unwrap();
    let good = presets::find("eslint-compact").unwrap().output;

    for bad in [
        "other.js: line \u{665}\u{660}, col 1, Error - odd digits (no-undef)",
        "other.js: line 99999999999999999999999, col 1, Error - too big (no-undef)",
    ] {
        session.edit_output(format!("{good}\n{bad}"));
        assert_eq!(session.state(), SessionState::Valid);
        assert!(session.match_error().is_none());
        let matches = session.matches().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file.as_deref(), Some("badFile.js"));
    }
}
