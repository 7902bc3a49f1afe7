use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("prediction-grader").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_grade_defaults_to_stdin_text() {
    let cli = parse(&["grade"]);
    assert_eq!(cli.log_level, None);
    assert_eq!(
        cli.command,
        Command::Grade {
            inputs: vec![PathBuf::from("-")],
            format: OutputFormat::Text,
        }
    );
}

#[test]
fn test_parse_grade_many_inputs_json() {
    let cli = parse(&["grade", "a.json", "b.json", "--format", "json", "--log-level", "debug"]);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(
        cli.command,
        Command::Grade {
            inputs: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            format: OutputFormat::Json,
        }
    );
}

#[test]
fn test_parse_registers_base() {
    let cli = parse(&["registers", "resp.json", "--base", "100"]);
    assert_eq!(
        cli.command,
        Command::Registers {
            input: PathBuf::from("resp.json"),
            base: 100,
        }
    );
}

#[test]
fn test_parse_rejects_unknown_format() {
    let res = Cli::try_parse_from(["prediction-grader", "grade", "--format", "yaml"]);
    assert!(res.is_err());
}

#[test]
fn test_replay_cycle_words() {
    let cycle = replay_cycle(r#"{"data":{"predictions":{"a":{"score":0.9}}}}"#);
    assert_eq!(cycle.registers().words(), [5, 0, 1]);
    let cycle = replay_cycle("not json");
    assert_eq!(cycle.registers().words(), [3, 4, 0]);
}

#[test]
fn test_render_report_includes_source() {
    let payload = serde_json::json!({"data": {"predictions": {"a": {"score": 0.1}}}});
    let line = render_report("resp.json", &explain(&payload)).unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(decoded["source"], "resp.json");
    assert_eq!(decoded["grade"], 0);
    assert_eq!(decoded["inspected"], 1);
    assert_eq!(decoded["max_score"], 0.1);
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn output_of(command: Command) -> String {
    let mut out = Vec::new();
    run_with(command, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_grade_prints_one_line_per_input() {
    let hit = write_temp(r#"{"data":{"predictions":{"a":{"score":0.9007511138916016}}}}"#);
    let miss = write_temp(r#"{"data":{"predictions":{"dummy":{"score":0}}}}"#);
    let out = output_of(Command::Grade {
        inputs: vec![hit.path().to_path_buf(), miss.path().to_path_buf()],
        format: OutputFormat::Text,
    });
    assert_eq!(out, "1\n0\n");
}

#[test]
fn test_grade_json_line_names_source() {
    let hit = write_temp(r#"{"data":{"predictions":{"b":{"score":0.5}}}}"#);
    let out = output_of(Command::Grade {
        inputs: vec![hit.path().to_path_buf()],
        format: OutputFormat::Json,
    });
    let decoded: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(decoded["source"], hit.path().display().to_string());
    assert_eq!(decoded["grade"], 1);
    assert_eq!(decoded["qualifying"], serde_json::json!(["b"]));
}

#[test]
fn test_grade_invalid_json_fails() {
    let bad = write_temp("{\"data\":");
    let mut out = Vec::new();
    let err = run_with(
        Command::Grade {
            inputs: vec![bad.path().to_path_buf()],
            format: OutputFormat::Text,
        },
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Input(InputError::Parse { .. })));
    assert!(out.is_empty());
}

#[test]
fn test_registers_prints_addressed_block() {
    let body = write_temp(r#"{"data":{"predictions":{"a":{"score":0.9}}}}"#);
    let out = output_of(Command::Registers {
        input: body.path().to_path_buf(),
        base: 10,
    });
    assert_eq!(out, "10 5\n11 0\n12 1\n");
}

#[test]
fn test_registers_empty_body_publishes_clear() {
    let body = write_temp("");
    let out = output_of(Command::Registers {
        input: body.path().to_path_buf(),
        base: 0,
    });
    assert_eq!(out, "0 5\n1 0\n2 0\n");
}

#[test]
fn test_registers_base_overflow_fails() {
    let body = write_temp("{}");
    let mut out = Vec::new();
    let err = run_with(
        Command::Registers {
            input: body.path().to_path_buf(),
            base: u16::MAX,
        },
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Registers(_)));
}
