//! End-to-end runs through the public `nfc` entry point.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::collections::BTreeMap;
use std::rc::Rc;

use nf_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use nf_diagnostic::ErrorCode;
use nf_eval::{EvalResult, ScriptRegistry, TaskContext, TaskRegistry, Value};
use nfc::{register_script, run_source, Problem, RunOptions, RunOutput};
use pretty_assertions::assert_eq;

fn captured(source: &str) -> RunOutput {
    let options = RunOptions {
        capture_output: true,
        ..RunOptions::default()
    };
    run_source(source, options).unwrap()
}

fn problem(source: &str) -> Problem {
    let options = RunOptions {
        capture_output: true,
        ..RunOptions::default()
    };
    match run_source(source, options) {
        Ok(output) => panic!("expected a failure, got {output:?}"),
        Err(problem) => problem,
    }
}

fn render(problem: &Problem, source: &str) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source(source)
        .with_file_path("script.nf");
    emitter.emit(&problem.to_diagnostic());
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn break_all_from_a_nested_loop_lets_the_script_continue() {
    let source = "\
echo \"before\"
for i in 1..2 {
  for j in 1..2 {
    breakall
    echo \"unreachable\"
  }
  echo \"also unreachable\"
}
echo \"after\"
";
    assert_eq!(captured(source).output, "before\nafter\n");
}

#[test]
fn closures_snapshot_their_environment() {
    let source = "\
greeting = \"hello\"
greet = (name) -> greeting + \", \" + name
greeting = \"bye\"
echo greet(\"nf\")
echo greeting
";
    assert_eq!(captured(source).output, "hello, nf\nbye\n");
}

#[test]
fn params_pre_value_and_export() {
    let mut params = BTreeMap::new();
    params.insert("count".to_string(), Value::Int(3));
    let options = RunOptions {
        params,
        pre_value: Some(Value::from("seed")),
        capture_output: true,
        ..RunOptions::default()
    };
    let source = "\
n = $params.get(\"count\")
out = $preValue
for i in 1..n {
  out = out + i
}
export out
";
    let result = run_source(source, options).unwrap();
    assert_eq!(result.export, Some(Value::from("seed123")));
    assert_eq!(result.output, "");
}

#[test]
fn imported_scripts_expose_globals_and_functions() {
    let mut scripts = ScriptRegistry::new();
    register_script(
        &mut scripts,
        "text",
        "\
suffix = \"_nf\"
fun tag(String s) {
  return s + suffix
}
",
    )
    .unwrap();
    let options = RunOptions {
        pre_value: Some(Value::from("in")),
        capture_output: true,
        scripts: Rc::new(scripts),
        ..RunOptions::default()
    };
    let source = "\
import nf text
echo text.suffix
export text.tag($preValue)
";
    let result = run_source(source, options).unwrap();
    assert_eq!(result.output, "_nf\n");
    assert_eq!(result.export, Some(Value::from("in_nf")));
}

#[test]
fn scripts_are_checked_when_registered() {
    let mut scripts = ScriptRegistry::new();
    let err = register_script(&mut scripts, "bad", "x = \"open").unwrap_err();
    assert!(matches!(err, Problem::Lex(_)));
    let err = register_script(&mut scripts, "bad", "break").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1010);
    assert!(scripts.is_empty());

    let problem = problem("import nf text");
    assert_eq!(problem.code(), ErrorCode::E3018);
}

#[test]
fn host_tasks_receive_arguments_and_callbacks() {
    let mut tasks = TaskRegistry::new();
    tasks.register_fn(
        "host.Each",
        |args: &[Value], cx: &mut TaskContext<'_>| -> EvalResult {
            let Value::List(items) = &args[0] else {
                return Err(nf_eval::type_mismatch("List", args[0].type_name()));
            };
            let items = items.borrow().clone();
            for item in items {
                cx.call(&args[1], &[item])?;
            }
            Ok(Value::Null)
        },
    );
    let options = RunOptions {
        capture_output: true,
        tasks: Rc::new(tasks),
        ..RunOptions::default()
    };
    let source = "\
import task host.Each as each
List items = new ArrayList()
items.add(\"a\")
items.add(\"b\")
fun show(String x) {
  echo \"item \", x
}
run each(items, (x) -> show(x))
";
    let result = run_source(source, options).unwrap();
    assert_eq!(result.output, "item a\nitem b\n");
}

#[test]
fn duplicate_declaration_is_a_build_error() {
    let source = "var x = 1\nvar x = 2\n";
    let problem = problem(source);
    assert!(matches!(problem, Problem::Parse(_)));
    assert_eq!(problem.code(), ErrorCode::E1006);

    let rendered = render(&problem, source);
    assert!(rendered.contains("[E1006]"), "{rendered}");
    assert!(rendered.contains("script.nf:2"), "{rendered}");
    assert!(rendered.contains("first declared here"), "{rendered}");
}

#[test]
fn runtime_errors_render_with_the_offending_line() {
    let source = "x = 10\ny = x / 0\n";
    let problem = problem(source);
    assert!(matches!(problem, Problem::Eval(_)));
    assert_eq!(problem.code(), ErrorCode::E3004);
    assert_eq!(problem.to_string(), "line 2: division by zero");

    let rendered = render(&problem, source);
    assert!(rendered.contains("runtime error"), "{rendered}");
    assert!(rendered.contains("y = x / 0"), "{rendered}");
}

#[test]
fn lexer_errors_stop_before_anything_runs() {
    let problem = problem("echo \"a\"\nx = 1 #\n");
    assert!(matches!(problem, Problem::Lex(_)));
    assert_eq!(problem.code(), ErrorCode::E0002);
}
