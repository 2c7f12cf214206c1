#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{buffer_handler, run, EvalErrorKind, ScriptInput, SharedPrintHandler};
use nf_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn nodes(source: &str) -> Vec<SyntaxNode> {
    let tokens = nf_lexer::lex(source).unwrap();
    nf_parse::parse(&tokens).unwrap().nodes
}

const UTIL: &str = "\
greeting = \"hello\"
count = 2
echo \"util loaded\"
fun greet(String name) {
  return greeting + \", \" + name
}
fun bump() {
  count = count + 1
  return count
}
";

fn registry() -> Rc<ScriptRegistry> {
    let mut scripts = ScriptRegistry::new();
    scripts.register("util", nodes(UTIL));
    scripts.register("outer", nodes("import nf util\nlabel = util.greet(\"outer\")"));
    scripts.register("loop_a", nodes("import nf loop_b"));
    scripts.register("loop_b", nodes("import nf loop_a"));
    scripts.register("broken", nodes("x = 1\ny = x / 0"));
    Rc::new(scripts)
}

struct Ran {
    result: Result<Option<Value>, EvalError>,
    output: String,
}

fn run_main(source: &str) -> Ran {
    let output = buffer_handler();
    let mut context = Context::new()
        .with_print_handler(SharedPrintHandler::clone(&output))
        .with_scripts(registry());
    let result = run(&nodes(source), &mut context, ScriptInput::default());
    Ran {
        result: result.map(|outcome| outcome.export),
        output: output.get_output(),
    }
}

fn export_of(source: &str) -> Value {
    run_main(source).result.unwrap().unwrap()
}

#[test]
fn registry_keeps_parsed_nodes() {
    let scripts = registry();
    assert!(scripts.contains("util"));
    assert!(!scripts.contains("missing"));
    assert_eq!(scripts.len(), 5);
    assert_eq!(scripts.get("util").unwrap().len(), nodes(UTIL).len());

    let mut scripts = ScriptRegistry::new();
    assert!(scripts.is_empty());
    scripts.register("a", nodes("x = 1"));
    scripts.register("a", nodes("x = 1\ny = 2"));
    assert_eq!(scripts.get("a").unwrap().len(), 2);
}

#[test]
fn globals_and_functions_are_reachable_by_script_name() {
    let source = "\
import nf util
export util.greet(\"nf\") + \" \" + util.count
";
    assert_eq!(export_of(source), Value::from("hello, nf 2"));
}

#[test]
fn script_functions_update_the_script_globals() {
    let source = "\
import nf util
util.bump()
util.bump()
count = 10
export util.count + count
";
    assert_eq!(export_of(source), Value::Int(14));
}

#[test]
fn importing_twice_runs_the_script_once() {
    let ran = run_main("import nf util, util\nimport nf util\nexport util.bump()");
    assert_eq!(ran.result.unwrap(), Some(Value::Int(3)));
    assert_eq!(ran.output, "util loaded\n");
}

#[test]
fn imported_scripts_see_null_inputs() {
    let mut scripts = ScriptRegistry::new();
    scripts.register("inputs", nodes("seen = $preValue == null && $params == null"));
    let mut context = Context::new().with_scripts(Rc::new(scripts));
    let input = ScriptInput {
        pre_value: Some(Value::Int(1)),
        ..ScriptInput::default()
    };
    let outcome = run(&nodes("import nf inputs\nexport inputs.seen"), &mut context, input);
    assert_eq!(outcome.unwrap().export, Some(Value::Bool(true)));
}

#[test]
fn nested_imports_use_their_own_context() {
    let source = "\
import nf outer
export outer.label
";
    assert_eq!(export_of(source), Value::from("hello, outer"));

    let err = run_main("import nf outer\nexport util.count").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
}

#[test]
fn unregistered_script_is_an_error() {
    let err = run_main("x = 1\nimport nf missing").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3018);
    assert_eq!(err.line, Some(2));
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownScript {
            name: "missing".into()
        }
    );
}

#[test]
fn circular_imports_are_reported() {
    let err = run_main("import nf loop_a").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3019);
    assert_eq!(
        err.kind,
        EvalErrorKind::CircularImport {
            chain: "loop_a -> loop_b -> loop_a".into()
        }
    );
}

#[test]
fn failures_inside_a_script_name_it() {
    let err = run_main("import nf broken").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3004);
    assert!(err.notes.iter().any(|n| n.contains("`broken`")));
}

#[test]
fn missing_members_are_errors() {
    let err = run_main("import nf util\nexport util.nothing").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);

    let err = run_main("import nf util\nutil.nothing()").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3005);

    let err = run_main("m = \"text\"\nexport m.size").result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3012);
}

#[test]
fn method_calls_on_plain_values_are_unaffected() {
    assert_eq!(export_of("util = \"abc\"\nexport util.length()"), Value::Int(3));
}

#[test]
fn clearing_drops_imported_scripts() {
    let mut context = Context::new()
        .with_print_handler(crate::silent_handler())
        .with_scripts(registry());
    let root = context.root();
    execute_all(&mut context, &nodes("import nf util"), root, ListKind::Global).unwrap();
    let util = context.imported_script("util").unwrap();
    assert!(!util.borrow().is_cleared());

    context.clear();
    assert!(context.imported_script("util").is_none());
    assert!(util.borrow().is_cleared());
}
