#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::print_handler::buffer_handler;
use crate::SharedPrintHandler;
use nf_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

/// Executes `source` as one list of the given kind in the root scope.
fn exec_list(source: &str, kind: ListKind) -> (Result<Flow, EvalError>, String, Context) {
    let tokens = nf_lexer::lex(source).unwrap();
    let program = nf_parse::parse(&tokens).unwrap();
    let output = buffer_handler();
    let mut context = Context::new().with_print_handler(SharedPrintHandler::clone(&output));
    let root = context.root();
    let flow = execute_all(&mut context, &program.nodes, root, kind);
    (flow, output.get_output(), context)
}

/// Executes the body of `while true { source }` as one list of the given kind.
fn exec_loop_body(source: &str, kind: ListKind) -> (Result<Flow, EvalError>, String) {
    let tokens = nf_lexer::lex(&format!("while true {{\n{source}\n}}")).unwrap();
    let program = nf_parse::parse(&tokens).unwrap();
    let output = buffer_handler();
    let mut context = Context::new().with_print_handler(SharedPrintHandler::clone(&output));
    let root = context.root();
    let flow = execute_all(&mut context, program.nodes[0].children(), root, kind);
    (flow, output.get_output())
}

#[test]
fn break_all_depends_on_the_list_kind() {
    let source = "echo \"a\"\nbreakall\necho \"b\"";

    let (flow, output, _) = exec_list(source, ListKind::Loop);
    assert_eq!(flow.unwrap(), Flow::BreakAll);
    assert_eq!(output, "a\n");

    let (flow, output, _) = exec_list(source, ListKind::Block);
    assert_eq!(flow.unwrap(), Flow::BreakAll);
    assert_eq!(output, "a\nb\n");

    let (flow, output, _) = exec_list(source, ListKind::Global);
    assert_eq!(flow.unwrap(), Flow::Normal);
    assert_eq!(output, "a\nb\n");
}

#[test]
fn break_continue_and_return_stop_every_list() {
    for kind in [ListKind::Global, ListKind::Loop, ListKind::Block] {
        let (flow, output) = exec_loop_body("break\necho \"x\"", kind);
        assert_eq!(flow.unwrap(), Flow::Break);
        assert_eq!(output, "");

        let (flow, _) = exec_loop_body("continue\necho \"x\"", kind);
        assert_eq!(flow.unwrap(), Flow::ContinueLoop);

        let (flow, _, _) = exec_list("return 1, \"two\"\necho \"x\"", kind);
        assert_eq!(
            flow.unwrap(),
            Flow::Return(Value::list(vec![Value::Int(1), Value::from("two")]))
        );
    }
}

#[test]
fn loop_break_all_reaches_the_enclosing_list() {
    let source = "\
for i in 1..3 {
  breakall
}
echo \"after\"
";
    let (flow, output, _) = exec_list(source, ListKind::Block);
    assert_eq!(flow.unwrap(), Flow::BreakAll);
    assert_eq!(output, "after\n");

    let (flow, output, _) = exec_list(source, ListKind::Loop);
    assert_eq!(flow.unwrap(), Flow::BreakAll);
    assert_eq!(output, "");
}

#[test]
fn calls_absorb_break_signals() {
    let source = "\
fun stop() {
  breakall
}
fun skip() {
  if true {
    breakall
  }
  return 1
}
x = stop()
y = skip()
echo \"{x} {y}\"
";
    let (flow, output, _) = exec_list(source, ListKind::Loop);
    assert_eq!(flow.unwrap(), Flow::Normal);
    assert_eq!(output, "null null\n");
}

#[test]
fn switch_break_leaves_the_enclosing_loop() {
    let source = "\
n = 0
while true {
  n = n + 1
  switch n {
    case 3
      break
  }
}
echo n
";
    let (flow, output, _) = exec_list(source, ListKind::Global);
    assert_eq!(flow.unwrap(), Flow::Normal);
    assert_eq!(output, "3\n");
}

#[test]
fn child_scopes_are_removed_after_use() {
    let source = "\
for i in 1..4 {
  if i > 2 {
    x = i
  }
}
";
    let (flow, _, context) = exec_list(source, ListKind::Global);
    flow.unwrap();
    assert_eq!(context.live_scopes(), 1);
    assert!(!context.is_defined(context.root(), "x").unwrap());
}

#[test]
fn assignment_updates_outer_bindings() {
    let source = "\
x = 1
if true {
  x = 2
  y = 3
}
";
    let (flow, _, context) = exec_list(source, ListKind::Global);
    flow.unwrap();
    let root = context.root();
    assert_eq!(
        context.get_variable(root, "x").unwrap().unwrap().value,
        Value::Int(2)
    );
    assert!(!context.is_defined(root, "y").unwrap());
}

#[test]
fn var_unpacking_checks_the_count() {
    let (flow, _, _) = exec_list("var a, b = 1", ListKind::Global);
    assert_eq!(flow.unwrap_err().code(), ErrorCode::E3003);

    let source = "\
fun three() {
  return 1, 2, 3
}
var a, b = three()
";
    let (flow, _, _) = exec_list(source, ListKind::Global);
    let err = flow.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
    assert_eq!(err.message, "type mismatch: expected a list of 2 values, got a list of 3 values");
    assert_eq!(err.line, Some(4));
}

#[test]
fn unknown_task_notes_the_resolved_name() {
    let source = "import task demo.Missing as gone\nrun gone()";
    let (flow, _, _) = exec_list(source, ListKind::Global);
    let err = flow.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3006);
    assert_eq!(err.line, Some(2));
    assert_eq!(err.notes, vec!["`gone` resolves to `demo.Missing`".to_string()]);
}

#[test]
fn run_target_receives_the_last_result() {
    let mut tasks = crate::TaskRegistry::new();
    tasks.register_fn("demo.Twice", |args: &[Value], _: &mut TaskContext<'_>| -> EvalResult {
        Ok(Value::Int(args[0].as_int().unwrap_or_default() * 2))
    });
    let source = "import task demo.Twice as twice\nrun twice(1), twice(5) -> out";
    let tokens = nf_lexer::lex(source).unwrap();
    let program = nf_parse::parse(&tokens).unwrap();
    let mut context = Context::new()
        .with_print_handler(crate::silent_handler())
        .with_tasks(std::rc::Rc::new(tasks));
    let root = context.root();
    execute_all(&mut context, &program.nodes, root, ListKind::Global).unwrap();
    assert_eq!(
        context.get_variable(root, "out").unwrap().unwrap().value,
        Value::Int(10)
    );
}
