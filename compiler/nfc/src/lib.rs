//! NF script front end.
//!
//! Ties the pipeline together: `nf_lexer` tokenizes, `nf_parse` builds the
//! node list, `nf_eval` runs it. [`run_source`] is the entry point for
//! library callers; the `nf` binary wraps it with file handling and
//! diagnostic rendering (see [`commands`]).

pub mod commands;
mod problem;
mod tracing_setup;

pub use problem::Problem;
pub use tracing_setup::init_tracing;

use std::collections::BTreeMap;
use std::rc::Rc;

use nf_eval::{
    buffer_handler, stdout_handler, Context, ScriptInput, ScriptRegistry, SharedPrintHandler,
    TaskRegistry, Value,
};

/// How to run a script.
#[derive(Default)]
pub struct RunOptions {
    /// Bound in the script as the map `$params`.
    pub params: BTreeMap<String, Value>,
    /// Bound in the script as `$preValue`.
    pub pre_value: Option<Value>,
    /// Collect `echo` output into [`RunOutput::output`] instead of stdout.
    pub capture_output: bool,
    /// Host tasks reachable through `run`.
    pub tasks: Rc<TaskRegistry>,
    /// Scripts reachable through `import nf`.
    pub scripts: Rc<ScriptRegistry>,
}

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput {
    /// Value of the last `export` executed, if any.
    pub export: Option<Value>,
    /// Captured output; empty unless `capture_output` was set.
    pub output: String,
}

/// Lex, build and run one script.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn run_source(source: &str, options: RunOptions) -> Result<RunOutput, Problem> {
    let tokens = nf_lexer::lex(source)?;
    let program = nf_parse::parse(&tokens)?;

    let print: SharedPrintHandler = if options.capture_output {
        buffer_handler()
    } else {
        stdout_handler()
    };
    let mut context = Context::new()
        .with_print_handler(SharedPrintHandler::clone(&print))
        .with_tasks(options.tasks)
        .with_scripts(options.scripts);
    let input = ScriptInput {
        params: options.params,
        pre_value: options.pre_value,
    };
    let outcome = nf_eval::run(&program.nodes, &mut context, input)?;
    Ok(RunOutput {
        export: outcome.export,
        output: print.get_output(),
    })
}

/// Lex and build `source` once and register it as `name` for `import nf`.
#[tracing::instrument(level = "debug", skip(scripts, source), fields(bytes = source.len()))]
pub fn register_script(
    scripts: &mut ScriptRegistry,
    name: &str,
    source: &str,
) -> Result<(), Problem> {
    let tokens = nf_lexer::lex(source)?;
    let program = nf_parse::parse(&tokens)?;
    scripts.register(name, program.nodes);
    Ok(())
}

/// Split a `--script` argument into a script name and a file path.
///
/// `name=path` names the script explicitly; a bare path is named after its
/// file stem.
pub fn parse_script_arg(arg: &str) -> Option<(String, String)> {
    if let Some((name, path)) = arg.split_once('=') {
        let name = name.trim();
        if name.is_empty() || path.is_empty() {
            return None;
        }
        return Some((name.to_string(), path.to_string()));
    }
    let stem = std::path::Path::new(arg).file_stem()?.to_str()?;
    Some((stem.to_string(), arg.to_string()))
}

/// Value of a `--param key=value` argument: integers, floats and booleans
/// are recognized, anything else stays a string.
pub fn param_value(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(n) = text.parse::<f64>() {
        if n.is_finite() {
            return Value::Float(n);
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::from(text),
    }
}

/// Split `key=value`; `None` without an `=` or with an empty key.
pub fn parse_param(arg: &str) -> Option<(String, Value)> {
    let (key, value) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), param_value(value)))
}
