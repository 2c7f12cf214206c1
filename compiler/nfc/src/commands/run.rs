//! The `run` command.

use std::collections::BTreeMap;
use std::rc::Rc;

use nf_diagnostic::emitter::ColorMode;
use nf_eval::{ScriptRegistry, Value};

use super::{read_file, report_and_exit};
use crate::{register_script, run_source, RunOptions};

/// Arguments of `nf run`.
#[derive(Clone, Debug, Default)]
pub struct RunArgs {
    pub path: String,
    pub params: BTreeMap<String, Value>,
    /// `(name, path)` of each script made importable with `import nf`.
    pub scripts: Vec<(String, String)>,
    pub color: ColorMode,
}

/// Run a script file, printing its output and then its export, if any.
pub fn run_file(args: RunArgs) {
    let mut scripts = ScriptRegistry::new();
    for (name, path) in &args.scripts {
        let source = read_file(path);
        if let Err(problem) = register_script(&mut scripts, name, &source) {
            report_and_exit(&problem, &source, path, args.color);
        }
    }

    let source = read_file(&args.path);
    let options = RunOptions {
        params: args.params,
        scripts: Rc::new(scripts),
        ..RunOptions::default()
    };
    match run_source(&source, options) {
        Ok(output) => {
            if let Some(export) = output.export {
                println!("{export}");
            }
        }
        Err(problem) => report_and_exit(&problem, &source, &args.path, args.color),
    }
}
