//! Host tasks called by `run` statements.
//!
//! A host registers [`HostTask`]s under qualified names; scripts reach them
//! through `import task qualified.Name as alias` and `run alias(args)`. Tasks
//! get a [`TaskContext`] so they can call closures the script passed in.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::EvalResult;
use crate::exec::call_function;
use crate::{Context, Value};

/// Host behavior invoked by a `run` statement.
pub trait HostTask {
    fn run(&self, args: &[Value], cx: &mut TaskContext<'_>) -> EvalResult;
}

impl<F> HostTask for F
where
    F: Fn(&[Value], &mut TaskContext<'_>) -> EvalResult,
{
    fn run(&self, args: &[Value], cx: &mut TaskContext<'_>) -> EvalResult {
        self(args, cx)
    }
}

/// What a running task may do with the script's context.
pub struct TaskContext<'a> {
    context: &'a mut Context,
    line: u32,
}

impl<'a> TaskContext<'a> {
    pub(crate) fn new(context: &'a mut Context, line: u32) -> Self {
        TaskContext { context, line }
    }

    /// Call a function value the script passed as an argument.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        call_function(self.context, callee, args)
    }

    /// Print through the script's output handler.
    pub fn print(&self, msg: &str) {
        self.context.print().println(msg);
    }

    /// Line of the `run` statement.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Tasks by qualified name.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: FxHashMap<String, Rc<dyn HostTask>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, qualified: impl Into<String>, task: impl HostTask + 'static) {
        self.tasks.insert(qualified.into(), Rc::new(task));
    }

    /// Register a closure as a task.
    pub fn register_fn<F>(&mut self, qualified: impl Into<String>, f: F)
    where
        F: Fn(&[Value], &mut TaskContext<'_>) -> EvalResult + 'static,
    {
        self.register(qualified, f);
    }

    pub fn get(&self, qualified: &str) -> Option<&Rc<dyn HostTask>> {
        self.tasks.get(qualified)
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.tasks.contains_key(qualified)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
