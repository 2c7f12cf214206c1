//! Per-run interpreter state.
//!
//! A [`Context`] owns the scope arena for one run, the alias tables filled by
//! `import` statements, the named function table, the host task registry and
//! the contexts of scripts it imported with `import nf`.
//! The scope a statement runs in is always passed explicitly as a
//! [`ScopeId`]; the context has no notion of a "current" scope.
//!
//! # Teardown
//!
//! [`Context::clear`] is one-shot: every scope is released and every later
//! variable access fails with [`ScopeError::Cleared`]. Closures that outlive
//! the run are invoked in a [`Context::fresh`] copy instead. Clearing also
//! clears and drops every imported script context.

use std::cell::RefCell;
use std::rc::Rc;

use nf_ir::FunctionDefinition;
use rustc_hash::FxHashMap;

use crate::errors::EvalError;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scope::{Binding, ScopeArena, ScopeError, ScopeId, ScopeKind};
use crate::scripts::ScriptRegistry;
use crate::tasks::TaskRegistry;
use crate::types;
use crate::Value;

/// Short names every context knows before any `import type`.
const DEFAULT_TYPE_ALIASES: &[(&str, &str)] = &[
    ("int", "nf.lang.Integer"),
    ("long", "nf.lang.Long"),
    ("short", "nf.lang.Short"),
    ("byte", "nf.lang.Byte"),
    ("char", "nf.lang.Character"),
    ("float", "nf.lang.Float"),
    ("double", "nf.lang.Double"),
    ("boolean", "nf.lang.Boolean"),
    ("bool", "nf.lang.Boolean"),
    ("Integer", "nf.lang.Integer"),
    ("Long", "nf.lang.Long"),
    ("Short", "nf.lang.Short"),
    ("Byte", "nf.lang.Byte"),
    ("Character", "nf.lang.Character"),
    ("Float", "nf.lang.Float"),
    ("Double", "nf.lang.Double"),
    ("Boolean", "nf.lang.Boolean"),
    ("String", "nf.lang.String"),
    ("StringBuilder", "nf.lang.StringBuilder"),
    ("Object", "nf.lang.Object"),
    ("Math", "nf.lang.Math"),
    ("Fun", "nf.lang.Fun"),
    ("List", "nf.util.List"),
    ("ArrayList", "nf.util.ArrayList"),
    ("LinkedList", "nf.util.LinkedList"),
    ("Map", "nf.util.Map"),
    ("HashMap", "nf.util.HashMap"),
    ("TreeMap", "nf.util.TreeMap"),
    ("Set", "nf.util.Set"),
    ("HashSet", "nf.util.HashSet"),
    ("Date", "nf.util.Date"),
    ("UUID", "nf.util.UUID"),
    ("Random", "nf.util.Random"),
    ("Base64", "nf.util.Base64"),
    ("LocalDate", "nf.time.LocalDate"),
    ("LocalDateTime", "nf.time.LocalDateTime"),
    ("LocalTime", "nf.time.LocalTime"),
    ("BigDecimal", "nf.math.BigDecimal"),
    ("BigInteger", "nf.math.BigInteger"),
    ("URL", "nf.net.URL"),
    ("URI", "nf.net.URI"),
    ("TimeUnit", "nf.util.concurrent.TimeUnit"),
    ("Pattern", "nf.util.regex.Pattern"),
];

pub struct Context {
    arena: ScopeArena,
    root: ScopeId,
    type_aliases: FxHashMap<String, String>,
    task_aliases: FxHashMap<String, String>,
    functions: FxHashMap<String, Rc<FunctionDefinition>>,
    tasks: Rc<TaskRegistry>,
    scripts: Rc<ScriptRegistry>,
    imported: FxHashMap<String, Rc<RefCell<Context>>>,
    /// Scripts whose imports led to this context, outermost first.
    import_chain: Vec<String>,
    print: SharedPrintHandler,
    export: Option<Value>,
}

impl Context {
    /// A context with a `Global` root scope, the default type aliases, no
    /// host tasks or scripts, printing to stdout.
    pub fn new() -> Self {
        let (arena, root) = ScopeArena::with_root();
        let type_aliases = DEFAULT_TYPE_ALIASES
            .iter()
            .map(|(short, qualified)| ((*short).to_string(), (*qualified).to_string()))
            .collect();
        Context {
            arena,
            root,
            type_aliases,
            task_aliases: FxHashMap::default(),
            functions: FxHashMap::default(),
            tasks: Rc::new(TaskRegistry::new()),
            scripts: Rc::new(ScriptRegistry::new()),
            imported: FxHashMap::default(),
            import_chain: Vec::new(),
            print: stdout_handler(),
            export: None,
        }
    }

    #[must_use]
    pub fn with_print_handler(mut self, print: SharedPrintHandler) -> Self {
        self.print = print;
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: Rc<TaskRegistry>) -> Self {
        self.tasks = tasks;
        self
    }

    #[must_use]
    pub fn with_scripts(mut self, scripts: Rc<ScriptRegistry>) -> Self {
        self.scripts = scripts;
        self
    }

    /// A new context for running a closure after this one was cleared.
    ///
    /// Keeps the aliases, functions, tasks, scripts and print handler; gets
    /// a new arena with only a root scope and no imported scripts.
    pub fn fresh(&self) -> Context {
        let (arena, root) = ScopeArena::with_root();
        Context {
            arena,
            root,
            type_aliases: self.type_aliases.clone(),
            task_aliases: self.task_aliases.clone(),
            functions: self.functions.clone(),
            tasks: Rc::clone(&self.tasks),
            scripts: Rc::clone(&self.scripts),
            imported: FxHashMap::default(),
            import_chain: self.import_chain.clone(),
            print: SharedPrintHandler::clone(&self.print),
            export: None,
        }
    }

    /// An empty context for running the imported script `name`: shares the
    /// tasks, scripts and print handler of this one.
    pub(crate) fn for_import(&self, name: &str) -> Context {
        let mut import_chain = self.import_chain.clone();
        import_chain.push(name.to_string());
        Context {
            import_chain,
            ..Context::new()
                .with_print_handler(SharedPrintHandler::clone(&self.print))
                .with_tasks(Rc::clone(&self.tasks))
                .with_scripts(Rc::clone(&self.scripts))
        }
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        self.root
    }

    // Scopes

    pub fn create_child_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
    ) -> Result<ScopeId, ScopeError> {
        self.arena.get(parent)?;
        let id = self.arena.alloc(Some(parent), kind)?;
        tracing::trace!(%id, %parent, ?kind, "scope created");
        Ok(id)
    }

    pub fn remove_scope(&mut self, id: ScopeId) -> Result<(), ScopeError> {
        self.arena.remove(id)?;
        tracing::trace!(%id, "scope removed");
        Ok(())
    }

    pub fn scope_kind(&self, id: ScopeId) -> Result<ScopeKind, ScopeError> {
        Ok(self.arena.get(id)?.kind)
    }

    /// `id` when it is still live, otherwise the root.
    pub fn resolve_scope(&self, id: ScopeId) -> ScopeId {
        if self.arena.contains(id) {
            id
        } else {
            self.root
        }
    }

    /// Number of live scopes, root included.
    pub fn live_scopes(&self) -> usize {
        self.arena.live_count()
    }

    /// Release every scope and every imported script. The context cannot
    /// run scripts afterwards.
    pub fn clear(&mut self) {
        tracing::debug!(
            scopes = self.arena.live_count(),
            imported = self.imported.len(),
            "context cleared"
        );
        self.arena.clear();
        for (name, script) in self.imported.drain() {
            match script.try_borrow_mut() {
                Ok(mut script) => script.clear(),
                Err(_) => tracing::debug!(script = %name, "imported script still running"),
            }
        }
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.arena.is_cleared()
    }

    // Variables

    /// Look `name` up in `scope`, then in each parent up to the root.
    pub fn get_variable(&self, scope: ScopeId, name: &str) -> Result<Option<&Binding>, ScopeError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.arena.get(id)?;
            if let Some(binding) = scope.variables.get(name) {
                return Ok(Some(binding));
            }
            current = scope.parent;
        }
        Ok(None)
    }

    pub fn is_defined(&self, scope: ScopeId, name: &str) -> Result<bool, ScopeError> {
        Ok(self.get_variable(scope, name)?.is_some())
    }

    /// Bind `name` in exactly `scope`, replacing any binding it already has.
    pub fn define(
        &mut self,
        scope: ScopeId,
        name: &str,
        binding: Binding,
    ) -> Result<(), ScopeError> {
        self.arena.get_mut(scope)?.variables.insert(name.to_string(), binding);
        Ok(())
    }

    /// Update the nearest scope that binds `name`.
    ///
    /// A declared type on the existing binding is enforced. Returns `false`
    /// when no scope binds `name`.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> Result<bool, EvalError> {
        let Some(owner) = self.owner_of(scope, name)? else {
            return Ok(false);
        };
        let declared = self
            .arena
            .get(owner)?
            .variables
            .get(name)
            .and_then(|b| b.declared.clone());
        let value = match &declared {
            Some(ty) => types::coerce(self, ty, value)?,
            None => value,
        };
        if let Some(binding) = self.arena.get_mut(owner)?.variables.get_mut(name) {
            binding.value = value;
        }
        Ok(true)
    }

    pub fn remove_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
    ) -> Result<Option<Binding>, ScopeError> {
        Ok(self.arena.get_mut(scope)?.variables.remove(name))
    }

    fn owner_of(&self, scope: ScopeId, name: &str) -> Result<Option<ScopeId>, ScopeError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.arena.get(id)?;
            if scope.variables.contains_key(name) {
                return Ok(Some(id));
            }
            current = scope.parent;
        }
        Ok(None)
    }

    /// Every variable visible from `scope`, inner bindings shadowing outer
    /// ones, sorted by name.
    pub fn visible_variables(&self, scope: ScopeId) -> Result<Vec<(String, Value)>, ScopeError> {
        let mut seen: FxHashMap<&str, &Value> = FxHashMap::default();
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.arena.get(id)?;
            for (name, binding) in &scope.variables {
                seen.entry(name.as_str()).or_insert(&binding.value);
            }
            current = scope.parent;
        }
        let mut visible: Vec<(String, Value)> = seen
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        visible.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(visible)
    }

    // Aliases

    /// Qualified name for a short type name; unknown names pass through.
    pub fn resolve_type<'a>(&'a self, name: &'a str) -> &'a str {
        self.type_aliases.get(name).map_or(name, String::as_str)
    }

    pub fn add_type_alias(&mut self, alias: &str, qualified: &str) {
        tracing::trace!(alias, qualified, "type alias");
        self.type_aliases.insert(alias.to_string(), qualified.to_string());
    }

    pub fn add_task_alias(&mut self, alias: &str, qualified: &str) {
        tracing::trace!(alias, qualified, "task alias");
        self.task_aliases.insert(alias.to_string(), qualified.to_string());
    }

    pub fn resolve_task(&self, alias: &str) -> Option<&str> {
        self.task_aliases.get(alias).map(String::as_str)
    }

    // Functions and tasks

    pub fn define_function(&mut self, definition: Rc<FunctionDefinition>) {
        if let Some(name) = &definition.name {
            self.functions.insert(name.clone(), Rc::clone(&definition));
        }
    }

    pub fn function(&self, name: &str) -> Option<&Rc<FunctionDefinition>> {
        self.functions.get(name)
    }

    pub fn tasks(&self) -> Rc<TaskRegistry> {
        Rc::clone(&self.tasks)
    }

    pub fn scripts(&self) -> Rc<ScriptRegistry> {
        Rc::clone(&self.scripts)
    }

    /// Context of the script imported as `name`.
    pub fn imported_script(&self, name: &str) -> Option<Rc<RefCell<Context>>> {
        self.imported.get(name).map(Rc::clone)
    }

    pub(crate) fn add_imported_script(&mut self, name: &str, script: Context) {
        self.imported
            .insert(name.to_string(), Rc::new(RefCell::new(script)));
    }

    pub(crate) fn import_chain(&self) -> &[String] {
        &self.import_chain
    }

    pub fn print(&self) -> &SharedPrintHandler {
        &self.print
    }

    // Export

    pub fn set_export(&mut self, value: Value) {
        self.export = Some(value);
    }

    pub fn take_export(&mut self) -> Option<Value> {
        self.export.take()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
