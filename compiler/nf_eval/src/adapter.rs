//! Exposing script closures to host code.
//!
//! A host describes the single-method callback shape it expects as a
//! [`HostInterface`]. [`ClosureAdapter`] binds a script function value to
//! such an interface: calls to the one abstract method are forwarded to the
//! function, while `equals`, `hashCode` and `toString` are answered without
//! entering the interpreter. Host code holds adapters as `dyn HostCallable`.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use nf_ir::FunctionSignature;

use crate::errors::{
    arity_mismatch, context_busy, method_not_found, multiple_abstract_methods, no_abstract_method,
    EvalError, EvalResult,
};
use crate::function::{invoke, FunctionReference};
use crate::{Context, Value};

/// Callable seam between host code and script closures.
pub trait HostCallable {
    fn invoke(&self, args: &[Value]) -> EvalResult;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostMethod {
    pub name: String,
    pub arity: usize,
    /// Whether an implementation must supply this method.
    pub is_abstract: bool,
}

impl HostMethod {
    pub fn required(name: impl Into<String>, arity: usize) -> Self {
        HostMethod {
            name: name.into(),
            arity,
            is_abstract: true,
        }
    }

    pub fn provided(name: impl Into<String>, arity: usize) -> Self {
        HostMethod {
            name: name.into(),
            arity,
            is_abstract: false,
        }
    }
}

/// A host callback interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostInterface {
    pub name: String,
    pub methods: Vec<HostMethod>,
}

impl HostInterface {
    pub fn new(name: impl Into<String>, methods: Vec<HostMethod>) -> Self {
        HostInterface {
            name: name.into(),
            methods,
        }
    }

    fn single(name: &str, method: &str, arity: usize) -> Self {
        Self::new(name, vec![HostMethod::required(method, arity)])
    }

    pub fn runnable() -> Self {
        Self::single("Runnable", "run", 0)
    }

    pub fn supplier() -> Self {
        Self::single("Supplier", "get", 0)
    }

    pub fn consumer() -> Self {
        Self::single("Consumer", "accept", 1)
    }

    pub fn function() -> Self {
        Self::single("Function", "apply", 1)
    }

    pub fn bi_consumer() -> Self {
        Self::single("BiConsumer", "accept", 2)
    }

    pub fn bi_function() -> Self {
        Self::single("BiFunction", "apply", 2)
    }

    /// The interface a function with this signature is exposed as.
    pub fn for_signature(signature: &FunctionSignature) -> Self {
        match (signature.arity(), signature.returns_void()) {
            (0, true) => Self::runnable(),
            (0, false) => Self::supplier(),
            (1, true) => Self::consumer(),
            (1, false) => Self::function(),
            (2, true) => Self::bi_consumer(),
            (2, false) => Self::bi_function(),
            (n, _) => Self::single(&format!("Function{n}"), "apply", n),
        }
    }

    pub fn abstract_methods(&self) -> impl Iterator<Item = &HostMethod> {
        self.methods.iter().filter(|m| m.is_abstract)
    }
}

impl fmt::Display for HostInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A script function bound to a host interface.
pub struct ClosureAdapter {
    interface: HostInterface,
    method: String,
    reference: Rc<FunctionReference>,
    context: Rc<RefCell<Context>>,
}

impl ClosureAdapter {
    /// Fails unless `interface` has exactly one abstract method.
    pub fn new(
        interface: HostInterface,
        reference: Rc<FunctionReference>,
        context: Rc<RefCell<Context>>,
    ) -> Result<Self, EvalError> {
        let mut abstract_methods = interface.abstract_methods();
        let Some(method) = abstract_methods.next() else {
            return Err(no_abstract_method(&interface.name));
        };
        let method = method.name.clone();
        let extra = abstract_methods.count();
        if extra > 0 {
            return Err(multiple_abstract_methods(&interface.name, extra + 1));
        }
        tracing::debug!(
            interface = %interface,
            method = %method,
            function = reference.name(),
            "adapter created"
        );
        Ok(ClosureAdapter {
            interface,
            method,
            reference,
            context,
        })
    }

    /// Adapt to the interface matching the function's own signature.
    pub fn for_reference(
        reference: Rc<FunctionReference>,
        context: Rc<RefCell<Context>>,
    ) -> Result<Self, EvalError> {
        let interface = HostInterface::for_signature(&reference.signature);
        Self::new(interface, reference, context)
    }

    pub fn interface(&self) -> &HostInterface {
        &self.interface
    }

    /// Name of the forwarded method.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn reference(&self) -> &Rc<FunctionReference> {
        &self.reference
    }

    /// Dispatch a call to `method` by name.
    pub fn call(&self, method: &str, args: &[Value]) -> EvalResult {
        if method == self.method {
            return self.forward(args);
        }
        match method {
            "equals" => {
                let [other] = args else {
                    return Err(arity_mismatch(method, 1, args.len()));
                };
                Ok(Value::Bool(match other {
                    Value::Function(other) => {
                        Rc::ptr_eq(other, &self.reference) || **other == *self.reference
                    }
                    _ => false,
                }))
            }
            "hashCode" => {
                if !args.is_empty() {
                    return Err(arity_mismatch(method, 0, args.len()));
                }
                Ok(Value::Int(self.identity_hash()))
            }
            "toString" => {
                if !args.is_empty() {
                    return Err(arity_mismatch(method, 0, args.len()));
                }
                Ok(Value::string(self.to_string()))
            }
            _ => Err(method_not_found(method, &self.interface.name)),
        }
    }

    fn forward(&self, args: &[Value]) -> EvalResult {
        let mut context = self.context.try_borrow_mut().map_err(|_| context_busy())?;
        invoke(&mut context, &self.reference, args)
    }

    fn identity_hash(&self) -> i64 {
        let mut hasher = DefaultHasher::new();
        Rc::as_ptr(&self.reference).hash(&mut hasher);
        i64::from_ne_bytes(hasher.finish().to_ne_bytes())
    }
}

impl HostCallable for ClosureAdapter {
    fn invoke(&self, args: &[Value]) -> EvalResult {
        self.forward(args)
    }
}

impl fmt::Display for ClosureAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} -> {}", self.interface, self.method, self.reference)
    }
}
