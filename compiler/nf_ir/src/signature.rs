//! Function signatures: `Fun<param, param : return>`.
//!
//! Signatures annotate function-typed variables and are derived from
//! definitions when a named function is referenced. Two signatures compare
//! equal when their arities match and every type matches after mapping
//! primitive spellings to their boxed names (`int` and `Integer` are the
//! same type).

use std::fmt;

use crate::FunctionDefinition;

/// Map a primitive type spelling to its boxed name; other names pass through.
pub fn normalize_type_name(name: &str) -> &str {
    match name {
        "int" => "Integer",
        "long" => "Long",
        "short" => "Short",
        "byte" => "Byte",
        "char" => "Character",
        "float" => "Float",
        "double" => "Double",
        "boolean" | "bool" => "Boolean",
        other => other,
    }
}

/// Parameter types plus return type of a function value.
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub parameter_types: Vec<String>,
    pub return_type: String,
}

impl FunctionSignature {
    pub fn new(parameter_types: Vec<String>, return_type: impl Into<String>) -> Self {
        FunctionSignature {
            parameter_types,
            return_type: return_type.into(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Parse `Fun<A, B : R>`.
    pub fn parse(text: &str) -> Result<Self, SignatureError> {
        let text = text.trim();
        let Some(rest) = text.strip_prefix("Fun<") else {
            return Err(SignatureError::new(SignatureErrorKind::MissingPrefix, text));
        };
        let Some(body) = rest.strip_suffix('>') else {
            return Err(SignatureError::new(
                SignatureErrorKind::MissingClosingBracket,
                text,
            ));
        };
        if body.trim().is_empty() {
            return Err(SignatureError::new(SignatureErrorKind::EmptyBody, text));
        }
        check_balanced(body, text)?;

        let Some(colon) = top_level_colon(body) else {
            return Err(SignatureError::new(SignatureErrorKind::MissingColon, text));
        };
        let params_text = body[..colon].trim();
        let return_type = body[colon + 1..].trim();
        if return_type.is_empty() {
            return Err(SignatureError::new(
                SignatureErrorKind::EmptyReturnType,
                text,
            ));
        }

        let mut parameter_types = Vec::new();
        if !params_text.is_empty() {
            for param in split_top_level_commas(params_text) {
                let param = param.trim();
                if param.is_empty() {
                    return Err(SignatureError::new(
                        SignatureErrorKind::EmptyParameter,
                        text,
                    ));
                }
                parameter_types.push(param.to_string());
            }
        }

        Ok(FunctionSignature {
            parameter_types,
            return_type: return_type.to_string(),
        })
    }

    /// Signature of a definition: declared parameter types, return types
    /// joined with `, `, or `Void` when the function returns nothing.
    pub fn from_definition(def: &FunctionDefinition) -> Self {
        let parameter_types = def.parameters.iter().map(|p| p.ty.clone()).collect();
        let return_type = if def.return_types.is_empty() {
            "Void".to_string()
        } else {
            def.return_types.join(", ")
        };
        FunctionSignature {
            parameter_types,
            return_type,
        }
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "Void" || self.return_type == "void"
    }
}

impl PartialEq for FunctionSignature {
    fn eq(&self, other: &Self) -> bool {
        self.arity() == other.arity()
            && normalize_type_name(&self.return_type) == normalize_type_name(&other.return_type)
            && self
                .parameter_types
                .iter()
                .zip(&other.parameter_types)
                .all(|(a, b)| normalize_type_name(a) == normalize_type_name(b))
    }
}

impl Eq for FunctionSignature {}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameter_types.is_empty() {
            write!(f, "Fun<: {}>", self.return_type)
        } else {
            write!(
                f,
                "Fun<{} : {}>",
                self.parameter_types.join(", "),
                self.return_type
            )
        }
    }
}

fn check_balanced(body: &str, text: &str) -> Result<(), SignatureError> {
    let mut depth = 0i32;
    for c in body.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SignatureError::new(
                        SignatureErrorKind::UnbalancedBrackets,
                        text,
                    ));
                }
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(SignatureError::new(
            SignatureErrorKind::UnbalancedBrackets,
            text,
        ))
    }
}

/// Byte offset of the first colon outside nested angle brackets.
fn top_level_colon(body: &str) -> Option<usize> {
    let mut depth = 0u32;
    for (i, c) in body.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// What was wrong with a signature annotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignatureErrorKind {
    MissingPrefix,
    MissingClosingBracket,
    EmptyBody,
    MissingColon,
    EmptyReturnType,
    EmptyParameter,
    UnbalancedBrackets,
}

impl SignatureErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            SignatureErrorKind::MissingPrefix => "function type must start with `Fun<`",
            SignatureErrorKind::MissingClosingBracket => "function type must end with `>`",
            SignatureErrorKind::EmptyBody => "function type has no parameter or return types",
            SignatureErrorKind::MissingColon => {
                "function type needs `:` between parameters and return type"
            }
            SignatureErrorKind::EmptyReturnType => "function type has an empty return type",
            SignatureErrorKind::EmptyParameter => "function type has an empty parameter type",
            SignatureErrorKind::UnbalancedBrackets => "function type has unbalanced `<` `>`",
        }
    }
}

/// Malformed `Fun<...>` text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureError {
    pub kind: SignatureErrorKind,
    pub text: String,
}

impl SignatureError {
    pub fn new(kind: SignatureErrorKind, text: impl Into<String>) -> Self {
        SignatureError {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: `{}`", self.kind.message(), self.text)
    }
}

impl std::error::Error for SignatureError {}
