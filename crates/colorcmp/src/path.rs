//! Traversal paths: where in the two trees a comparison is happening.

use std::fmt;

/// One step from a parent node to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Named field access, rendered `.name`.
    Field(String),
    /// Sequence index, rendered `[3]`.
    Index(usize),
    /// Map key access, rendered `["key"]`.
    MapKey(String),
    /// Narrowing to a concrete type, rendered `.(Type)`.
    TypeAssertion(String),
}

impl PathStep {
    /// Step into a named field.
    pub fn field(name: impl Into<String>) -> Self {
        PathStep::Field(name.into())
    }

    /// Step into a map entry.
    pub fn map_key(key: impl Into<String>) -> Self {
        PathStep::MapKey(key.into())
    }

    /// Step for an object key: identifier-like keys are treated as fields,
    /// anything else as a map key.
    pub fn for_key(key: &str) -> Self {
        let mut chars = key.chars();
        let is_ident = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_alphabetic())
            && chars.all(|c| c == '_' || c.is_alphanumeric());
        if is_ident {
            Self::field(key)
        } else {
            Self::map_key(key)
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, ".{name}"),
            PathStep::Index(i) => write!(f, "[{i}]"),
            PathStep::MapKey(key) => write!(f, "[{key:?}]"),
            PathStep::TypeAssertion(ty) => write!(f, ".({ty})"),
        }
    }
}

/// The stack of steps from the root to the node being compared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// An empty path (the root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step when entering a child node.
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// Remove the last step.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty: every pop must match an earlier push.
    pub fn pop(&mut self) -> PathStep {
        match self.steps.pop() {
            Some(step) => step,
            None => panic!("path popped more times than pushed"),
        }
    }

    /// The innermost step, if any.
    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Number of steps from the root.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` at the root.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps, outermost first.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.steps.iter().try_for_each(|step| write!(f, "{step}"))
    }
}
