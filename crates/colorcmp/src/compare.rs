//! A reference comparison driver over `serde_json::Value` trees.
//!
//! [`Comparer`] walks two JSON trees in lock-step and drives an [`Observer`]
//! with well-nested `push_step` / `report` / `pop_step` calls. Objects are
//! entered key by key in sorted order, arrays index by index; everything
//! else (scalars, or two nodes of different kinds) is compared as a leaf.

use std::any::type_name;
use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::config::CompareOptions;
use crate::error::{CompareError, CompareResult};
use crate::finite::to_json;
use crate::format::LeafValue;
use crate::path::PathStep;
use crate::reporter::{Comparison, Observer};

/// Walks two JSON trees and reports every leaf comparison to an observer.
#[derive(Clone, Debug, Default)]
pub struct Comparer {
    options: CompareOptions,
    root_type: Option<Cow<'static, str>>,
}

impl Comparer {
    /// A comparer with the given options.
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            root_type: None,
        }
    }

    /// Name used for the root value's type (shown when the roots themselves
    /// differ). Defaults to the JSON kind of the root.
    pub fn with_root_type(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.root_type = Some(name.into());
        self
    }

    /// Compare `x` and `y`, returning `true` if they are equal.
    pub fn compare<O: Observer + ?Sized>(&self, x: &Value, y: &Value, observer: &mut O) -> bool {
        self.walk(Some(x), Some(y), 0, observer)
    }

    /// Convert two serializable values into JSON trees and compare them.
    ///
    /// Fails if either value has no JSON form, including NaN or infinite
    /// floats anywhere inside it.
    pub fn compare_serialized<T, O>(&self, x: &T, y: &T, observer: &mut O) -> CompareResult<bool>
    where
        T: Serialize + ?Sized,
        O: Observer + ?Sized,
    {
        let to_tree = |side: &'static str, value: &T| {
            to_json(value).map_err(|source| CompareError::Unrepresentable {
                side,
                type_name: type_name::<T>(),
                source,
            })
        };
        let x = to_tree("left", x)?;
        let y = to_tree("right", y)?;

        let comparer = match &self.root_type {
            Some(_) => self.clone(),
            None => self.clone().with_root_type(type_name::<T>()),
        };
        Ok(comparer.compare(&x, &y, observer))
    }

    fn walk<O: Observer + ?Sized>(
        &self,
        x: Option<&Value>,
        y: Option<&Value>,
        depth: usize,
        observer: &mut O,
    ) -> bool {
        let descend = self.options.max_depth.map_or(true, |max| depth < max);

        match (x, y) {
            (Some(Value::Object(a)), Some(Value::Object(b))) if descend => {
                let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
                let mut equal = true;
                for key in keys {
                    observer.push_step(PathStep::for_key(key));
                    equal &= self.walk(a.get(key), b.get(key), depth + 1, observer);
                    observer.pop_step();
                }
                equal
            }
            (Some(Value::Array(a)), Some(Value::Array(b))) if descend => {
                let mut equal = true;
                for i in 0..a.len().max(b.len()) {
                    observer.push_step(PathStep::Index(i));
                    equal &= self.walk(a.get(i), b.get(i), depth + 1, observer);
                    observer.pop_step();
                }
                equal
            }
            _ => self.leaf(x, y, depth, observer),
        }
    }

    fn leaf<O: Observer + ?Sized>(
        &self,
        x: Option<&Value>,
        y: Option<&Value>,
        depth: usize,
        observer: &mut O,
    ) -> bool {
        if x == y {
            observer.report(Comparison::Equal);
            return true;
        }
        trace!(depth, "leaf mismatch");
        observer.report(Comparison::unequal(
            self.resolve(x, depth),
            self.resolve(y, depth),
        ));
        false
    }

    fn resolve(&self, value: Option<&Value>, depth: usize) -> LeafValue {
        let Some(value) = value else {
            return LeafValue::missing();
        };
        let name = match &self.root_type {
            Some(root) if depth == 0 => root.clone(),
            _ => Cow::Borrowed(kind_name(value)),
        };
        LeafValue::from_json(name, value.clone())
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compare two serializable values with default options.
///
/// Fails only if one of the values cannot be converted into a JSON tree.
pub fn compare_serialized<T, O>(x: &T, y: &T, observer: &mut O) -> CompareResult<bool>
where
    T: Serialize + ?Sized,
    O: Observer + ?Sized,
{
    Comparer::default().compare_serialized(x, y, observer)
}
