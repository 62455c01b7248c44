/// Binding registry: semantic action names and their kinds.
///
/// Fixed at strategy construction. Consumers such as a rebinding UI read it
/// but never add, remove or re-kind entries.
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{InputError, Result};

/// How a binding is sampled from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BindingKind {
    /// On/off button.
    Digital,
    /// Bounded scalar axis in `[-1.0, 1.0]`.
    Continuous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingDescriptor {
    pub name: &'static str,
    pub kind: BindingKind,
    pub label: &'static str,
}

impl BindingDescriptor {
    pub const fn digital(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            kind: BindingKind::Digital,
            label,
        }
    }

    pub const fn continuous(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            kind: BindingKind::Continuous,
            label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BindingRegistry {
    bindings: Vec<BindingDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl BindingRegistry {
    /// Build a registry. Names must be unique.
    pub fn new(bindings: Vec<BindingDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(bindings.len());
        for (i, binding) in bindings.iter().enumerate() {
            if index.insert(binding.name, i).is_some() {
                return Err(InputError::DuplicateBinding(binding.name.to_string()));
            }
        }
        Ok(Self { bindings, index })
    }

    /// Slot of `name` in registration order.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| InputError::UnknownBinding(name.to_string()))
    }

    pub fn descriptor(&self, name: &str) -> Result<&BindingDescriptor> {
        let i = self.index_of(name)?;
        Ok(&self.bindings[i])
    }

    pub fn kind(&self, name: &str) -> Result<BindingKind> {
        self.descriptor(name).map(|b| b.kind)
    }

    pub fn label(&self, name: &str) -> Result<&'static str> {
        self.descriptor(name).map(|b| b.label)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BindingDescriptor> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
