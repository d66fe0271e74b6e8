use im::HashMap;

use super::ty::Type;
use crate::core::Binder;

/// Typing context. Persistent, so extending for a nested abstraction shares
/// structure with the enclosing context instead of copying it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Type>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: Vec<(String, Type)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    /// Extend with a binder. Anonymous binders leave the context unchanged.
    pub fn extend(&self, binder: &Binder, ty: Type) -> TypeEnv {
        match binder {
            Binder::Anon => self.clone(),
            Binder::Named(name) => TypeEnv {
                bindings: self.bindings.update(name.clone(), ty),
            },
        }
    }
}
