use std::collections::HashMap;

use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int | Type::Bool | Type::Unit => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Pair(is_ref, t1, t2) => Type::pair(*is_ref, self.apply(t1), self.apply(t2)),
            Type::Class(t1, t2) => Type::class(self.apply(t1), self.apply(t2)),
            Type::Ref(t) => Type::reference(self.apply(t)),
            Type::Arrow(t1, t2) => Type::arrow(self.apply(t1), self.apply(t2)),
        }
    }

    /// `self ∘ other`: applying the result is applying `other`, then `self`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result: HashMap<_, _> = other
            .0
            .iter()
            .map(|(var, ty)| (var.clone(), self.apply(ty)))
            .collect();

        for (var, ty) in &self.0 {
            result.entry(var.clone()).or_insert_with(|| ty.clone());
        }

        Substitution(result)
    }
}
