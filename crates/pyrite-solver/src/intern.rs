//! Interns [`TypeData`] behind a stable [`TypeId`] so structurally equal
//! types compare by a `u32` instead of a deep structural comparison, and
//! normalizes unions at construction time the way the teacher's
//! `TypeInterner::union2`/`union3`/`union` normalize `any`/`never` away
//! and flatten nested unions, generalized to Python's flatter lattice
//! (no intersection types to normalize against).

use crate::types::{ClassData, ClassId, ModuleId, TypeData, TypeVec};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const UNKNOWN: TypeId = TypeId(0);
    pub const ANY: TypeId = TypeId(1);
    pub const NONE: TypeId = TypeId(2);
    pub const NEVER: TypeId = TypeId(3);

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns [`TypeData`] and [`ClassData`]. `Unknown`/`Any`/`None`/`Never`
/// occupy fixed ids 0-3 so call sites can compare against the constants
/// without a lookup.
pub struct TypeInterner {
    types: RefCell<Vec<TypeData>>,
    index: RefCell<FxHashMap<TypeData, TypeId>>,
    classes: RefCell<Vec<ClassData>>,
    modules: RefCell<Vec<String>>,
    module_index: RefCell<FxHashMap<String, ModuleId>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        let types = vec![TypeData::Unknown, TypeData::Any, TypeData::None, TypeData::Never];
        let mut index = FxHashMap::default();
        for (i, data) in types.iter().enumerate() {
            index.insert(data.clone(), TypeId(i as u32));
        }
        Self { types: RefCell::new(types), index: RefCell::new(index), classes: RefCell::new(Vec::new()), modules: RefCell::new(Vec::new()), module_index: RefCell::new(FxHashMap::default()) }
    }

    /// Intern arbitrary [`TypeData`]. Callers building a `Union` should go
    /// through [`Self::union`] instead so normalization runs.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(id) = self.index.borrow().get(&data) {
            return *id;
        }
        let mut types = self.types.borrow_mut();
        let id = TypeId(types.len() as u32);
        types.push(data.clone());
        self.index.borrow_mut().insert(data, id);
        id
    }

    #[must_use]
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.borrow().get(id.index()).cloned()
    }

    pub fn intern_class(&self, data: ClassData) -> ClassId {
        let mut classes = self.classes.borrow_mut();
        let id = ClassId(classes.len() as u32);
        classes.push(data);
        id
    }

    #[must_use]
    pub fn lookup_class(&self, id: ClassId) -> ClassData {
        self.classes.borrow()[id.0 as usize].clone()
    }

    pub fn update_class(&self, id: ClassId, data: ClassData) {
        self.classes.borrow_mut()[id.0 as usize] = data;
    }

    pub fn intern_module(&self, path: impl Into<String>) -> ModuleId {
        let path = path.into();
        if let Some(id) = self.module_index.borrow().get(&path) {
            return *id;
        }
        let mut modules = self.modules.borrow_mut();
        let id = ModuleId(modules.len() as u32);
        modules.push(path.clone());
        self.module_index.borrow_mut().insert(path, id);
        id
    }

    #[must_use]
    pub fn module_path(&self, id: ModuleId) -> String {
        self.modules.borrow()[id.0 as usize].clone()
    }

    #[must_use]
    pub fn union2(&self, a: TypeId, b: TypeId) -> TypeId {
        self.union(vec![a, b])
    }

    #[must_use]
    pub fn union3(&self, a: TypeId, b: TypeId, c: TypeId) -> TypeId {
        self.union(vec![a, b, c])
    }

    /// Flatten nested unions, drop duplicates and `Never` members, and
    /// collapse to `Any` if any member is `Any`. An empty input is
    /// `Never` (the bottom type, matching "no possible value"); a single
    /// surviving member returns that member directly rather than a
    /// one-element `Union`.
    #[must_use]
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: TypeVec = TypeVec::new();
        let mut seen = rustc_hash::FxHashSet::default();

        let mut stack = members;
        while let Some(id) = stack.pop() {
            if id == TypeId::ANY {
                return TypeId::ANY;
            }
            if id == TypeId::NEVER {
                continue;
            }
            match self.lookup(id) {
                Some(TypeData::Union(nested)) => stack.extend(nested.iter().copied()),
                _ => {
                    if seen.insert(id) {
                        flat.push(id);
                    }
                }
            }
        }

        if flat.is_empty() {
            return TypeId::NEVER;
        }
        if flat.len() == 1 {
            return flat[0];
        }
        flat.sort_unstable_by_key(|id| id.0);
        self.intern(TypeData::Union(flat))
    }

    #[must_use]
    pub fn type_list(&self, members: &TypeVec) -> Vec<TypeId> {
        members.iter().copied().collect()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
