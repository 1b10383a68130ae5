//! Import statement binding.
//!
//! Only records *that* a name was imported and which module string it came
//! from — actually locating the module on disk and following namespace
//! package/stub precedence is a different pass entirely, over a whole
//! module graph the binder never sees one file at a time.

use crate::binder::Binder;
use crate::symbol::{Declaration, SymbolFlags};
use pyrite_parser::node::ImportAlias;
use pyrite_parser::NodeIndex;

impl Binder<'_> {
    pub(crate) fn bind_import(&mut self, stmt: NodeIndex, names: &[ImportAlias]) {
        for alias in names {
            let bound_name = alias.asname.clone().unwrap_or_else(|| top_level_component(&alias.name));
            let decl = Declaration::ImportAlias {
                node: stmt,
                span: alias.span,
                module_path: alias.name.clone(),
            };
            self.declare(&bound_name, decl, SymbolFlags::IMPORT);
        }
    }

    pub(crate) fn bind_import_from(&mut self, stmt: NodeIndex, module: Option<&str>, names: &[ImportAlias]) {
        if let [only] = names {
            if only.name == "*" {
                let wildcard = self.create_flow_wildcard_import(self.current_flow, stmt);
                self.current_flow = wildcard;
                if let Some(scope) = self.scopes.get_mut(self.current_scope_id) {
                    scope.flags.insert(crate::scope::ScopeFlags::HAS_WILDCARD_IMPORT);
                }
                return;
            }
        }
        for alias in names {
            let bound_name = alias.asname.clone().unwrap_or_else(|| alias.name.clone());
            let decl = Declaration::ImportFromAs {
                node: stmt,
                span: alias.span,
                module_path: module.map(str::to_string),
                original_name: alias.name.clone(),
            };
            self.declare(&bound_name, decl, SymbolFlags::IMPORT);
        }
    }
}

/// `import a.b.c` binds the top-level package `a`, not the submodule — the
/// same rule that makes `a.b.c.f()` work after a bare `import a.b.c`.
fn top_level_component(dotted: &str) -> String {
    dotted.split('.').next().unwrap_or(dotted).to_string()
}
