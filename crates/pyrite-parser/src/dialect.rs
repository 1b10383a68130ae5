//! Version-gated syntax acceptance.
//!
//! The parser asks `Dialect` before accepting version-specific constructs
//! rather than hard-coding a single grammar, the same way a target-aware
//! compiler front end consults its configured language level before
//! accepting newer syntax.

use pyrite_common::settings::PythonVersion;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Dialect {
    pub python_version: PythonVersion,
}

impl Dialect {
    #[must_use]
    pub fn new(python_version: PythonVersion) -> Self {
        Self { python_version }
    }

    #[must_use]
    pub fn allows_walrus(self) -> bool {
        self.python_version.supports_walrus()
    }

    #[must_use]
    pub fn allows_match_statement(self) -> bool {
        self.python_version.supports_match_statement()
    }

    #[must_use]
    pub fn allows_type_alias_statement(self) -> bool {
        self.python_version.supports_pep695_generics()
    }

    #[must_use]
    pub fn allows_pep695_generic_params(self) -> bool {
        self.python_version.supports_pep695_generics()
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(PythonVersion::default())
    }
}
