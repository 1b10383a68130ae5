//! Per-file language-feature summary.
//!
//! Set during the binder's single AST walk so later stages can ask "does
//! this file define async generators" in O(1) instead of re-walking the
//! tree, mirroring the teacher binder's `FileFeatures` bitfield.

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct FileFeatures: u8 {
        const GENERATOR_FUNCTIONS = 1 << 0;
        const ASYNC_GENERATOR_FUNCTIONS = 1 << 1;
        const WALRUS_TARGETS = 1 << 2;
    }
}
