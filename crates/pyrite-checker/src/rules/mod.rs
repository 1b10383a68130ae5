pub mod metaclass;
pub mod mro;
pub mod operators;
pub mod optional_default;
pub mod overrides;
pub mod returns;
pub mod reveal;
pub mod type_ignore;
pub mod unreachable;
pub mod unused;
