//! Parametrized building blocks: named parameters, the `Module` trait and a
//! linear layer.

pub mod layers;
pub mod module;
pub mod parameter;

pub use layers::linear::Linear;
pub use module::Module;
pub use parameter::Parameter;
