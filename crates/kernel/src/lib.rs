//! Core building blocks shared by every GameTracker crate: layered settings,
//! the [`Module`] contract and the [`ModuleRegistry`] that drives module
//! lifecycles.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{IndexSpec, InitCtx, Module};
pub use registry::ModuleRegistry;
