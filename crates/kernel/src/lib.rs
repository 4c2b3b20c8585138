//! Core building blocks shared by every playground crate: the [`Module`]
//! contract, the [`ModuleRegistry`] lifecycle, and layered [`settings`].

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{Endpoint, InitCtx, Module};
pub use registry::ModuleRegistry;
