pub mod books;
pub mod tools;
pub mod users;

use playground_kernel::{settings::Settings, ModuleRegistry};

use crate::store::SharedStore;

/// Register all playground modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: &SharedStore,
    settings: &Settings,
) -> anyhow::Result<()> {
    registry.register(books::create_module(store.clone()))?;
    registry.register(users::create_module(store.clone(), &settings.auth))?;
    registry.register(tools::create_module())?;
    Ok(())
}
