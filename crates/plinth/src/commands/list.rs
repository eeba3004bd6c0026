//! List the component catalog.

use plinth_components::ComponentCatalog;

/// Run the list command.
pub fn run() {
    let catalog = ComponentCatalog::builtin();

    for descriptor in catalog.iter() {
        println!("{}  ({})", descriptor.simple_name(), descriptor.qualified_name());
        for param in descriptor.params() {
            println!("    {}: {}", param.name, param.kind);
        }
    }
}
