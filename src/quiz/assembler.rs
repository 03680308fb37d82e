//! Screen assembler: computes the active screen list for a role.

use std::sync::Arc;

use super::catalog::{Catalog, Screen};

/// Intake screens, followed by the role's screens when the role is known.
///
/// Depends on the role alone, so unrelated answers can never reorder or
/// resize the list.
pub fn assemble(catalog: &Catalog, role: Option<&str>) -> Vec<Arc<Screen>> {
    let mut screens: Vec<Arc<Screen>> = catalog.intake().to_vec();
    if let Some(role_screens) = role.and_then(|r| catalog.role_screens(r)) {
        screens.extend(role_screens.iter().cloned());
    }
    screens
}
