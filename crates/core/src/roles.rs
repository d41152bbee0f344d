//! Role-id to role-name resolution, supplied by the host.

use std::collections::HashMap;

/// Looks up the display name for a UAST role id.
///
/// Role-id to role-name tables live outside this crate entirely; the host
/// supplies the lookup. A role id the resolver cannot name is silently omitted
/// from the projected element rather than treated as an error.
pub trait RoleResolver {
    fn role_name(&self, role_id: u16) -> Option<&str>;
}

impl<F> RoleResolver for F
where
    F: Fn(u16) -> Option<&'static str>,
{
    fn role_name(&self, role_id: u16) -> Option<&str> {
        self(role_id)
    }
}

/// A [`RoleResolver`] backed by a static table, for hosts that can build one.
#[derive(Debug, Default, Clone)]
pub struct MapRoleResolver {
    names: HashMap<u16, String>,
}

impl MapRoleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role_id: u16, name: impl Into<String>) -> Self {
        self.names.insert(role_id, name.into());
        self
    }

    pub fn insert(&mut self, role_id: u16, name: impl Into<String>) {
        self.names.insert(role_id, name.into());
    }
}

impl RoleResolver for MapRoleResolver {
    fn role_name(&self, role_id: u16) -> Option<&str> {
        self.names.get(&role_id).map(String::as_str)
    }
}
