use crate::id::ResourceId;
use std::collections::HashMap;

/// A resource kind definition: identity plus display name. Immutable once
/// defined. Stores and recipes reference kinds by id, never own them.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub name: String,
}

/// Builder for constructing an immutable [`ResourceCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    resources: Vec<ResourceDef>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource kind. Returns its ID.
    pub fn register_resource(&mut self, name: &str) -> ResourceId {
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(ResourceDef {
            name: name.to_string(),
        });
        id
    }

    /// Finalize and build the immutable catalog. Duplicate names are rejected.
    pub fn build(self) -> Result<ResourceCatalog, CatalogError> {
        let mut name_to_id = HashMap::new();
        for (index, def) in self.resources.iter().enumerate() {
            let id = ResourceId(index as u32);
            if name_to_id.insert(def.name.clone(), id).is_some() {
                return Err(CatalogError::DuplicateName(def.name.clone()));
            }
        }
        Ok(ResourceCatalog {
            resources: self.resources,
            name_to_id,
        })
    }
}

/// Immutable catalog of resource kinds. Frozen after build().
#[derive(Debug)]
pub struct ResourceCatalog {
    resources: Vec<ResourceDef>,
    name_to_id: HashMap<String, ResourceId>,
}

impl ResourceCatalog {
    pub fn get(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.resources.get(id.0 as usize)
    }

    /// Display name for a resource kind.
    pub fn name(&self, id: ResourceId) -> Option<&str> {
        self.get(id).map(|def| def.name.as_str())
    }

    /// Lookup a resource kind by name.
    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.name_to_id.get(name).copied()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate resource name: {0}")]
    DuplicateName(String),
}
