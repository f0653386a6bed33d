use crate::{
    TreeEntity,
    driver::{TreeDriver, TreeMapping},
    error::TreeMappingError,
    model::TypeDescriptor,
    role::{FieldRoleResolver, MarkerReader},
};
use std::collections::BTreeMap;

///
/// TreeRegistry
///
/// Caches the driver's verdict per type name so each type is mapped once.
/// `None` entries record types that were inspected and are not trees.
/// Failed passes are not cached; the caller fixes the input and retries.
///

#[derive(Clone, Debug)]
pub struct TreeRegistry<R = MarkerReader> {
    driver: TreeDriver<R>,
    mappings: BTreeMap<String, Option<TreeMapping>>,
}

impl Default for TreeRegistry {
    fn default() -> Self {
        Self::new(TreeDriver::default())
    }
}

impl<R: FieldRoleResolver> TreeRegistry<R> {
    #[must_use]
    pub const fn new(driver: TreeDriver<R>) -> Self {
        Self {
            driver,
            mappings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn driver(&self) -> &TreeDriver<R> {
        &self.driver
    }

    /// Return the cached mapping for the descriptor's type, running the
    /// driver on first sight.
    pub fn get_or_load(
        &mut self,
        descriptor: &dyn TypeDescriptor,
    ) -> Result<Option<&TreeMapping>, TreeMappingError> {
        let type_name = descriptor.type_name();

        if !self.mappings.contains_key(type_name) {
            let mapping = self.driver.load(descriptor)?;
            self.mappings.insert(type_name.to_string(), mapping);
        }

        Ok(self.get(type_name))
    }

    /// Map a derived entity type.
    pub fn load_entity<E: TreeEntity>(&mut self) -> Result<Option<&TreeMapping>, TreeMappingError> {
        let model = E::type_model();

        self.get_or_load(&model)
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TreeMapping> {
        self.mappings.get(type_name).and_then(Option::as_ref)
    }

    /// True once the type has been inspected, tree or not.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.mappings.contains_key(type_name)
    }

    #[must_use]
    pub fn is_tree(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }

    /// Tree types and their mappings, ordered by type name.
    pub fn trees(&self) -> impl Iterator<Item = (&str, &TreeMapping)> {
        self.mappings
            .iter()
            .filter_map(|(name, mapping)| mapping.as_ref().map(|m| (name.as_str(), m)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
