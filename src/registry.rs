use crate::error::RegistryError;
use crate::path::resolve;
use crate::tag::Tag;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Path to Forge block id mapping inside `level.dat`.
pub const BLOCK_REGISTRY_PATH: &str = "FML/Registries/minecraft:blocks/ids";

/// Bidirectional mapping between block names and numeric block ids.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BlockRegistry {
    ids: HashMap<String, u32>,
    names: BTreeMap<u32, String>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        BlockRegistry::default()
    }

    /// Builds registry from `level.dat` root tag.
    ///
    /// First list entry carries no mapping and is skipped.
    pub fn from_level(level: &Tag) -> Result<Self, RegistryError> {
        let entries = resolve(level, BLOCK_REGISTRY_PATH)?
            .as_list()
            .map_err(|type_error| RegistryError::NotAList { type_error })?;

        let mut registry = BlockRegistry::new();

        for (index, entry) in entries.iter().enumerate().skip(1) {
            let (name, id) = read_entry(index, entry)?;
            registry.insert(name, id);
        }

        debug!(target: "anvil-finder", "Loaded {} block ids", registry.len());

        Ok(registry)
    }

    /// Binds `name` to `id`, dropping previous bindings of either.
    pub fn insert(&mut self, name: impl Into<String>, id: u32) {
        let name = name.into();

        if let Some(previous_id) = self.ids.remove(&name) {
            self.names.remove(&previous_id);
        }

        if let Some(previous_name) = self.names.remove(&id) {
            self.ids.remove(&previous_name);
        }

        self.ids.insert(name.clone(), id);
        self.names.insert(id, name);
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Entries ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn read_entry(index: usize, entry: &Tag) -> Result<(String, u32), RegistryError> {
    let compound = entry
        .as_compound()
        .map_err(|type_error| RegistryError::Entry { index, type_error })?;

    let field = |field: &'static str| {
        compound
            .get(field)
            .ok_or(RegistryError::MissingField { index, field })
    };

    let name = field("K")?
        .as_str()
        .map_err(|type_error| RegistryError::FieldType {
            index,
            field: "K",
            type_error,
        })?;

    let id = field("V")?
        .as_i32()
        .map_err(|type_error| RegistryError::FieldType {
            index,
            field: "V",
            type_error,
        })?;

    if id < 0 {
        return Err(RegistryError::NegativeId {
            index,
            name: name.to_owned(),
            id,
        });
    }

    Ok((name.to_owned(), id as u32))
}
