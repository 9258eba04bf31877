use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::PositionResolver;

/// A placed star system. The registry is the only owner of world
/// positions; routes reference systems by id and read positions through
/// `PositionResolver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SystemWire", into = "SystemWire")]
pub struct SystemRecord {
    pub id: String,
    pub name: String,
    pub position: (f32, f32),
}

impl SystemRecord {
    pub fn new(name: impl Into<String>, position: (f32, f32)) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            position,
        }
    }
}

/// Save-file shape of a system record: position flattened to `x`/`y`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SystemWire {
    id: String,
    name: String,
    x: f32,
    y: f32,
}

impl From<SystemWire> for SystemRecord {
    fn from(wire: SystemWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            position: (wire.x, wire.y),
        }
    }
}

impl From<SystemRecord> for SystemWire {
    fn from(record: SystemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            x: record.position.0,
            y: record.position.1,
        }
    }
}

/// Serialized as the save file's flat `systems` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<SystemRecord>", into = "Vec<SystemRecord>")]
pub struct SystemRegistry {
    systems: BTreeMap<String, SystemRecord>,
}

impl From<Vec<SystemRecord>> for SystemRegistry {
    fn from(records: Vec<SystemRecord>) -> Self {
        records.into_iter().collect()
    }
}

impl From<SystemRegistry> for Vec<SystemRecord> {
    fn from(registry: SystemRegistry) -> Self {
        registry.systems.into_values().collect()
    }
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: SystemRecord) {
        self.systems.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, system_id: &str) -> Option<SystemRecord> {
        self.systems.remove(system_id)
    }

    pub fn get(&self, system_id: &str) -> Option<&SystemRecord> {
        self.systems.get(system_id)
    }

    /// Move a system. Routes referencing it pick the new position up on
    /// their next path rebuild; nothing else needs touching.
    pub fn relocate(&mut self, system_id: &str, position: (f32, f32)) -> bool {
        match self.systems.get_mut(system_id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemRecord> {
        self.systems.values()
    }
}

impl PositionResolver for SystemRegistry {
    fn resolve(&self, waypoint_id: &str) -> Option<(f32, f32)> {
        self.systems.get(waypoint_id).map(|record| record.position)
    }
}

impl FromIterator<SystemRecord> for SystemRegistry {
    fn from_iter<I: IntoIterator<Item = SystemRecord>>(iter: I) -> Self {
        let mut registry = Self::new();
        for record in iter {
            registry.insert(record);
        }
        registry
    }
}
