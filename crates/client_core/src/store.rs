use serde::{ser::SerializeMap, Serialize, Serializer};
use shared::{
    domain::{EntityId, Outcome},
    protocol::OutcomeMap,
};

/// Current outcome per tracked entity.
///
/// The key set is fixed when the store is built and every key always holds
/// exactly one outcome. Iteration and serialization follow the order the
/// entities were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeStore {
    entries: Vec<(EntityId, Outcome)>,
}

impl OutcomeStore {
    pub fn new(entities: impl IntoIterator<Item = EntityId>, default: &Outcome) -> Self {
        let mut entries: Vec<(EntityId, Outcome)> = Vec::new();
        for entity in entities {
            if entries.iter().any(|(existing, _)| *existing == entity) {
                continue;
            }
            entries.push((entity, default.clone()));
        }
        Self { entries }
    }

    pub fn get(&self, entity: &EntityId) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(id, _)| id == entity)
            .map(|(_, outcome)| outcome)
    }

    /// Overwrites the outcome for a tracked entity. The label is not checked
    /// against any known set. Returns `false` when `entity` is not tracked.
    pub fn set(&mut self, entity: &EntityId, outcome: Outcome) -> bool {
        match self.entries.iter_mut().find(|(id, _)| id == entity) {
            Some((_, slot)) => {
                *slot = outcome;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entries.iter().any(|(id, _)| id == entity)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&EntityId, &Outcome)> {
        self.entries.iter().map(|(id, outcome)| (id, outcome))
    }

    pub fn to_map(&self) -> OutcomeMap {
        self.entries
            .iter()
            .map(|(id, outcome)| (id.clone(), outcome.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OutcomeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, outcome) in &self.entries {
            map.serialize_entry(id, outcome)?;
        }
        map.end()
    }
}
