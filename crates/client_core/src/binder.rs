use shared::domain::{EntityId, EntitySpec, Outcome};
use tracing::debug;

use crate::store::OutcomeStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleControl {
    pub outcome: Outcome,
    pub active: bool,
}

/// The mutually-exclusive controls belonging to one entity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleGroup {
    pub entity: EntitySpec,
    pub controls: Vec<ToggleControl>,
}

impl ToggleGroup {
    pub fn active_outcome(&self) -> Option<&Outcome> {
        self.controls
            .iter()
            .find(|control| control.active)
            .map(|control| &control.outcome)
    }

    /// Marks the control labelled `outcome` as the only active one.
    /// A group with no such control is left untouched.
    fn select(&mut self, outcome: &Outcome) -> bool {
        if !self.controls.iter().any(|control| control.outcome == *outcome) {
            return false;
        }
        for control in &mut self.controls {
            control.active = control.outcome == *outcome;
        }
        true
    }
}

/// Display state for every entity row. The store stays authoritative; the
/// binder mirrors it and forwards control activations into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleBinder {
    groups: Vec<ToggleGroup>,
}

impl ToggleBinder {
    pub fn bind(entities: &[EntitySpec], outcomes: &[Outcome], store: &OutcomeStore) -> Self {
        let groups = entities
            .iter()
            .map(|entity| {
                let current = store.get(&entity.id);
                ToggleGroup {
                    entity: entity.clone(),
                    controls: outcomes
                        .iter()
                        .map(|outcome| ToggleControl {
                            outcome: outcome.clone(),
                            active: current == Some(outcome),
                        })
                        .collect(),
                }
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[ToggleGroup] {
        &self.groups
    }

    pub fn group(&self, entity: &EntityId) -> Option<&ToggleGroup> {
        self.groups.iter().find(|group| group.entity.id == *entity)
    }

    /// Handles a click on the `outcome` control of `entity`'s row.
    pub fn activate(
        &mut self,
        entity: &EntityId,
        outcome: &Outcome,
        store: &mut OutcomeStore,
    ) -> bool {
        let Some(group) = self.groups.iter_mut().find(|group| group.entity.id == *entity) else {
            return false;
        };
        if !group.select(outcome) {
            return false;
        }
        store.set(entity, outcome.clone());
        debug!(entity = %entity, outcome = %outcome, "toggle activated");
        true
    }

    /// Reflects an outcome map onto the controls. Entities without a row and
    /// values without a matching control are skipped.
    pub fn sync_from<'a>(
        &mut self,
        outcomes: impl IntoIterator<Item = (&'a EntityId, &'a Outcome)>,
    ) {
        for (entity, outcome) in outcomes {
            let Some(group) = self.groups.iter_mut().find(|group| group.entity.id == *entity) else {
                continue;
            };
            if !group.select(outcome) {
                debug!(entity = %entity, outcome = %outcome, "no control matches outcome");
            }
        }
    }
}
