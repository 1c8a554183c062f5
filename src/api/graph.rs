use std::collections::HashSet;

use anyhow::{Result, bail};

use super::parse::Entity;

/// Validated result of one search: the root entity at index 0 followed by its
/// related entities, one level deep. Edges are implied by the star topology
/// rather than stored.
#[derive(Clone, Debug)]
pub struct EntityGraph {
    entities: Vec<Entity>,
}

impl EntityGraph {
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        if entities.is_empty() {
            bail!("related-entities response contained no entities");
        }

        let mut seen = HashSet::new();
        let mut deduped = Vec::with_capacity(entities.len());
        for mut entity in entities {
            if !entity.card_size.is_finite() || entity.card_size <= 0.0 {
                bail!(
                    "entity {:?} has invalid card_size {}",
                    entity.query,
                    entity.card_size
                );
            }
            if !entity.relevance.is_finite() {
                bail!("entity {:?} has non-finite relevance", entity.query);
            }
            entity.relevance = entity.relevance.clamp(0.0, 1.0);

            if seen.insert(entity.query.clone()) {
                deduped.push(entity);
            } else {
                log::warn!("dropping duplicate entity {:?}", entity.query);
            }
        }

        Ok(Self { entities: deduped })
    }

    pub fn root(&self) -> &Entity {
        &self.entities[0]
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, query: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.query == query)
    }

    pub fn node_count(&self) -> usize {
        self.entities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.entities.len() - 1
    }

    /// Star topology: the root connects to every other node and nothing else.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        (1..self.entities.len()).map(|index| (0, index)).collect()
    }

    /// Indices of the related entities, most relevant first.
    pub fn ranked_by_relevance(&self) -> Vec<usize> {
        let mut indices = (1..self.entities.len()).collect::<Vec<_>>();
        indices.sort_by(|a, b| {
            self.entities[*b]
                .relevance
                .total_cmp(&self.entities[*a].relevance)
                .then_with(|| self.entities[*a].query.cmp(&self.entities[*b].query))
        });
        indices
    }
}
