use std::time::Instant;

use bacon_core::{build_tree_from, NodeId};
use serde::Serialize;

use crate::costars::{costar_count, CostarGraph};
use crate::error::Result;

/// Costar count and average separation for one actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorProfile {
    pub name: String,
    pub costars: usize,
    pub average_separation: f64,
}

/// Profiles for every actor with at least one costar, with both sort orders
/// computed once.
#[derive(Debug, Clone)]
pub struct Profiles {
    profiles: Vec<ActorProfile>,
    by_separation: Vec<usize>,
    by_costars: Vec<usize>,
}

impl Profiles {
    /// One BFS per actor. Actors without costars are left out.
    pub fn compute(graph: &CostarGraph, progress_interval: u64) -> Result<Self> {
        let start = Instant::now();
        let total = graph.node_count();
        let mut profiles = Vec::new();

        for id in 0..total as NodeId {
            let costars = costar_count(graph, id);
            if costars == 0 {
                continue;
            }

            let tree = build_tree_from(graph, id)?;
            profiles.push(ActorProfile {
                name: tree.root().clone(),
                costars,
                average_separation: tree.average_separation()?,
            });

            if profiles.len() as u64 % progress_interval.max(1) == 0 {
                tracing::info!(done = profiles.len(), total, "computing actor profiles");
            }
        }

        let mut by_separation: Vec<usize> = (0..profiles.len()).collect();
        by_separation.sort_by(|&a, &b| {
            profiles[a]
                .average_separation
                .total_cmp(&profiles[b].average_separation)
        });

        let mut by_costars: Vec<usize> = (0..profiles.len()).collect();
        by_costars.sort_by_key(|&i| profiles[i].costars);

        tracing::info!(
            profiles = profiles.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "actor profiles ready"
        );

        Ok(Self {
            profiles,
            by_separation,
            by_costars,
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// `amount > 0`: that many lowest average separations, ascending.
    /// `amount < 0`: that many highest, descending.
    pub fn best_by_separation(&self, amount: i64) -> Vec<&ActorProfile> {
        select(&self.profiles, &self.by_separation, amount)
    }

    /// Same selection rule as [`Profiles::best_by_separation`], by costar count.
    pub fn best_by_costars(&self, amount: i64) -> Vec<&ActorProfile> {
        select(&self.profiles, &self.by_costars, amount)
    }
}

fn select<'a>(profiles: &'a [ActorProfile], order: &[usize], amount: i64) -> Vec<&'a ActorProfile> {
    let count = usize::try_from(amount.unsigned_abs()).unwrap_or(usize::MAX);
    if amount >= 0 {
        order.iter().take(count).map(|&i| &profiles[i]).collect()
    } else {
        order.iter().rev().take(count).map(|&i| &profiles[i]).collect()
    }
}
