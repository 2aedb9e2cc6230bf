//! Stable identifiers and the migration envelope shared between a
//! `Population` (an island) and its owning host (§3, §4.9).

use crate::entity::{Entity, EntityModel};
use crate::population::{MigrationGateway, Population, StepOutcome};
use crossbeam_channel::{unbounded, Receiver, Sender};
use evo_error::Result;
use std::collections::HashMap;
use uuid::Uuid;

/// A stable identifier for one island (one `Population` instance) within a
/// host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IslandId(Uuid);

impl IslandId {
    pub fn new() -> Self {
        IslandId(Uuid::new_v4())
    }
}

impl Default for IslandId {
    fn default() -> Self {
        Self::new()
    }
}

/// A stable identifier for a `PopulationHost`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostId(Uuid);

impl HostId {
    pub fn new() -> Self {
        HostId(Uuid::new_v4())
    }
}

impl Default for HostId {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity in transit between islands. Tagged with the host and island it
/// departed from so the receiving host can discard anything that didn't
/// originate with it (a migrant whose `source_host` doesn't match the
/// current host's id is silently dropped, per §4.9).
pub struct Migrant<M: EntityModel> {
    pub source_host: HostId,
    pub source_island: IslandId,
    pub entity: Entity<M>,
}

impl<M: EntityModel> Migrant<M> {
    pub fn new(source_host: HostId, source_island: IslandId, entity: Entity<M>) -> Self {
        Migrant {
            source_host,
            source_island,
            entity,
        }
    }
}

/// Orchestrates one or more `Population` instances ("islands") and routes
/// migrations between them (§3, §4.9). Single-process, single-threaded —
/// `evolve_generation` steps every island on the calling thread, then drains
/// the shared outbound queue and hands each migrant to any island that
/// isn't the one it left. Not `Sync`; a caller that needs the dispatcher on
/// its own thread should wrap the host in a mutex (the source material's
/// own split between a base host and a thread-safe variant, per the design
/// notes).
pub struct PopulationHost<M: EntityModel> {
    host_id: HostId,
    islands: HashMap<IslandId, Population<M>>,
    outbound_tx: Sender<Migrant<M>>,
    outbound_rx: Receiver<Migrant<M>>,
}

impl<M: EntityModel> PopulationHost<M> {
    pub fn new() -> Self {
        let (outbound_tx, outbound_rx) = unbounded();
        PopulationHost {
            host_id: HostId::new(),
            islands: HashMap::new(),
            outbound_tx,
            outbound_rx,
        }
    }

    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    pub fn add_island(&mut self, population: Population<M>) -> IslandId {
        let id = population.island_id();
        self.islands.insert(id, population);
        id
    }

    pub fn island(&self, id: IslandId) -> Option<&Population<M>> {
        self.islands.get(&id)
    }

    pub fn islands(&self) -> impl Iterator<Item = &Population<M>> {
        self.islands.values()
    }

    fn gateway(&self) -> MigrationGateway<M> {
        MigrationGateway {
            host_id: self.host_id,
            sender: self.outbound_tx.clone(),
        }
    }

    /// Steps every island one generation, then dispatches whatever landed
    /// on the shared outbound queue this round.
    pub fn evolve_generation(&mut self) -> Result<Vec<(IslandId, StepOutcome)>> {
        let gateway = self.gateway();
        let mut outcomes = Vec::with_capacity(self.islands.len());
        for (id, population) in self.islands.iter_mut() {
            outcomes.push((*id, population.step_generation(Some(&gateway))?));
        }
        self.dispatch_migrations();
        Ok(outcomes)
    }

    /// Drains the shared outbound queue, routing each migrant to any island
    /// other than the one it departed from. A migrant tagged with a
    /// `source_host` other than this host's id is silently discarded (it
    /// arrived here by a routing mistake upstream); one with nowhere to go
    /// (a single-island host) is also dropped.
    fn dispatch_migrations(&mut self) {
        while let Ok(migrant) = self.outbound_rx.try_recv() {
            if migrant.source_host != self.host_id {
                tracing::debug!(host = ?self.host_id, "discarded migrant from a foreign host");
                continue;
            }
            let target = self
                .islands
                .values()
                .find(|population| population.island_id() != migrant.source_island);
            if let Some(target) = target {
                tracing::debug!(
                    host = ?self.host_id,
                    source = ?migrant.source_island,
                    target = ?target.island_id(),
                    "migrant routed to island"
                );
                let _ = target.inbound_sender().send(migrant);
            }
        }
    }
}

impl<M: EntityModel> Default for PopulationHost<M> {
    fn default() -> Self {
        Self::new()
    }
}
