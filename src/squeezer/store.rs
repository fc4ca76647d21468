//! The squeezer state store.
//!
//! Owns the lemon list and the juice collection. Every mutation goes through
//! one of the store's operations, and observers are notified after the
//! mutation is fully applied.
//!
//! Squeezing is two-phase: [`SqueezerStore::squeeze_object`] marks a squeeze
//! in flight and hands back a [`SqueezeTicket`]; the caller arms a timer and
//! presents the ticket to [`SqueezerStore::complete_squeeze`] when it fires.
//! Completion re-validates the ticket against the store generation, which
//! [`SqueezerStore::reset`] bumps, so a late timer can never bring a cleared
//! lemon back.

use super::model::{CitrusObject, CitrusSize, JuiceCollection, JuiceQuality, LemonId};
use super::quality;
use super::random::{extraction_for, ExtractionSource, ThreadRandom};
use thiserror::Error;
use tracing::{debug, info};

/// Proof that a squeeze was started. Only the ticket for the squeeze
/// currently in flight completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqueezeTicket {
    pub id: LemonId,
    pub generation: u64,
    seq: u64,
}

impl SqueezeTicket {
    /// Position of this squeeze among all squeezes started by the store.
    pub fn sequence(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqueezeOutcome {
    pub id: LemonId,
    pub extracted: f64,
    pub collection: JuiceCollection,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqueezeError {
    #[error("no lemon with id {0}")]
    NotFound(LemonId),
    #[error("lemon {0} is already squeezed")]
    AlreadySqueezed(LemonId),
    #[error("lemon {pending} is still being squeezed")]
    Busy { pending: LemonId },
    #[error("squeeze ticket is stale")]
    Stale,
}

/// A state change, delivered to observers once per applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Added { id: LemonId, size: CitrusSize },
    SqueezeStarted { id: LemonId },
    SqueezeCompleted { id: LemonId, extracted: f64, quality: JuiceQuality },
    /// The target was removed before its squeeze completed.
    SqueezeAbandoned { id: LemonId },
    Removed { id: LemonId },
    Reset,
}

pub trait StoreObserver: Send {
    fn on_change(&mut self, change: &StoreChange, store: &SqueezerStore);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreChange, &SqueezerStore) + Send,
{
    fn on_change(&mut self, change: &StoreChange, store: &SqueezerStore) {
        (self)(change, store)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// Owned copy of the observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct SqueezerSnapshot {
    pub objects: Vec<CitrusObject>,
    pub collection: JuiceCollection,
    pub squeezing_in_progress: bool,
    pub squeeze_count: u32,
}

pub struct SqueezerStore {
    objects: Vec<CitrusObject>,
    collection: JuiceCollection,
    in_flight: Option<SqueezeTicket>,
    generation: u64,
    next_lemon: u64,
    next_ticket: u64,
    empty_quality: JuiceQuality,
    random: Box<dyn ExtractionSource>,
    observers: Vec<(ObserverId, Box<dyn StoreObserver>)>,
    next_observer: u64,
}

impl Default for SqueezerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SqueezerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqueezerStore")
            .field("objects", &self.objects)
            .field("collection", &self.collection)
            .field("in_flight", &self.in_flight)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SqueezerStore {
    pub fn new() -> Self {
        Self::with_random(ThreadRandom)
    }

    pub fn with_random(random: impl ExtractionSource + 'static) -> Self {
        Self {
            objects: Vec::new(),
            collection: JuiceCollection::default(),
            in_flight: None,
            generation: 0,
            next_lemon: 0,
            next_ticket: 0,
            empty_quality: JuiceQuality::Good,
            random: Box::new(random),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Quality reported while no squeezed capacity exists, including the
    /// zero state after construction and [`reset`](Self::reset).
    pub fn with_empty_quality(mut self, quality: JuiceQuality) -> Self {
        self.empty_quality = quality;
        if self.squeezed_capacity() == 0.0 {
            self.collection.quality = quality;
        }
        self
    }

    // --- Observers ---

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: StoreChange) {
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            observer.on_change(&change, self);
        }
        self.observers = observers;
    }

    // --- Reads ---

    pub fn objects(&self) -> &[CitrusObject] {
        &self.objects
    }

    pub fn object(&self, id: LemonId) -> Option<&CitrusObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn collection(&self) -> &JuiceCollection {
        &self.collection
    }

    pub fn is_squeezing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Always equal to `collection().lemons_used`.
    pub fn squeeze_count(&self) -> u32 {
        self.collection.lemons_used
    }

    /// Target of the squeeze currently in flight.
    pub fn pending(&self) -> Option<LemonId> {
        self.in_flight.map(|t| t.id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Capacity of every lemon in the list that has been squeezed.
    pub fn squeezed_capacity(&self) -> f64 {
        self.objects
            .iter()
            .filter(|o| o.squeezed)
            .map(|o| o.capacity)
            .sum()
    }

    pub fn efficiency(&self) -> f64 {
        quality::efficiency(self.collection.total_amount, self.squeezed_capacity())
    }

    pub fn snapshot(&self) -> SqueezerSnapshot {
        SqueezerSnapshot {
            objects: self.objects.clone(),
            collection: self.collection.clone(),
            squeezing_in_progress: self.is_squeezing(),
            squeeze_count: self.squeeze_count(),
        }
    }

    // --- Operations ---

    pub fn add_object(&mut self, size: CitrusSize) -> LemonId {
        let id = LemonId(self.next_lemon);
        self.next_lemon += 1;
        self.objects.push(CitrusObject::new(id, size));
        debug!(%id, %size, "lemon added");
        self.notify(StoreChange::Added { id, size });
        id
    }

    /// Start squeezing `id`. Returns `None` without touching state if the
    /// lemon is missing, already squeezed, or another squeeze is in flight.
    pub fn squeeze_object(&mut self, id: LemonId) -> Option<SqueezeTicket> {
        match self.try_squeeze_object(id) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                debug!(%id, error = %e, "squeeze ignored");
                None
            }
        }
    }

    pub fn try_squeeze_object(&mut self, id: LemonId) -> Result<SqueezeTicket, SqueezeError> {
        let lemon = self.object(id).ok_or(SqueezeError::NotFound(id))?;
        if lemon.squeezed {
            return Err(SqueezeError::AlreadySqueezed(id));
        }
        if let Some(pending) = self.pending() {
            return Err(SqueezeError::Busy { pending });
        }

        let ticket = SqueezeTicket {
            id,
            generation: self.generation,
            seq: self.next_ticket,
        };
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        debug!(%id, generation = self.generation, "squeeze started");
        self.notify(StoreChange::SqueezeStarted { id });
        Ok(ticket)
    }

    /// Finish the squeeze identified by `ticket`. Stale tickets are ignored.
    pub fn complete_squeeze(&mut self, ticket: SqueezeTicket) -> Option<SqueezeOutcome> {
        match self.try_complete_squeeze(ticket) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!(id = %ticket.id, error = %e, "completion ignored");
                None
            }
        }
    }

    pub fn try_complete_squeeze(
        &mut self,
        ticket: SqueezeTicket,
    ) -> Result<SqueezeOutcome, SqueezeError> {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            return Err(SqueezeError::Stale);
        }

        let Some(idx) = self.objects.iter().position(|o| o.id == ticket.id) else {
            self.in_flight = None;
            info!(id = %ticket.id, "squeeze abandoned, lemon was removed");
            self.notify(StoreChange::SqueezeAbandoned { id: ticket.id });
            return Err(SqueezeError::NotFound(ticket.id));
        };
        if self.objects[idx].squeezed {
            self.in_flight = None;
            return Err(SqueezeError::AlreadySqueezed(ticket.id));
        }

        let u = self.random.unit();
        let lemon = &mut self.objects[idx];
        let extracted = extraction_for(lemon.capacity, u);
        lemon.extracted = extracted;
        lemon.squeezed = true;

        self.collection.total_amount += extracted;
        self.collection.lemons_used += 1;
        self.collection.quality = quality::collection_quality(
            self.collection.total_amount,
            self.squeezed_capacity(),
            self.empty_quality,
        );
        self.in_flight = None;

        let quality = self.collection.quality;
        info!(
            id = %ticket.id,
            extracted,
            total = self.collection.total_amount,
            %quality,
            "squeeze completed"
        );
        self.notify(StoreChange::SqueezeCompleted {
            id: ticket.id,
            extracted,
            quality,
        });
        Ok(SqueezeOutcome {
            id: ticket.id,
            extracted,
            collection: self.collection.clone(),
        })
    }

    /// Remove `id` from the list. Collected juice stays counted.
    pub fn remove_object(&mut self, id: LemonId) -> bool {
        let Some(idx) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        self.objects.remove(idx);
        debug!(%id, "lemon removed");
        self.notify(StoreChange::Removed { id });
        true
    }

    pub fn reset(&mut self) {
        self.objects.clear();
        self.collection = JuiceCollection {
            quality: self.empty_quality,
            ..JuiceCollection::default()
        };
        self.in_flight = None;
        self.generation += 1;
        info!(generation = self.generation, "squeezer reset");
        self.notify(StoreChange::Reset);
    }
}
