//! Exchange registry
//!
//! Holds the configured exchange slots behind an `ArcSwap`. Coordinators take
//! one snapshot at the start of each cycle, so `load`, `unload` and `replace`
//! only affect the next cycle. Readers never block writers.

use arc_swap::ArcSwap;
use argus_ports::Exchange;
use log::info;
use std::fmt;
use std::sync::Arc;

/// A configured exchange position; `None` is a disabled or unconfigured slot
pub type ExchangeSlot = Option<Arc<dyn Exchange>>;

/// Immutable view of the registry for one cycle
pub type RegistrySnapshot = Arc<Vec<ExchangeSlot>>;

pub struct ExchangeRegistry {
    slots: ArcSwap<Vec<ExchangeSlot>>,
}

impl ExchangeRegistry {
    pub fn new(slots: Vec<ExchangeSlot>) -> Self {
        Self {
            slots: ArcSwap::from_pointee(slots),
        }
    }

    pub fn from_exchanges<I>(exchanges: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Exchange>>,
    {
        Self::new(exchanges.into_iter().map(Some).collect())
    }

    /// Current slots, fixed for as long as the snapshot is held
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.slots.load_full()
    }

    /// Add an exchange, replacing any loaded exchange with the same name
    ///
    /// Reuses the first empty slot when there is no name match.
    pub fn load(&self, exchange: Arc<dyn Exchange>) {
        let name = exchange.name().to_string();
        self.slots.rcu(|current| {
            let mut next = Vec::clone(current);
            let existing = next
                .iter()
                .position(|slot| matches!(slot, Some(e) if e.name() == name))
                .or_else(|| next.iter().position(Option::is_none));
            match existing {
                Some(index) => next[index] = Some(Arc::clone(&exchange)),
                None => next.push(Some(Arc::clone(&exchange))),
            }
            next
        });
        info!("Loaded exchange {}", name);
    }

    /// Empty the slot holding the named exchange
    ///
    /// Returns false if no loaded exchange has that name.
    pub fn unload(&self, name: &str) -> bool {
        let mut found = false;
        self.slots.rcu(|current| {
            let mut next = Vec::clone(current);
            found = false;
            for slot in next.iter_mut() {
                if matches!(slot, Some(e) if e.name() == name) {
                    *slot = None;
                    found = true;
                }
            }
            next
        });
        if found {
            info!("Unloaded exchange {}", name);
        }
        found
    }

    /// Swap in a whole new slot list
    pub fn replace(&self, slots: Vec<ExchangeSlot>) {
        self.slots.store(Arc::new(slots));
    }

    /// Number of slots, including empty ones
    pub fn len(&self) -> usize {
        self.slots.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.load().is_empty()
    }

    /// Names of loaded exchanges, in slot order
    pub fn names(&self) -> Vec<String> {
        self.slots
            .load()
            .iter()
            .flatten()
            .map(|e| e.name().to_string())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Exchange>> {
        self.slots
            .load()
            .iter()
            .flatten()
            .find(|e| e.name() == name)
            .cloned()
    }
}

impl Default for ExchangeRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for ExchangeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<Option<String>> = self
            .slots
            .load()
            .iter()
            .map(|slot| slot.as_ref().map(|e| e.name().to_string()))
            .collect();
        f.debug_struct("ExchangeRegistry")
            .field("slots", &slots)
            .finish()
    }
}
