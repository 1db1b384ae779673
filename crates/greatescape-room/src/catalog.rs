//! Room catalog.
//!
//! Holds the built-in rooms shipped with the game plus any rooms generated
//! or visually upgraded at runtime. Definitions are shared as
//! `Arc<RoomDefinition>`; replacing an entry never mutates a definition a
//! session is already bound to.
//!
//! Rooms added with [`RoomCatalog::insert`] stay for good. Rooms added with
//! [`RoomCatalog::publish`] are bounded: once the limit is reached the
//! oldest published room is dropped, and the caller is handed every
//! definition that left the catalog so it can release what they reference.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::debug;

use crate::domain::candidate::RoomCandidate;
use crate::domain::definition::RoomDefinition;
use crate::domain::validation::{ValidationError, validate};

const BUILTIN_ROOMS: &str = include_str!("../rooms/builtin.yaml");

/// Published rooms kept before the oldest is dropped.
pub const DEFAULT_PUBLISHED_CAPACITY: usize = 64;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document could not be parsed.
    #[error("room catalog is malformed: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A room in the catalog failed validation.
    #[error("room `{room_id}` is invalid: {source}")]
    Invalid {
        /// The offending room.
        room_id: String,
        /// Why it was rejected.
        source: ValidationError,
    },
}

/// Outcome of [`RoomCatalog::publish`].
#[derive(Debug)]
pub struct Published {
    /// The stored room.
    pub room: Arc<RoomDefinition>,
    /// Definitions no longer reachable through the catalog: the one this
    /// room replaced, if any, and any published rooms dropped to make space.
    pub released: Vec<Arc<RoomDefinition>>,
}

#[derive(Debug, Default)]
struct Entries {
    rooms: BTreeMap<String, Arc<RoomDefinition>>,
    /// Ids of published rooms, oldest first. Pinned rooms never appear here.
    published: VecDeque<String>,
}

/// Thread-safe store of room definitions keyed by room id.
#[derive(Debug)]
pub struct RoomCatalog {
    entries: RwLock<Entries>,
    published_capacity: usize,
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            published_capacity: DEFAULT_PUBLISHED_CAPACITY,
        }
    }
}

impl RoomCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the number of published rooms kept (minimum one).
    #[must_use]
    pub fn with_published_capacity(mut self, capacity: usize) -> Self {
        self.published_capacity = capacity.max(1);
        self
    }

    /// Loads the rooms shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded catalog is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_ROOMS)
    }

    /// Loads and validates a YAML list of room candidates.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed YAML and
    /// [`CatalogError::Invalid`] for the first room that fails validation.
    pub fn from_yaml(document: &str) -> Result<Self, CatalogError> {
        let candidates: Vec<RoomCandidate> = serde_yaml::from_str(document)?;
        let catalog = Self::new();
        for candidate in candidates {
            let room_id = candidate.id.clone().unwrap_or_default();
            let room = validate(candidate).map_err(|source| CatalogError::Invalid {
                room_id: room_id.clone(),
                source,
            })?;
            debug!(room_id = %room_id, "loaded room into catalog");
            catalog.insert(room);
        }
        Ok(catalog)
    }

    /// Looks up a room by id.
    #[must_use]
    pub fn get(&self, room_id: &str) -> Option<Arc<RoomDefinition>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .get(room_id)
            .cloned()
    }

    /// Stores a pinned room, replacing any previous definition with the
    /// same id.
    pub fn insert(&self, room: RoomDefinition) -> Arc<RoomDefinition> {
        let room = Arc::new(room);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.published.retain(|id| id != room.id());
        entries.rooms.insert(room.id().to_owned(), Arc::clone(&room));
        room
    }

    /// Stores a room produced at runtime. Replacing a pinned room keeps it
    /// pinned; any other room counts toward the published limit.
    pub fn publish(&self, room: RoomDefinition) -> Published {
        let room = Arc::new(room);
        let room_id = room.id().to_owned();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let pinned = entries.rooms.contains_key(&room_id)
            && !entries.published.iter().any(|id| *id == room_id);

        let mut released: Vec<Arc<RoomDefinition>> = entries
            .rooms
            .insert(room_id.clone(), Arc::clone(&room))
            .into_iter()
            .collect();
        if !pinned {
            entries.published.retain(|id| *id != room_id);
            entries.published.push_back(room_id);
            while entries.published.len() > self.published_capacity {
                let Some(oldest) = entries.published.pop_front() else {
                    break;
                };
                if let Some(evicted) = entries.rooms.remove(&oldest) {
                    debug!(room_id = %oldest, "dropped oldest published room");
                    released.push(evicted);
                }
            }
        }
        Published { room, released }
    }

    /// All rooms, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<RoomDefinition>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .values()
            .cloned()
            .collect()
    }

    /// Number of rooms in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
