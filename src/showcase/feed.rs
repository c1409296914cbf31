use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::scene::{Home, LightState};

/// A pushed change to the displayed home.
///
/// `version` grows per key (light id, or the background); older or repeated
/// versions are ignored by the consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveUpdate {
    Light {
        version: u64,
        light_id: Uuid,
        state: LightState,
    },
    Background {
        version: u64,
        color: String,
    },
}

impl LiveUpdate {
    #[must_use]
    pub fn version(&self) -> u64 {
        match self {
            Self::Light { version, .. } | Self::Background { version, .. } => *version,
        }
    }

    #[must_use]
    pub fn key(&self) -> UpdateKey {
        match self {
            Self::Light { light_id, .. } => UpdateKey::Light(*light_id),
            Self::Background { .. } => UpdateKey::Background,
        }
    }
}

/// What a [`LiveUpdate`] version counter is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKey {
    Light(Uuid),
    Background,
}

/// Last version seen per [`UpdateKey`].
#[derive(Debug, Clone, Default)]
pub struct VersionTable {
    seen: FxHashMap<UpdateKey, u64>,
}

impl VersionTable {
    /// Records the update's version. Returns `false` when an equal or newer
    /// version was already seen for its key.
    pub fn accept(&mut self, update: &LiveUpdate) -> bool {
        let key = update.key();
        let version = update.version();
        if self.seen.get(&key).is_some_and(|&seen| version <= seen) {
            log::debug!("Dropping stale update {key:?} v{version}");
            return false;
        }
        self.seen.insert(key, version);
        true
    }

    #[must_use]
    pub fn last_seen(&self, key: UpdateKey) -> Option<u64> {
        self.seen.get(&key).copied()
    }
}

/// Source of the home being shown and the changes made to it elsewhere.
pub trait LiveFeed {
    /// Latest full model, if the source has one. Re-read on every poll, so it
    /// should already reflect the updates handed out so far.
    fn current_home(&self) -> Option<Home>;

    /// Updates received since the last call. Never blocks.
    fn poll_updates(&mut self) -> Vec<LiveUpdate>;
}

/// In-process feed: any thread may push updates through the sender.
///
/// Received updates are also folded into the held model, so
/// [`current_home`](LiveFeed::current_home) stays in step with them.
pub struct ChannelFeed {
    home: Option<Home>,
    updates: flume::Receiver<LiveUpdate>,
    versions: VersionTable,
}

impl ChannelFeed {
    #[must_use]
    pub fn new(home: Option<Home>) -> (Self, flume::Sender<LiveUpdate>) {
        let (tx, rx) = flume::unbounded();
        let feed = Self {
            home,
            updates: rx,
            versions: VersionTable::default(),
        };
        (feed, tx)
    }

    fn fold(&mut self, update: &LiveUpdate) {
        if !self.versions.accept(update) {
            return;
        }
        let Some(home) = self.home.as_mut() else {
            return;
        };
        match update {
            LiveUpdate::Light { light_id, state, .. } => {
                home.update_light_by_id(*light_id, state);
            }
            LiveUpdate::Background { color, .. } => home.background_color.clone_from(color),
        }
    }

    /// Replaces the model handed out by [`LiveFeed::current_home`].
    pub fn set_home(&mut self, home: Home) {
        self.home = Some(home);
    }
}

impl LiveFeed for ChannelFeed {
    fn current_home(&self) -> Option<Home> {
        self.home.clone()
    }

    fn poll_updates(&mut self) -> Vec<LiveUpdate> {
        let updates: Vec<LiveUpdate> = self.updates.try_iter().collect();
        for update in &updates {
            self.fold(update);
        }
        updates
    }
}
