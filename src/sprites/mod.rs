//! Species sprite cache.
//!
//! Every species sprite is requested once while mounting. Each handle's load
//! state is its own completion signal; the cache polls them and flips to
//! ready once every sprite has either loaded or failed. Failures are logged
//! and count as done, so one broken file cannot hold rendering back. Until a
//! species is loaded the renderer draws its fallback shape.

use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::garden::generator::all_species;
use crate::shared::*;

pub struct SpriteCachePlugin;

impl Plugin for SpriteCachePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteCache>()
            .add_systems(OnEnter(SceneState::Mounting), request_sprites)
            .add_systems(
                Update,
                poll_sprites
                    .in_set(GardenSet::Resolve)
                    .run_if(in_state(SceneState::Running))
                    .run_if(sprites_pending),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
struct SpriteEntry {
    handle: Handle<Image>,
    status: SpriteStatus,
}

#[derive(Resource, Debug, Default)]
pub struct SpriteCache {
    entries: HashMap<String, SpriteEntry>,
}

impl SpriteCache {
    /// Register a species. Re-requesting a known species is a no-op.
    pub fn request(&mut self, species: &str, handle: Handle<Image>) {
        self.entries
            .entry(species.to_string())
            .or_insert(SpriteEntry {
                handle,
                status: SpriteStatus::Pending,
            });
    }

    /// Settle a pending sprite. Returns false if the species is unknown or
    /// already settled, so a late duplicate signal cannot be counted twice.
    pub fn settle(&mut self, species: &str, status: SpriteStatus) -> bool {
        match self.entries.get_mut(species) {
            Some(entry) if entry.status == SpriteStatus::Pending && status != SpriteStatus::Pending => {
                entry.status = status;
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, species: &str) -> Option<SpriteStatus> {
        self.entries.get(species).map(|e| e.status)
    }

    /// The image for a species, only once it has actually loaded.
    pub fn sprite(&self, species: &str) -> Option<&Handle<Image>> {
        self.entries
            .get(species)
            .filter(|e| e.status == SpriteStatus::Loaded)
            .map(|e| &e.handle)
    }

    /// True once nothing is pending.
    pub fn is_ready(&self) -> bool {
        self.entries.values().all(|e| e.status != SpriteStatus::Pending)
    }

    pub fn count(&self, status: SpriteStatus) -> usize {
        self.entries.values().filter(|e| e.status == status).count()
    }

    fn pending(&self) -> Vec<(String, AssetId<Image>)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.status == SpriteStatus::Pending)
            .map(|(species, e)| (species.clone(), e.handle.id()))
            .collect()
    }
}

pub fn sprite_path(species: &str) -> String {
    format!("sprites/{}.png", species)
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn sprites_pending(cache: Res<SpriteCache>) -> bool {
    !cache.is_ready()
}

/// Kick off every species load. Without an asset server (headless) all
/// species settle as failed and the renderer keeps to fallback shapes.
pub fn request_sprites(asset_server: Option<Res<AssetServer>>, mut cache: ResMut<SpriteCache>) {
    let species = all_species();
    match asset_server {
        Some(server) => {
            for s in &species {
                cache.request(s, server.load(sprite_path(s)));
            }
            info!("[Sprites] Requested {} species sprites", species.len());
        }
        None => {
            for s in &species {
                cache.request(s, Handle::default());
                cache.settle(s, SpriteStatus::Failed);
            }
            warn!("[Sprites] No asset server; drawing fallback shapes only");
        }
    }
}

pub fn poll_sprites(asset_server: Option<Res<AssetServer>>, mut cache: ResMut<SpriteCache>) {
    let Some(server) = asset_server else {
        return;
    };

    for (species, id) in cache.pending() {
        match server.get_load_state(id) {
            Some(LoadState::Loaded) => {
                cache.settle(&species, SpriteStatus::Loaded);
            }
            Some(LoadState::Failed(err)) => {
                warn!("[Sprites] '{}' failed to load: {}", species, err);
                cache.settle(&species, SpriteStatus::Failed);
            }
            _ => {}
        }
    }

    if cache.is_ready() {
        info!(
            "[Sprites] Cache ready: {} loaded, {} failed",
            cache.count(SpriteStatus::Loaded),
            cache.count(SpriteStatus::Failed)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_only_after_every_sprite_settles() {
        let mut cache = SpriteCache::default();
        cache.request("tulip", Handle::default());
        cache.request("pine", Handle::default());
        assert!(!cache.is_ready());

        assert!(cache.settle("tulip", SpriteStatus::Loaded));
        assert!(!cache.is_ready());

        assert!(cache.settle("pine", SpriteStatus::Failed));
        assert!(cache.is_ready(), "a failed sprite still counts as settled");
    }

    #[test]
    fn test_settle_cannot_double_count() {
        let mut cache = SpriteCache::default();
        cache.request("rose", Handle::default());
        assert!(cache.settle("rose", SpriteStatus::Failed));
        assert!(!cache.settle("rose", SpriteStatus::Loaded));
        assert_eq!(cache.status("rose"), Some(SpriteStatus::Failed));
        assert!(!cache.settle("unknown", SpriteStatus::Loaded));
    }

    #[test]
    fn test_unloaded_species_has_no_sprite() {
        let mut cache = SpriteCache::default();
        cache.request("daisy", Handle::default());
        assert!(cache.sprite("daisy").is_none());
        cache.settle("daisy", SpriteStatus::Loaded);
        assert!(cache.sprite("daisy").is_some());
        assert!(cache.sprite("oak").is_none());
    }

    #[test]
    fn test_empty_cache_is_ready() {
        assert!(SpriteCache::default().is_ready());
    }
}
