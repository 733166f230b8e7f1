use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::loader;
use super::model::LoadOutcome;

// ---------------------------------------------------------------------------
// Time-boxed memoization of the GDP load
// ---------------------------------------------------------------------------

/// Explicit memoization of [`loader::load_gdp`], keyed by source path with
/// an expiry check at read time. A stale or re-keyed entry re-invokes the
/// loader on the next read; the cached outcome itself is never mutated.
pub struct GdpCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    key: PathBuf,
    loaded_at: Instant,
    outcome: LoadOutcome,
}

impl GdpCache {
    /// One hour, matching how often the upstream file could change.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Return the cached outcome for `path`, reloading when there is no
    /// entry, the path changed, or the entry aged past the TTL.
    pub fn get(&mut self, path: &Path, country: &str) -> &LoadOutcome {
        let ttl = self.ttl;
        let fresh = matches!(
            &self.entry,
            Some(e) if e.key.as_path() == path && e.loaded_at.elapsed() < ttl
        );
        if !fresh {
            log::debug!("GDP cache miss for {}", path.display());
            self.entry = Some(CacheEntry {
                key: path.to_path_buf(),
                loaded_at: Instant::now(),
                outcome: loader::load_gdp(path, country),
            });
        }
        &self.entry.as_ref().expect("entry just ensured").outcome
    }

    /// Drop the cached entry so the next read reloads unconditionally.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for GdpCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_the_outcome_within_the_ttl() {
        let mut cache = GdpCache::new(Duration::from_secs(3600));
        let path = Path::new("no/such/file.csv");

        let first = cache.get(path, "Korea, Rep.").series().clone();
        let second = cache.get(path, "Korea, Rep.").series().clone();
        assert_eq!(first, second);
        assert!(cache.get(path, "Korea, Rep.").is_fallback());
    }

    #[test]
    fn changing_the_path_rekeys_the_entry() {
        let mut cache = GdpCache::new(Duration::from_secs(3600));
        cache.get(Path::new("a.csv"), "Korea, Rep.");
        cache.get(Path::new("b.csv"), "Korea, Rep.");
        let entry = cache.entry.as_ref().unwrap();
        assert_eq!(entry.key, PathBuf::from("b.csv"));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = GdpCache::new(Duration::ZERO);
        let path = Path::new("no/such/file.csv");
        cache.get(path, "Korea, Rep.");
        let first_load = cache.entry.as_ref().unwrap().loaded_at;
        std::thread::sleep(Duration::from_millis(5));
        cache.get(path, "Korea, Rep.");
        let second_load = cache.entry.as_ref().unwrap().loaded_at;
        assert!(second_load > first_load);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let mut cache = GdpCache::new(Duration::from_secs(3600));
        cache.get(Path::new("a.csv"), "Korea, Rep.");
        cache.invalidate();
        assert!(cache.entry.is_none());
    }
}
