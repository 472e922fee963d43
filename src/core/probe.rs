//! Audio asset availability probe.
//!
//! Walks a fixed list of asset names strictly in order, one GET at a time,
//! and updates a shared status map after every individual result so the UI
//! can show incremental progress. Available means: success status AND a
//! non-zero `content-length` header; everything else is missing.
//!
//! Re-running a check bumps the pass epoch. A pass that observes a newer
//! epoch stops without writing, so a stale pass can never race the fresh
//! `Checking` statuses of its successor.

use indexmap::IndexMap;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::assets;

/// Per-asset availability. Transitions only forward within a pass:
/// Unknown → Checking → {Available | Missing}. A refresh resets to Checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Unknown,
    Checking,
    Available,
    Missing,
}

impl AssetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::Unknown => "not checked",
            AssetStatus::Checking => "checking…",
            AssetStatus::Available => "available",
            AssetStatus::Missing => "missing",
        }
    }
}

/// Counts for the checker summary line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub available: usize,
    pub missing: usize,
    pub checking: usize,
}

/// Sequential availability checker over a fixed asset list.
pub struct AssetProbe {
    statuses: Arc<Mutex<IndexMap<String, AssetStatus>>>,
    epoch: Arc<AtomicU64>,
}

impl AssetProbe {
    /// Probe over `names`, all starting as Unknown. Map order is list
    /// order, which is also check order.
    pub fn new(names: &[&str]) -> Self {
        let statuses = names
            .iter()
            .map(|n| (n.to_string(), AssetStatus::Unknown))
            .collect();

        Self {
            statuses: Arc::new(Mutex::new(statuses)),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of all statuses in list order.
    pub fn statuses(&self) -> Vec<(String, AssetStatus)> {
        self.statuses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    pub fn summary(&self) -> ProbeSummary {
        let map = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        let mut s = ProbeSummary::default();
        for status in map.values() {
            match status {
                AssetStatus::Available => s.available += 1,
                AssetStatus::Missing => s.missing += 1,
                AssetStatus::Checking => s.checking += 1,
                AssetStatus::Unknown => {}
            }
        }
        s
    }

    /// True while the most recent pass is still walking the list.
    pub fn in_progress(&self) -> bool {
        self.summary().checking > 0
    }

    /// Start a fresh pass against `base`, cancelling any pass still in
    /// flight. Every entry resets to Checking before results arrive;
    /// `on_update` fires after each individual result (UI repaint hook).
    pub fn refresh(&self, base: &str, on_update: impl Fn() + Send + 'static) {
        let pass = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Asset check pass {} starting against {}", pass, base);

        let names: Vec<String> = {
            let mut map = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
            for status in map.values_mut() {
                *status = AssetStatus::Checking;
            }
            map.keys().cloned().collect()
        };
        on_update();

        let statuses = Arc::clone(&self.statuses);
        let epoch = Arc::clone(&self.epoch);
        let base = base.to_string();

        let spawned = thread::Builder::new()
            .name("phonica-probe".into())
            .spawn(move || {
                for name in names {
                    // A newer pass owns the map now; stop without writing
                    if epoch.load(Ordering::SeqCst) != pass {
                        debug!("Asset check pass {} cancelled", pass);
                        return;
                    }

                    let url = assets::audio_url(&base, &name);
                    let status = check_asset(&url);
                    debug!("{} -> {:?}", name, status);

                    {
                        let mut map = statuses.lock().unwrap_or_else(|e| e.into_inner());
                        // Re-check under the lock: the epoch may have moved
                        // while the request was in flight
                        if epoch.load(Ordering::SeqCst) != pass {
                            debug!("Asset check pass {} cancelled mid-write", pass);
                            return;
                        }
                        map.insert(name, status);
                    }
                    on_update();
                }
                info!("Asset check pass {} finished", pass);
            });

        if let Err(e) = spawned {
            warn!("Cannot spawn probe thread: {}", e);
        }
    }

    #[cfg(test)]
    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

/// One availability check: reachable + success status + non-zero length.
fn check_asset(url: &str) -> AssetStatus {
    match ureq::get(url).call() {
        Ok(resp) => {
            let length = resp
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());

            match length {
                Some(n) if n > 0 => AssetStatus::Available,
                _ => AssetStatus::Missing,
            }
        }
        Err(e) => {
            debug!("{}: {}", url, e);
            AssetStatus::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http_stub;
    use std::time::{Duration, Instant};

    /// Poll until `cond` holds or the deadline passes.
    fn wait_for(cond: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn test_all_entries_start_unknown() {
        let probe = AssetProbe::new(&["a.mp3", "b.mp3"]);
        assert!(probe
            .statuses()
            .iter()
            .all(|(_, s)| *s == AssetStatus::Unknown));
        assert_eq!(probe.summary(), ProbeSummary::default());
    }

    #[test]
    fn test_refresh_resets_to_checking_before_results() {
        // Server that never answers within the test body: bind without accept
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let probe = AssetProbe::new(&["a.mp3", "b.mp3"]);
        probe.refresh(&base, || {});

        // refresh() marks synchronously, before the worker makes progress
        assert!(probe
            .statuses()
            .iter()
            .all(|(_, s)| *s == AssetStatus::Checking));

        drop(listener);
    }

    #[test]
    fn test_good_and_missing_assets_resolve_in_order() {
        let base = http_stub::serve(vec![
            http_stub::ok_with_len(1024),
            http_stub::not_found(),
        ]);

        let probe = AssetProbe::new(&["good.mp3", "gone.mp3"]);
        probe.refresh(&base, || {});

        assert!(wait_for(|| !probe.in_progress()));
        let statuses = probe.statuses();
        assert_eq!(
            statuses,
            vec![
                ("good.mp3".to_string(), AssetStatus::Available),
                ("gone.mp3".to_string(), AssetStatus::Missing),
            ]
        );
    }

    #[test]
    fn test_zero_length_content_is_missing() {
        let base = http_stub::serve(vec![http_stub::ok_with_len(0)]);

        let probe = AssetProbe::new(&["empty.mp3"]);
        probe.refresh(&base, || {});

        assert!(wait_for(|| !probe.in_progress()));
        assert_eq!(probe.statuses()[0].1, AssetStatus::Missing);
    }

    #[test]
    fn test_unreachable_server_is_missing() {
        // Nothing listens here: bind, learn the port, close again
        let base = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let probe = AssetProbe::new(&["a.mp3"]);
        probe.refresh(&base, || {});

        assert!(wait_for(|| !probe.in_progress()));
        assert_eq!(probe.statuses()[0].1, AssetStatus::Missing);
    }

    #[test]
    fn test_stale_pass_stops_after_epoch_bump() {
        let base = http_stub::serve(vec![http_stub::ok_with_len(10)]);

        let probe = AssetProbe::new(&["a.mp3", "b.mp3", "c.mp3"]);
        probe.refresh(&base, || {});
        // Immediately invalidate the running pass
        probe.bump_epoch();

        // The pass may finish at most its in-flight write; give it time to
        // observe the bump, then verify later entries were never resolved.
        thread::sleep(Duration::from_millis(300));
        let statuses = probe.statuses();
        assert_eq!(statuses[2].1, AssetStatus::Checking);
    }

    #[test]
    fn test_update_hook_fires_per_result() {
        let base = http_stub::serve(vec![
            http_stub::ok_with_len(10),
            http_stub::ok_with_len(10),
        ]);

        let probe = AssetProbe::new(&["a.mp3", "b.mp3"]);
        let hits = Arc::new(AtomicU64::new(0));
        let hits_clone = Arc::clone(&hits);
        probe.refresh(&base, move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(wait_for(|| !probe.in_progress()));
        // One synchronous hit for the Checking reset + one per result
        assert!(wait_for(|| hits.load(Ordering::SeqCst) >= 3));
    }
}
