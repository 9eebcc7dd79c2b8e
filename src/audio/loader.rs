use std::sync::mpsc;

use super::sink::{AudioClip, Track};

type LoadResult = (Track, String, Result<AudioClip, String>);

/// Best-effort asynchronous loading of audio assets.
///
/// Each request runs on its own short-lived thread (native) and reports
/// back through a channel drained by [`try_recv`](Self::try_recv).
/// Completion order is unspecified. Failures are logged and dropped.
pub struct AudioLoader {
    tx: mpsc::Sender<LoadResult>,
    rx: mpsc::Receiver<LoadResult>,
    pending: usize,
}

impl Default for AudioLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLoader {
    /// Loader with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, pending: 0 }
    }

    /// Start loading `path` for `track`.
    pub fn request(&mut self, track: Track, path: &str) {
        let path = path.to_owned();
        log::debug!("loading {} from {path}", track.name());
        self.pending += 1;
        Self::spawn(&self.tx, track, path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(tx: &mpsc::Sender<LoadResult>, track: Track, path: String) {
        let worker_tx = tx.clone();
        let worker_path = path.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("audio-load-{}", track.name()))
            .spawn(move || {
                let result = std::fs::read(&worker_path)
                    .map(|bytes| AudioClip {
                        path: worker_path.clone(),
                        bytes,
                    })
                    .map_err(|e| e.to_string());
                let _ = worker_tx.send((track, worker_path, result));
            });
        if let Err(e) = spawned {
            let _ = tx.send((track, path, Err(e.to_string())));
        }
    }

    // The media element streams the asset itself; the fetch only confirms
    // it exists so a dead URL never gets attached.
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    fn spawn(tx: &mpsc::Sender<LoadResult>, track: Track, path: String) {
        let tx = tx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_status(&path)
                .await
                .and_then(status_result)
                .map(|()| AudioClip {
                    path: path.clone(),
                    bytes: Vec::new(),
                });
            let _ = tx.send((track, path, result));
        });
    }

    #[cfg(all(not(feature = "web"), target_arch = "wasm32"))]
    fn spawn(tx: &mpsc::Sender<LoadResult>, track: Track, path: String) {
        let _ = tx.send((track, path, Err("no audio loader".into())));
    }

    /// Next successfully loaded clip, if any has arrived.
    pub fn try_recv(&mut self) -> Option<(Track, AudioClip)> {
        while let Ok((track, path, result)) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            match result {
                Ok(clip) => {
                    log::info!("{} loaded from {path}", track.name());
                    return Some((track, clip));
                }
                Err(e) => {
                    log::warn!("{} unavailable ({path}): {e}", track.name());
                }
            }
        }
        None
    }

    /// Requests not yet reported back.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
    }
}

/// HTTP status of a GET for `path`, relative to the page.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
async fn fetch_status(path: &str) -> Result<u16, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or("no window")?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| format!("unexpected fetch result: {e:?}"))?;
    Ok(response.status())
}

/// Map an HTTP status to a load result.
#[cfg(any(test, all(feature = "web", target_arch = "wasm32")))]
fn status_result(status: u16) -> Result<(), String> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(format!("HTTP {status}"))
    }
}
