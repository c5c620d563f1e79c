//! Task spawning helper shared by the web and desktop builds.

use std::future::Future;

/// Spawn a future on the root scope so it outlives the component that started
/// it (a language switch remounts the routed views).
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    if dioxus::prelude::spawn_forever(future).is_none() {
        tracing::warn!(target: "bloodreport::upload", "no root scope available, task dropped");
    }
}
