//! Timer primitives for the upload progress signal and display delays.
//!
//! Native builds sleep on `tokio::time` (which also lets tests run on a paused
//! clock); wasm builds sleep on `gloo-timers`.

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
