use crate::ScanError;
use barscan_base::Size;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Poll `probe` every `interval` until it reports a non-empty size.
///
/// The first check happens immediately. Fails with
/// `ScanError::VideoNotReady` once `timeout` has elapsed. Dropping the
/// returned future stops the polling.
pub async fn wait_until_ready(
    probe: impl Fn() -> Size,
    interval: Duration,
    timeout: Duration,
) -> Result<Size, ScanError> {
    // tokio::time::interval panics on a zero period
    let interval = interval.max(Duration::from_millis(1));

    let poll = async {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts: u32 = 0;
        loop {
            ticker.tick().await;
            attempts += 1;
            let size = probe();
            if !size.is_empty() {
                log::debug!("video ready at {size} after {attempts} checks");
                return size;
            }
        }
    };

    time::timeout(timeout, poll).await.map_err(|_| {
        ScanError::VideoNotReady(format!(
            "no video frames after {} ms",
            timeout.as_millis()
        ))
    })
}
