//! Advertisement discovery
//!
//! Finds the billboard by its complete advertised name. The scan is held
//! through a [`ScanGuard`] so it is stopped on every exit path: early
//! match, elapsed window, or radio error.

use billboard_hal::{Advertisement, PeripheralHandle, Radio, RadioError};
use embassy_time::{with_timeout, Duration};

/// Scoped ownership of a running scan
///
/// Dropping the guard stops the scan.
pub struct ScanGuard<'a, R: Radio> {
    radio: &'a mut R,
}

impl<'a, R: Radio> ScanGuard<'a, R> {
    /// Start scanning
    pub fn start(radio: &'a mut R) -> Result<Self, RadioError> {
        let guard = Self { radio };
        guard.radio.start_scan()?;
        Ok(guard)
    }

    /// Wait for the next advertisement report
    pub async fn next(&mut self) -> Result<Advertisement, RadioError> {
        self.radio.next_advertisement().await
    }
}

impl<R: Radio> Drop for ScanGuard<'_, R> {
    fn drop(&mut self) {
        self.radio.stop_scan();
    }
}

/// Scan for a peripheral advertising exactly `name`
///
/// Returns the first match, or `None` if `timeout` elapses first or the
/// radio reports an error.
pub async fn scan<R: Radio>(
    radio: &mut R,
    name: &str,
    timeout: Duration,
) -> Option<PeripheralHandle> {
    debug!("scanning for {=str}", name);

    let mut guard = match ScanGuard::start(radio) {
        Ok(guard) => guard,
        Err(e) => {
            warn!("scan failed to start: {:?}", e);
            return None;
        }
    };

    match with_timeout(timeout, find(&mut guard, name)).await {
        Ok(Ok(handle)) => {
            info!("found {=str}", handle.name());
            Some(handle)
        }
        Ok(Err(e)) => {
            warn!("scan aborted: {:?}", e);
            None
        }
        Err(_) => {
            debug!("scan window elapsed without a match");
            None
        }
    }
}

async fn find<R: Radio>(
    guard: &mut ScanGuard<'_, R>,
    name: &str,
) -> Result<PeripheralHandle, RadioError> {
    loop {
        let advertisement = guard.next().await?;
        if !advertisement.name_matches(name) {
            trace!("ignoring advertisement rssi={}", advertisement.rssi);
            continue;
        }
        if let Some(handle) = advertisement.into_handle() {
            return Ok(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{advert, MockRadio};
    use embassy_futures::block_on;

    const WINDOW: Duration = Duration::from_millis(50);

    #[test]
    fn test_returns_first_exact_match() {
        let mut radio = MockRadio::new();
        radio.push_advert(advert(Some("Other"), 1));
        radio.push_advert(advert(None, 2));
        radio.push_advert(advert(Some("F-nRF52"), 3));
        radio.push_advert(advert(Some("F-nRF52"), 4));

        let handle = block_on(scan(&mut radio, "F-nRF52", WINDOW)).unwrap();
        assert_eq!(handle.name(), "F-nRF52");
        assert_eq!(handle.address().0[0], 3);

        // Short-circuits: the second match is still queued
        assert_eq!(radio.pending_adverts(), 1);
        assert_eq!(radio.scans_started, 1);
        assert_eq!(radio.scans_stopped, 1);
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        let mut radio = MockRadio::new();
        radio.push_advert(advert(Some("F-nRF52-old"), 1));
        radio.push_advert(advert(Some("F-nRF5"), 2));

        assert!(block_on(scan(&mut radio, "F-nRF52", WINDOW)).is_none());
        assert_eq!(radio.scans_stopped, 1);
    }

    #[test]
    fn test_window_elapses_without_match() {
        let mut radio = MockRadio::new();
        radio.push_advert(advert(Some("Other"), 1));

        assert!(block_on(scan(&mut radio, "F-nRF52", WINDOW)).is_none());
        assert_eq!(radio.scans_started, 1);
        assert_eq!(radio.scans_stopped, 1);
    }

    #[test]
    fn test_radio_error_is_not_fatal() {
        let mut radio = MockRadio::new();
        radio.push_advert(advert(Some("Other"), 1));
        radio.fail_scan_with(RadioError::Transport);

        assert!(block_on(scan(&mut radio, "F-nRF52", WINDOW)).is_none());
        assert_eq!(radio.scans_stopped, 1);
    }

    #[test]
    fn test_start_failure_still_stops_scan() {
        let mut radio = MockRadio::new();
        radio.refuse_scan();

        assert!(block_on(scan(&mut radio, "F-nRF52", WINDOW)).is_none());
        assert_eq!(radio.scans_stopped, 1);
    }
}
