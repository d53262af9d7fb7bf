use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration as StdDuration;

/// One-shot signal raised by the next scheduling event on a clock
///
/// A scheduling event is any moment committed to the clock: `after`, `sleep`,
/// a new timer or ticker, a reset, and a ticker re-arming itself while it
/// fires. Moving the clock past moments that were already pending does not
/// count. The signal never carries a value: the channel just disconnects.
///
/// Lets a test thread wait until another thread has, say, started sleeping
/// before it moves the clock.
#[derive(Debug)]
pub struct Observer {
    rx: Receiver<()>,
}

impl Observer {
    pub(crate) fn new(rx: Receiver<()>) -> Self {
        Self { rx }
    }

    /// True once the signal was raised
    pub fn is_signaled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block until the signal is raised
    pub fn wait(&self) {
        // Nothing is ever sent, so recv only returns on disconnect
        let _ = self.rx.recv();
    }

    /// Block for at most `timeout` (real time); true if the signal was raised
    pub fn wait_timeout(&self, timeout: StdDuration) -> bool {
        matches!(
            self.rx.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }

    /// Underlying receiver, for use with `crossbeam_channel::select!`
    ///
    /// Readiness of this receiver means the signal was raised.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use crate::VirtualClock;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> VirtualClock {
        VirtualClock::new(Utc.with_ymd_and_hms(2049, 5, 6, 23, 55, 11).unwrap())
    }

    #[test]
    fn test_fires_on_next_registration() {
        let clock = clock();
        let observer = clock.observe();
        assert!(!observer.is_signaled());

        let _after = clock.after(Duration::seconds(1));
        assert!(observer.is_signaled());
        observer.wait();
    }

    #[test]
    fn test_not_retroactive() {
        let clock = clock();
        let _after = clock.after(Duration::seconds(1));
        let observer = clock.observe();
        assert!(!observer.is_signaled());
        assert!(!observer.wait_timeout(std::time::Duration::from_millis(10)));
    }

    #[test]
    fn test_firing_preexisting_moment_is_not_a_scheduling_event() {
        let clock = clock();
        let timer = clock.timer(Duration::seconds(1));
        let observer = clock.observe();

        clock.travel(Duration::seconds(2));
        assert!(timer.channel().try_recv().is_ok());
        assert!(!observer.is_signaled());
    }

    #[test]
    fn test_ticker_rearm_is_a_scheduling_event() {
        let clock = clock();
        let ticker = clock.ticker(Duration::seconds(1));
        let observer = clock.observe();

        clock.travel(Duration::seconds(1));
        assert!(ticker.channel().try_recv().is_ok());
        assert!(observer.is_signaled());
    }

    #[test]
    fn test_reset_and_stop() {
        let clock = clock();
        let timer = clock.timer(Duration::seconds(1));

        let observer = clock.observe();
        timer.stop();
        assert!(!observer.is_signaled());

        timer.reset(Duration::seconds(1));
        assert!(observer.is_signaled());

        let observer = clock.observe();
        timer.reset(Duration::seconds(2));
        assert!(observer.is_signaled());
    }

    #[test]
    fn test_all_observers_wake_together() {
        let clock = clock();
        let observers: Vec<_> = (0..4).map(|_| clock.observe()).collect();
        let _after = clock.after(Duration::zero());
        assert!(observers.iter().all(|o| o.is_signaled()));
    }
}
