// miniglut/src/sensor.rs
//
//! The accelerometer stream, sampled only while the application has input focus.

use crate::Error;

use std::time::Duration;

/// The sampling interval requested while focused: 60 events per second, in whole
/// milliseconds.
pub const ACCELEROMETER_EVENT_INTERVAL: Duration = Duration::from_micros((1000 / 60) * 1000);

/// A platform sensor event queue bound to one sensor.
pub trait SensorQueue {
    fn enable(&mut self) -> Result<(), Error>;
    fn set_event_rate(&mut self, interval: Duration) -> Result<(), Error>;
    fn disable(&mut self) -> Result<(), Error>;
    /// Discards every pending sample and returns how many there were.
    fn drain(&mut self) -> usize;
}

/// Tracks whether the accelerometer queue is enabled so that repeated focus events don't
/// re-enable or re-disable it.
pub struct Accelerometer<Q> where Q: SensorQueue {
    queue: Q,
    interval: Duration,
    enabled: bool,
}

impl<Q> Accelerometer<Q> where Q: SensorQueue {
    #[inline]
    pub fn new(queue: Q, interval: Duration) -> Accelerometer<Q> {
        Accelerometer { queue, interval, enabled: false }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts monitoring. Only the rate is re-applied if the queue is already enabled.
    pub fn start(&mut self) -> Result<(), Error> {
        if !self.enabled {
            self.queue.enable()?;
            self.enabled = true;
        }
        self.queue.set_event_rate(self.interval)
    }

    /// Stops monitoring, to avoid consuming battery while not being used.
    pub fn stop(&mut self) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }
        self.queue.disable()?;
        self.enabled = false;
        Ok(())
    }

    /// Throws away pending samples. Nothing consumes accelerometer data yet.
    #[inline]
    pub fn drain(&mut self) -> usize {
        self.queue.drain()
    }
}
