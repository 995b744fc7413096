// miniglut/src/platform/android/sensor.rs
//
//! The accelerometer event queue of the NDK sensor API.

use crate::sensor::SensorQueue;
use crate::Error;

use ndk_sys::{ASensor, ASensorEvent, ASensorEventQueue, ASensorManager};
use std::cmp;
use std::mem;
use std::os::raw::c_int;
use std::ptr;
use std::time::Duration;

// `LOOPER_ID_USER` of the native app glue: the first looper identifier free for application use.
const LOOPER_ID_USER: c_int = 3;

/// An event queue for the default accelerometer, attached to the calling thread's looper.
pub struct AndroidSensorQueue {
    manager: *mut ASensorManager,
    sensor: *const ASensor,
    queue: *mut ASensorEventQueue,
}

impl AndroidSensorQueue {
    /// Returns `None` if the device has no accelerometer.
    pub fn accelerometer() -> Option<AndroidSensorQueue> {
        unsafe {
            let manager = ndk_sys::ASensorManager_getInstance();
            if manager.is_null() {
                return None;
            }
            let sensor_type = ndk_sys::ASENSOR_TYPE_ACCELEROMETER as c_int;
            let sensor = ndk_sys::ASensorManager_getDefaultSensor(manager, sensor_type);
            if sensor.is_null() {
                info!("No accelerometer on this device");
                return None;
            }

            let mut looper = ndk_sys::ALooper_forThread();
            if looper.is_null() {
                looper = ndk_sys::ALooper_prepare(0);
            }
            let queue = ndk_sys::ASensorManager_createEventQueue(manager,
                                                                 looper,
                                                                 LOOPER_ID_USER,
                                                                 None,
                                                                 ptr::null_mut());
            if queue.is_null() {
                warn!("Couldn't create the accelerometer event queue");
                return None;
            }

            Some(AndroidSensorQueue { manager, sensor, queue })
        }
    }
}

impl SensorQueue for AndroidSensorQueue {
    fn enable(&mut self) -> Result<(), Error> {
        match unsafe { ndk_sys::ASensorEventQueue_enableSensor(self.queue, self.sensor) } {
            result if result < 0 => Err(Error::SensorFailed),
            _ => Ok(()),
        }
    }

    fn set_event_rate(&mut self, interval: Duration) -> Result<(), Error> {
        let usec = cmp::min(interval.as_micros(), i32::MAX as u128) as i32;
        match unsafe { ndk_sys::ASensorEventQueue_setEventRate(self.queue, self.sensor, usec) } {
            result if result < 0 => Err(Error::SensorFailed),
            _ => Ok(()),
        }
    }

    fn disable(&mut self) -> Result<(), Error> {
        match unsafe { ndk_sys::ASensorEventQueue_disableSensor(self.queue, self.sensor) } {
            result if result < 0 => Err(Error::SensorFailed),
            _ => Ok(()),
        }
    }

    fn drain(&mut self) -> usize {
        // Samples are discarded, so the payload is never read.
        let mut event: ASensorEvent = unsafe { mem::zeroed() };
        let mut count = 0;
        while unsafe { ndk_sys::ASensorEventQueue_getEvents(self.queue, &mut event, 1) } > 0 {
            count += 1;
        }
        count
    }
}

impl Drop for AndroidSensorQueue {
    fn drop(&mut self) {
        unsafe {
            ndk_sys::ASensorManager_destroyEventQueue(self.manager, self.queue);
        }
    }
}
