// miniglut/src/glut.rs
//
//! The GLUT-style front end: window creation, callback registration and the main loop.

use crate::backend::EglBackend;
use crate::callbacks::CallbackRegistry;
use crate::context::{ContextAttributes, ContextManager, DisplayMode};
use crate::event::EventSource;
use crate::info::GLVersion;
use crate::lifecycle::{Engine, LifecycleState};
use crate::sensor::{Accelerometer, SensorQueue, ACCELEROMETER_EVENT_INTERVAL};
use crate::window::{Frame, Window};
use crate::Error;

use euclid::default::Size2D;
use std::cmp;
use std::os::raw::c_void;
use std::time::{Duration, Instant};

/// The size handed to the reshape callback when the main loop starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReshapeSize {
    /// Always report this size, whatever the surface is.
    Fixed(Size2D<i32>),
    /// Report the drawable size queried when the context was created.
    Drawable,
}

/// Values that `Glut::get` can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlutQuery {
    /// Milliseconds since `Glut::init` (`GLUT_ELAPSED_TIME`).
    ElapsedTime,
    /// Drawable width, or 0 without a window (`GLUT_WINDOW_WIDTH`).
    WindowWidth,
    /// Drawable height, or 0 without a window (`GLUT_WINDOW_HEIGHT`).
    WindowHeight,
}

/// Identifies the one window. GLUT window ids start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowID(pub u32);

#[derive(Clone, Debug)]
pub struct GlutConfig {
    /// How long `create_window` waits for the platform to deliver a window.
    pub window_timeout: Duration,
    /// How long a single wait for platform events may block inside `create_window`.
    pub window_poll_interval: Duration,
    pub reshape_size: ReshapeSize,
    pub accelerometer_interval: Duration,
    pub version: GLVersion,
}

impl Default for GlutConfig {
    fn default() -> GlutConfig {
        GlutConfig {
            window_timeout: Duration::from_secs(10),
            window_poll_interval: Duration::from_millis(10),
            reshape_size: ReshapeSize::Fixed(Size2D::new(480, 800)),
            accelerometer_interval: ACCELEROMETER_EVENT_INTERVAL,
            version: GLVersion::default(),
        }
    }
}

/// The state behind the GLUT calls of one program.
pub struct Glut<E, Q, S> where E: EglBackend, Q: SensorQueue, S: EventSource {
    engine: Engine<E, Q>,
    events: S,
    callbacks: CallbackRegistry,
    config: GlutConfig,
    display_mode: DisplayMode,
    start_time: Instant,
    window_id: Option<WindowID>,
}

impl<E, Q, S> Glut<E, Q, S> where E: EglBackend, Q: SensorQueue, S: EventSource {
    /// `glutInit`. Elapsed time is measured from here.
    pub fn init(egl: E, events: S, accelerometer: Option<Q>, config: GlutConfig)
                -> Glut<E, Q, S> {
        info!("glutInit");
        let accelerometer = accelerometer.map(|queue| {
            Accelerometer::new(queue, config.accelerometer_interval)
        });
        Glut {
            engine: Engine::new(ContextManager::new(egl), accelerometer),
            events,
            callbacks: CallbackRegistry::new(),
            config,
            display_mode: DisplayMode::default(),
            start_time: Instant::now(),
            window_id: None,
        }
    }

    #[inline]
    pub fn engine(&self) -> &Engine<E, Q> {
        &self.engine
    }

    #[inline]
    pub fn events(&self) -> &S {
        &self.events
    }

    #[inline]
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// `glutInitDisplayMode`. Takes effect for windows created afterwards.
    pub fn init_display_mode(&mut self, display_mode: DisplayMode) {
        info!("glutInitDisplayMode({:?})", display_mode);
        self.display_mode = display_mode;
    }

    /// `glutInitWindowSize`. Android windows are full-screen, so the size is ignored.
    pub fn init_window_size(&mut self, width: i32, height: i32) {
        info!("glutInitWindowSize({}, {}) has no effect on this platform", width, height);
    }

    /// `glutCreateWindow`.
    ///
    /// Pumps platform events until the window's context exists. Fails if a window already
    /// exists, if context creation fails, if the window goes away first, or if no window shows
    /// up within `GlutConfig::window_timeout`.
    pub fn create_window(&mut self, title: &str) -> Result<WindowID, Error> {
        info!("glutCreateWindow({:?})", title);
        if self.window_id.is_some() {
            warn!("Only one full-screen window is supported");
            return Err(Error::WindowAlreadyExists);
        }

        if let Some(saved_state) = self.events.saved_state() {
            self.engine.restore_saved_state(&saved_state);
        }
        let attributes = ContextAttributes::from_display_mode(self.display_mode,
                                                              self.config.version);
        self.engine.set_context_attributes(attributes);

        let deadline = Instant::now() + self.config.window_timeout;
        while !self.engine.is_initialized() {
            if let Some(err) = self.engine.take_window_failure() {
                return Err(err);
            }
            if self.engine.lifecycle_state() == LifecycleState::Terminating {
                return Err(Error::WindowDestroyed);
            }
            let now = Instant::now();
            if now >= deadline {
                warn!("No window after {:?}", self.config.window_timeout);
                return Err(Error::WindowTimeout);
            }
            self.process_events(cmp::min(deadline - now, self.config.window_poll_interval));
        }

        let window_id = WindowID(1);
        self.window_id = Some(window_id);
        Ok(window_id)
    }

    /// `glutDisplayFunc`.
    pub fn display_func<F>(&mut self, callback: F) where F: FnMut(&dyn Window) + 'static {
        info!("glutDisplayFunc");
        self.callbacks.set_display_callback(Box::new(callback));
    }

    /// `glutIdleFunc`.
    pub fn idle_func<F>(&mut self, callback: F) where F: FnMut(&dyn Window) + 'static {
        info!("glutIdleFunc");
        self.callbacks.set_idle_callback(Box::new(callback));
    }

    /// `glutReshapeFunc`. The callback runs once, when the main loop starts; resizes are not
    /// reported.
    pub fn reshape_func<F>(&mut self, callback: F) where F: FnMut(i32, i32) + 'static {
        info!("glutReshapeFunc");
        self.callbacks.set_reshape_callback(Box::new(callback));
    }

    /// `glutPostRedisplay`. The display callback already runs on every iteration.
    #[inline]
    pub fn post_redisplay(&self) {}

    /// `glutGet`.
    pub fn get(&self, query: GlutQuery) -> i32 {
        match query {
            GlutQuery::ElapsedTime => {
                cmp::min(self.elapsed_time().as_millis(), i32::MAX as u128) as i32
            }
            GlutQuery::WindowWidth => self.drawable_size().map_or(0, |size| size.width),
            GlutQuery::WindowHeight => self.drawable_size().map_or(0, |size| size.height),
        }
    }

    /// `glutMainLoop`. Returns once the platform destroys the window.
    pub fn main_loop(&mut self) {
        info!("glutMainLoop");

        let reshape_size = match self.config.reshape_size {
            ReshapeSize::Fixed(size) => Some(size),
            ReshapeSize::Drawable => self.engine.contexts().drawable_size(),
        };
        match reshape_size {
            Some(size) => self.callbacks.reshape(size.width, size.height),
            None => warn!("No drawable to report to the reshape callback"),
        }

        loop {
            self.process_events(Duration::ZERO);
            self.engine.drain_sensors();

            if self.engine.lifecycle_state() == LifecycleState::Terminating {
                break;
            }

            let frame = Frame { contexts: self.engine.contexts(), start_time: self.start_time };
            self.callbacks.idle(&frame);
            self.callbacks.display(&frame);
        }

        info!("glutMainLoop: end");
    }

    /// Destroys the window's context. Safe to call repeatedly.
    pub fn destroy_window(&mut self) {
        self.engine.destroy_context();
    }

    fn process_events(&mut self, timeout: Duration) {
        let engine = &mut self.engine;
        self.events.poll_events(timeout, &mut |event| engine.dispatch(event));
    }
}

impl<E, Q, S> Window for Glut<E, Q, S> where E: EglBackend, Q: SensorQueue, S: EventSource {
    /// `glutSwapBuffers`.
    #[inline]
    fn swap_buffers(&self) -> Result<(), Error> {
        self.engine.contexts().swap_buffers()
    }

    #[inline]
    fn elapsed_time(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[inline]
    fn drawable_size(&self) -> Option<Size2D<i32>> {
        self.engine.contexts().drawable_size()
    }

    #[inline]
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        self.engine.contexts().get_proc_address(symbol_name)
    }
}
