// miniglut/src/tests.rs
//
//! Unit tests, run against scripted stand-ins for EGL, the platform event queue and the
//! accelerometer.

use crate::backend::{ConfigHandle, ContextHandle, DisplayHandle, EglBackend, SurfaceHandle};
use crate::egl;
use crate::egl::types::EGLint;
use crate::{CallbackRegistry, Command, ContextAttributeFlags, ContextAttributes};
use crate::{ContextManager, DisplayMode, Engine, Error, EventResponse, EventSource, GLVersion};
use crate::{Glut, GlutConfig, GlutQuery, InputEvent, LifecycleState, NativeWindow};
use crate::{PlatformEvent, ReshapeSize, SavedState, SensorQueue, Window, WindowID};
use crate::{WindowStatus, WindowingApiError, ACCELEROMETER_EVENT_INTERVAL};

use euclid::default::Size2D;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::os::raw::c_void;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const DISPLAY: usize = 0x10;
const SURFACE: usize = 0x20;
const CONTEXT: usize = 0x30;
const NATIVE_VISUAL_FORMAT: i32 = 1;

struct MockEglState {
    // Color channel width of each config `choose_configs` returns. Empty means no match.
    config_channel_bits: Vec<i32>,
    fail_create_surface: bool,
    fail_create_context: bool,
    fail_make_current: bool,
    surface_size: (i32, i32),
    config_attributes: Vec<i32>,
    context_attributes: Vec<i32>,
    chosen_config: Option<ConfigHandle>,
    buffers_format: Option<i32>,
    live_displays: usize,
    live_surfaces: usize,
    live_contexts: usize,
    bound: bool,
    unbinds: usize,
    swaps: usize,
}

impl Default for MockEglState {
    fn default() -> MockEglState {
        MockEglState {
            config_channel_bits: vec![8],
            fail_create_surface: false,
            fail_create_context: false,
            fail_make_current: false,
            surface_size: (1080, 1920),
            config_attributes: vec![],
            context_attributes: vec![],
            chosen_config: None,
            buffers_format: None,
            live_displays: 0,
            live_surfaces: 0,
            live_contexts: 0,
            bound: false,
            unbinds: 0,
            swaps: 0,
        }
    }
}

#[derive(Clone, Default)]
struct MockEgl(Rc<RefCell<MockEglState>>);

impl MockEgl {
    fn state(&self) -> std::cell::RefMut<MockEglState> {
        self.0.borrow_mut()
    }

    fn live_objects(&self) -> (usize, usize, usize) {
        let state = self.0.borrow();
        (state.live_displays, state.live_surfaces, state.live_contexts)
    }
}

fn handle(raw: usize) -> *const c_void {
    raw as *const c_void
}

impl EglBackend for MockEgl {
    fn initialize_default_display(&self) -> Result<DisplayHandle, Error> {
        self.state().live_displays += 1;
        Ok(DisplayHandle::from_raw(handle(DISPLAY)))
    }

    fn choose_configs(&self, _: DisplayHandle, attributes: &[i32])
                      -> Result<Vec<ConfigHandle>, Error> {
        let mut state = self.state();
        state.config_attributes = attributes.to_vec();
        if state.config_channel_bits.is_empty() {
            return Err(Error::NoPixelFormatFound);
        }
        Ok((0..state.config_channel_bits.len())
            .map(|index| ConfigHandle::from_raw(handle(index + 1)))
            .collect())
    }

    fn config_attrib(&self, _: DisplayHandle, config: ConfigHandle, attribute: i32)
                     -> Result<i32, Error> {
        let state = self.state();
        let index = config.as_raw() as usize - 1;
        if attribute == egl::NATIVE_VISUAL_ID as EGLint {
            Ok(NATIVE_VISUAL_FORMAT)
        } else if attribute == egl::RED_SIZE as EGLint ||
                attribute == egl::GREEN_SIZE as EGLint ||
                attribute == egl::BLUE_SIZE as EGLint {
            Ok(state.config_channel_bits[index])
        } else {
            Ok(0)
        }
    }

    fn set_window_buffers_format(&self, _: NativeWindow, format: i32) -> Result<(), Error> {
        self.state().buffers_format = Some(format);
        Ok(())
    }

    fn create_window_surface(&self, _: DisplayHandle, config: ConfigHandle, _: NativeWindow)
                             -> Result<SurfaceHandle, Error> {
        let mut state = self.state();
        if state.fail_create_surface {
            return Err(Error::SurfaceCreationFailed(WindowingApiError::BadNativeWindow));
        }
        state.chosen_config = Some(config);
        state.live_surfaces += 1;
        Ok(SurfaceHandle::from_raw(handle(SURFACE)))
    }

    fn create_context(&self, _: DisplayHandle, _: ConfigHandle, attributes: &[i32])
                      -> Result<ContextHandle, Error> {
        let mut state = self.state();
        state.context_attributes = attributes.to_vec();
        if state.fail_create_context {
            return Err(Error::ContextCreationFailed(WindowingApiError::BadConfig));
        }
        state.live_contexts += 1;
        Ok(ContextHandle::from_raw(handle(CONTEXT)))
    }

    fn make_current(&self,
                    _: DisplayHandle,
                    surface: Option<SurfaceHandle>,
                    context: Option<ContextHandle>)
                    -> Result<(), Error> {
        let mut state = self.state();
        match (surface, context) {
            (Some(_), Some(_)) => {
                if state.fail_make_current {
                    return Err(Error::MakeCurrentFailed(WindowingApiError::BadMatch));
                }
                state.bound = true;
            }
            _ => {
                state.bound = false;
                state.unbinds += 1;
            }
        }
        Ok(())
    }

    fn query_surface(&self, _: DisplayHandle, _: SurfaceHandle, attribute: i32)
                     -> Result<i32, Error> {
        let state = self.state();
        if attribute == egl::WIDTH as EGLint {
            Ok(state.surface_size.0)
        } else {
            Ok(state.surface_size.1)
        }
    }

    fn swap_buffers(&self, _: DisplayHandle, _: SurfaceHandle) -> Result<(), Error> {
        self.state().swaps += 1;
        Ok(())
    }

    fn destroy_context(&self, _: DisplayHandle, _: ContextHandle) -> Result<(), Error> {
        self.state().live_contexts -= 1;
        Ok(())
    }

    fn destroy_surface(&self, _: DisplayHandle, _: SurfaceHandle) -> Result<(), Error> {
        self.state().live_surfaces -= 1;
        Ok(())
    }

    fn terminate(&self, _: DisplayHandle) -> Result<(), Error> {
        self.state().live_displays -= 1;
        Ok(())
    }

    fn get_proc_address(&self, _: &str) -> *const c_void {
        handle(0x1234)
    }
}

#[derive(Default)]
struct SensorLog {
    enables: usize,
    // Successful disables only.
    disables: usize,
    // How many of the next `disable` calls fail.
    disable_failures: usize,
    rates: Vec<Duration>,
    pending: usize,
    drained: usize,
}

#[derive(Clone, Default)]
struct MockSensor(Rc<RefCell<SensorLog>>);

impl SensorQueue for MockSensor {
    fn enable(&mut self) -> Result<(), Error> {
        self.0.borrow_mut().enables += 1;
        Ok(())
    }

    fn set_event_rate(&mut self, interval: Duration) -> Result<(), Error> {
        self.0.borrow_mut().rates.push(interval);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Error> {
        let mut log = self.0.borrow_mut();
        if log.disable_failures > 0 {
            log.disable_failures -= 1;
            return Err(Error::SensorFailed);
        }
        log.disables += 1;
        Ok(())
    }

    fn drain(&mut self) -> usize {
        let mut log = self.0.borrow_mut();
        let pending = log.pending;
        log.pending = 0;
        log.drained += pending;
        pending
    }
}

// Each poll delivers the next batch of events. Once the script runs out, polls return
// immediately with nothing.
#[derive(Default)]
struct ScriptedEvents {
    rounds: VecDeque<Vec<PlatformEvent>>,
    saved_state: Option<Vec<u8>>,
    responses: Vec<EventResponse>,
    polls: usize,
}

impl ScriptedEvents {
    fn new(rounds: Vec<Vec<PlatformEvent>>) -> ScriptedEvents {
        ScriptedEvents { rounds: rounds.into(), ..ScriptedEvents::default() }
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self,
                   _: Duration,
                   handler: &mut dyn FnMut(PlatformEvent) -> EventResponse) {
        self.polls += 1;
        if let Some(round) = self.rounds.pop_front() {
            for event in round {
                let response = handler(event);
                self.responses.push(response);
            }
        }
    }

    fn saved_state(&self) -> Option<Vec<u8>> {
        self.saved_state.clone()
    }
}

type TestGlut = Glut<MockEgl, MockSensor, ScriptedEvents>;

fn fake_window() -> NativeWindow {
    unsafe { NativeWindow::from_ptr(0x1000 as *mut c_void) }.unwrap()
}

fn window_created() -> PlatformEvent {
    PlatformEvent::Command(Command::WindowCreated(Some(fake_window())))
}

fn command(command: Command) -> PlatformEvent {
    PlatformEvent::Command(command)
}

fn new_engine(egl: &MockEgl, sensor: Option<&MockSensor>) -> Engine<MockEgl, MockSensor> {
    let accelerometer = sensor.map(|sensor| {
        crate::Accelerometer::new(sensor.clone(), ACCELEROMETER_EVENT_INTERVAL)
    });
    Engine::new(ContextManager::new(egl.clone()), accelerometer)
}

fn new_glut(egl: &MockEgl, events: ScriptedEvents, config: GlutConfig) -> TestGlut {
    Glut::init(egl.clone(), events, None, config)
}

fn attribute_value(attributes: &[i32], name: u32) -> Option<i32> {
    attributes.chunks(2)
              .find(|pair| pair[0] == name as EGLint && pair.len() == 2)
              .map(|pair| pair[1])
}

#[test]
fn test_context_creation() {
    let egl = MockEgl::default();
    let mut contexts = ContextManager::new(egl.clone());
    assert!(!contexts.is_initialized());

    let render_context = contexts.create_context(fake_window(), &ContextAttributes::default())
                                 .unwrap();
    assert!(contexts.is_initialized());
    assert_eq!(render_context.size(), Size2D::new(1080, 1920));
    assert_eq!(contexts.drawable_size(), Some(Size2D::new(1080, 1920)));
    assert_eq!(render_context.display().as_raw(), handle(DISPLAY));
    assert_eq!(render_context.surface().as_raw(), handle(SURFACE));
    assert_eq!(render_context.context().as_raw(), handle(CONTEXT));
    assert_eq!(egl.live_objects(), (1, 1, 1));

    let state = egl.0.borrow();
    assert!(state.bound);
    assert_eq!(state.buffers_format, Some(NATIVE_VISUAL_FORMAT));
    assert_eq!(attribute_value(&state.config_attributes, egl::SURFACE_TYPE),
               Some(egl::WINDOW_BIT as EGLint));
    assert_eq!(attribute_value(&state.config_attributes, egl::RENDERABLE_TYPE),
               Some(egl::OPENGL_ES2_BIT as EGLint));
    for &channel in &[egl::RED_SIZE, egl::GREEN_SIZE, egl::BLUE_SIZE] {
        assert_eq!(attribute_value(&state.config_attributes, channel), Some(8));
    }
    assert_eq!(attribute_value(&state.config_attributes, egl::DEPTH_SIZE), Some(0));
    assert_eq!(state.config_attributes.last(), Some(&(egl::NONE as EGLint)));
    assert_eq!(attribute_value(&state.context_attributes, egl::CONTEXT_CLIENT_VERSION),
               Some(2));
}

#[test]
fn test_display_mode_selects_buffers() {
    let egl = MockEgl::default();
    let mut contexts = ContextManager::new(egl.clone());
    let display_mode = DisplayMode::RGBA | DisplayMode::ALPHA | DisplayMode::DOUBLE |
        DisplayMode::DEPTH;
    let attributes = ContextAttributes::from_display_mode(display_mode, GLVersion::new(2, 0));
    assert_eq!(attributes.flags, ContextAttributeFlags::ALPHA | ContextAttributeFlags::DEPTH);

    contexts.create_context(fake_window(), &attributes).unwrap();
    let state = egl.0.borrow();
    assert_eq!(attribute_value(&state.config_attributes, egl::DEPTH_SIZE), Some(24));
    assert_eq!(attribute_value(&state.config_attributes, egl::ALPHA_SIZE), Some(8));
    assert_eq!(attribute_value(&state.config_attributes, egl::STENCIL_SIZE), Some(0));
}

#[test]
fn test_default_display_mode_requests_no_depth() {
    let attributes = ContextAttributes::default();
    assert_eq!(attributes.flags, ContextAttributeFlags::empty());
    assert_eq!(attributes.version, GLVersion::new(2, 0));
}

#[test]
fn test_config_with_wider_channels_is_skipped() {
    let egl = MockEgl::default();
    egl.state().config_channel_bits = vec![10, 8];
    let mut contexts = ContextManager::new(egl.clone());

    let render_context = contexts.create_context(fake_window(), &ContextAttributes::default())
                                 .unwrap();
    assert_eq!(render_context.config().as_raw(), handle(2));
    assert_eq!(egl.0.borrow().chosen_config, Some(render_context.config()));
}

#[test]
fn test_duplicate_context_is_rejected() {
    let egl = MockEgl::default();
    let mut contexts = ContextManager::new(egl.clone());
    let first = contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();

    for _ in 0..3 {
        match contexts.create_context(fake_window(), &ContextAttributes::default()) {
            Err(Error::WindowAlreadyExists) => {}
            other => panic!("expected WindowAlreadyExists, got {:?}", other),
        }
        assert_eq!(contexts.render_context(), Some(first));
        assert_eq!(egl.live_objects(), (1, 1, 1));
    }
}

#[test]
fn test_destroy_context_is_idempotent() {
    let egl = MockEgl::default();
    let mut contexts = ContextManager::new(egl.clone());

    // Never initialized.
    contexts.destroy_context();
    contexts.destroy_context();
    assert!(!contexts.is_initialized());
    assert_eq!(egl.0.borrow().unbinds, 0);

    contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();
    contexts.destroy_context();
    contexts.destroy_context();
    assert!(!contexts.is_initialized());
    assert_eq!(contexts.render_context(), None);
    assert_eq!(contexts.drawable_size(), None);
    assert_eq!(egl.live_objects(), (0, 0, 0));
    assert_eq!(egl.0.borrow().unbinds, 1);
    assert!(!egl.0.borrow().bound);
}

#[test]
fn test_dropping_the_manager_releases_the_context() {
    let egl = MockEgl::default();
    {
        let mut contexts = ContextManager::new(egl.clone());
        contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();
        assert_eq!(egl.live_objects(), (1, 1, 1));
    }
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_no_matching_config() {
    let egl = MockEgl::default();
    egl.state().config_channel_bits = vec![];
    let mut contexts = ContextManager::new(egl.clone());

    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::NoPixelFormatFound) => {}
        other => panic!("expected NoPixelFormatFound, got {:?}", other),
    }
    assert!(!contexts.is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));

    // Configs exist, but none with 8-bit channels.
    egl.state().config_channel_bits = vec![5, 10];
    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::NoPixelFormatFound) => {}
        other => panic!("expected NoPixelFormatFound, got {:?}", other),
    }
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_make_current_failure_releases_everything() {
    let egl = MockEgl::default();
    egl.state().fail_make_current = true;
    let mut contexts = ContextManager::new(egl.clone());

    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::MakeCurrentFailed(WindowingApiError::BadMatch)) => {}
        other => panic!("expected MakeCurrentFailed, got {:?}", other),
    }
    assert!(!contexts.is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));

    // A later attempt can still succeed.
    egl.state().fail_make_current = false;
    contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();
    assert_eq!(egl.live_objects(), (1, 1, 1));
}

#[test]
fn test_surface_creation_failure_releases_the_display() {
    let egl = MockEgl::default();
    egl.state().fail_create_surface = true;
    let mut contexts = ContextManager::new(egl.clone());

    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::SurfaceCreationFailed(WindowingApiError::BadNativeWindow)) => {}
        other => panic!("expected SurfaceCreationFailed, got {:?}", other),
    }
    assert!(!contexts.is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_context_creation_failure_releases_the_surface() {
    let egl = MockEgl::default();
    egl.state().fail_create_context = true;
    let mut contexts = ContextManager::new(egl.clone());

    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::ContextCreationFailed(WindowingApiError::BadConfig)) => {}
        other => panic!("expected ContextCreationFailed, got {:?}", other),
    }
    assert!(!contexts.is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));
    assert_eq!(egl.0.borrow().unbinds, 1);

    egl.state().fail_create_context = false;
    contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();
    assert_eq!(egl.live_objects(), (1, 1, 1));
}

#[test]
fn test_empty_drawable_is_a_failure() {
    let egl = MockEgl::default();
    egl.state().surface_size = (0, 800);
    let mut contexts = ContextManager::new(egl.clone());

    match contexts.create_context(fake_window(), &ContextAttributes::default()) {
        Err(Error::EmptyDrawable) => {}
        other => panic!("expected EmptyDrawable, got {:?}", other),
    }
    assert!(!contexts.is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_swap_buffers_needs_a_context() {
    let egl = MockEgl::default();
    let mut contexts = ContextManager::new(egl.clone());
    match contexts.swap_buffers() {
        Err(Error::NoCurrentContext) => {}
        other => panic!("expected NoCurrentContext, got {:?}", other),
    }

    contexts.create_context(fake_window(), &ContextAttributes::default()).unwrap();
    contexts.swap_buffers().unwrap();
    contexts.swap_buffers().unwrap();
    assert_eq!(egl.0.borrow().swaps, 2);

    contexts.destroy_context();
    assert!(contexts.swap_buffers().is_err());
}

#[test]
fn test_focus_toggles_accelerometer_once() {
    let egl = MockEgl::default();
    let sensor = MockSensor::default();
    let mut engine = new_engine(&egl, Some(&sensor));

    assert_eq!(engine.handle_command(Command::FocusGained), EventResponse::Handled);
    engine.handle_command(Command::FocusGained);
    assert_eq!(sensor.0.borrow().enables, 1);
    engine.handle_command(Command::FocusLost);
    engine.handle_command(Command::FocusLost);

    let log = sensor.0.borrow();
    assert_eq!(log.enables, 1);
    assert_eq!(log.disables, 1);
    assert_eq!(log.rates, vec![ACCELEROMETER_EVENT_INTERVAL; 2]);
    assert_eq!(ACCELEROMETER_EVENT_INTERVAL, Duration::from_micros(16_000));
}

#[test]
fn test_focus_without_accelerometer() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    assert_eq!(engine.handle_command(Command::FocusGained), EventResponse::Handled);
    assert_eq!(engine.handle_command(Command::FocusLost), EventResponse::Handled);
}

#[test]
fn test_failed_disable_keeps_the_accelerometer_enabled() {
    let sensor = MockSensor::default();
    sensor.0.borrow_mut().disable_failures = 1;
    let mut accelerometer = crate::Accelerometer::new(sensor.clone(),
                                                      ACCELEROMETER_EVENT_INTERVAL);

    accelerometer.start().unwrap();
    match accelerometer.stop() {
        Err(Error::SensorFailed) => {}
        other => panic!("expected SensorFailed, got {:?}", other),
    }
    assert!(accelerometer.is_enabled());

    // The next stop retries, and a later start enables exactly once more.
    accelerometer.stop().unwrap();
    assert!(!accelerometer.is_enabled());
    accelerometer.start().unwrap();

    let log = sensor.0.borrow();
    assert_eq!(log.enables, 2);
    assert_eq!(log.disables, 1);
}

#[test]
fn test_focus_lost_retries_a_failed_disable() {
    let egl = MockEgl::default();
    let sensor = MockSensor::default();
    sensor.0.borrow_mut().disable_failures = 1;
    let mut engine = new_engine(&egl, Some(&sensor));

    engine.handle_command(Command::FocusGained);
    engine.handle_command(Command::FocusLost);
    engine.handle_command(Command::FocusLost);
    engine.handle_command(Command::FocusGained);

    let log = sensor.0.borrow();
    assert_eq!(log.enables, 2);
    assert_eq!(log.disables, 1);
}

#[test]
fn test_motion_then_save_state() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);

    let motion = PlatformEvent::Input(InputEvent::Motion { x: 120.0, y: 340.0 });
    assert_eq!(engine.dispatch(motion), EventResponse::Handled);
    assert_eq!(engine.saved_state(), SavedState { x: 120, y: 340 });

    let response = engine.dispatch(command(Command::SaveState));
    assert_eq!(response, EventResponse::SaveState(SavedState { x: 120, y: 340 }));
    if let EventResponse::SaveState(saved_state) = response {
        assert_eq!(SavedState::from_bytes(&saved_state.to_bytes()), Some(saved_state));
    }
}

#[test]
fn test_other_input_is_not_consumed() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    engine.dispatch(PlatformEvent::Input(InputEvent::Motion { x: 3.7, y: 9.2 }));

    assert_eq!(engine.dispatch(PlatformEvent::Input(InputEvent::Other)),
               EventResponse::Unhandled);
    assert_eq!(engine.saved_state(), SavedState { x: 3, y: 9 });
}

#[test]
fn test_short_saved_state_is_ignored() {
    assert_eq!(SavedState::from_bytes(&[1, 2, 3]), None);

    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    engine.restore_saved_state(&[1, 2, 3]);
    assert_eq!(engine.saved_state(), SavedState::default());
}

#[test]
fn test_window_destroyed_defers_teardown() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    engine.dispatch(window_created());
    assert!(engine.is_initialized());
    assert!(matches!(engine.window_status(), WindowStatus::Ready));

    engine.dispatch(command(Command::WindowDestroyed));
    assert_eq!(engine.lifecycle_state(), LifecycleState::Terminating);
    assert!(engine.is_initialized());
    assert_eq!(egl.live_objects(), (1, 1, 1));
}

#[test]
fn test_window_created_without_native_window() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    engine.dispatch(command(Command::WindowCreated(None)));
    assert!(!engine.is_initialized());
    assert!(matches!(engine.window_status(), WindowStatus::Pending));
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_destroy_request_terminates() {
    let egl = MockEgl::default();
    let mut engine = new_engine(&egl, None);
    assert_eq!(engine.lifecycle_state(), LifecycleState::Running);
    engine.dispatch(command(Command::DestroyRequested));
    assert_eq!(engine.lifecycle_state(), LifecycleState::Terminating);
}

#[test]
fn test_callback_registry_replaces_handlers() {
    let calls = Rc::new(RefCell::new(vec![]));
    let mut registry = CallbackRegistry::new();
    registry.reshape(1, 1);

    let first = calls.clone();
    registry.set_reshape_callback(Box::new(move |w, h| first.borrow_mut().push(("first", w, h))));
    let second = calls.clone();
    registry.set_reshape_callback(Box::new(move |w, h| second.borrow_mut().push(("second", w, h))));
    registry.reshape(480, 800);

    assert_eq!(*calls.borrow(), vec![("second", 480, 800)]);
}

#[test]
fn test_main_loop_scenario() {
    const ITERATIONS: usize = 3;

    let egl = MockEgl::default();
    let mut rounds = vec![vec![window_created()]];
    rounds.extend((0..ITERATIONS).map(|_| vec![]));
    rounds.push(vec![command(Command::WindowDestroyed)]);
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), GlutConfig::default());

    assert_eq!(glut.create_window("My First Triangle").unwrap(), WindowID(1));
    assert!(glut.engine().is_initialized());

    let calls = Rc::new(RefCell::new(vec![]));
    let reshape_calls = calls.clone();
    glut.reshape_func(move |width, height| {
        reshape_calls.borrow_mut().push(format!("reshape {}x{}", width, height))
    });
    let idle_calls = calls.clone();
    glut.idle_func(move |_| idle_calls.borrow_mut().push("idle".to_owned()));
    let display_calls = calls.clone();
    glut.display_func(move |window| {
        display_calls.borrow_mut().push("display".to_owned());
        window.swap_buffers().unwrap();
    });

    glut.main_loop();

    let mut expected = vec!["reshape 480x800".to_owned()];
    for _ in 0..ITERATIONS {
        expected.push("idle".to_owned());
        expected.push("display".to_owned());
    }
    assert_eq!(*calls.borrow(), expected);
    assert_eq!(egl.0.borrow().swaps, ITERATIONS);
    assert_eq!(glut.engine().lifecycle_state(), LifecycleState::Terminating);

    // Teardown happens after the loop, not on window destruction.
    assert_eq!(egl.live_objects(), (1, 1, 1));
    glut.destroy_window();
    glut.destroy_window();
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_destroy_window_resets_the_window_status() {
    let egl = MockEgl::default();
    let mut glut = new_glut(&egl,
                            ScriptedEvents::new(vec![vec![window_created()]]),
                            GlutConfig::default());
    glut.create_window("teardown").unwrap();
    assert!(matches!(glut.engine().window_status(), WindowStatus::Ready));

    glut.destroy_window();
    assert!(!glut.engine().is_initialized());
    assert!(matches!(glut.engine().window_status(), WindowStatus::Pending));
    assert_eq!(egl.live_objects(), (0, 0, 0));

    glut.destroy_window();
    assert!(matches!(glut.engine().window_status(), WindowStatus::Pending));
}

#[test]
fn test_main_loop_drains_the_accelerometer() {
    let egl = MockEgl::default();
    let sensor = MockSensor::default();
    sensor.0.borrow_mut().pending = 5;
    let rounds = vec![
        vec![window_created(), command(Command::FocusGained)],
        vec![command(Command::WindowDestroyed)],
    ];
    let mut glut = Glut::init(egl.clone(),
                              ScriptedEvents::new(rounds),
                              Some(sensor.clone()),
                              GlutConfig::default());

    glut.create_window("accelerometer").unwrap();
    glut.main_loop();

    let log = sensor.0.borrow();
    assert_eq!(log.enables, 1);
    assert_eq!(log.drained, 5);
    assert_eq!(log.pending, 0);
}

#[test]
fn test_reshape_with_drawable_size() {
    let egl = MockEgl::default();
    let rounds = vec![vec![window_created()], vec![command(Command::WindowDestroyed)]];
    let config = GlutConfig { reshape_size: ReshapeSize::Drawable, ..GlutConfig::default() };
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), config);
    glut.create_window("reshape").unwrap();

    let sizes = Rc::new(RefCell::new(vec![]));
    let reshape_sizes = sizes.clone();
    glut.reshape_func(move |width, height| reshape_sizes.borrow_mut().push((width, height)));
    glut.main_loop();

    assert_eq!(*sizes.borrow(), vec![(1080, 1920)]);
}

#[test]
fn test_create_window_twice_fails() {
    let egl = MockEgl::default();
    let rounds = vec![vec![window_created()], vec![window_created()]];
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), GlutConfig::default());

    glut.create_window("first").unwrap();
    let before = glut.engine().contexts().render_context();
    match glut.create_window("second") {
        Err(Error::WindowAlreadyExists) => {}
        other => panic!("expected WindowAlreadyExists, got {:?}", other),
    }
    assert_eq!(glut.engine().contexts().render_context(), before);
    assert_eq!(egl.live_objects(), (1, 1, 1));
}

#[test]
fn test_create_window_waits_for_a_native_window() {
    let egl = MockEgl::default();
    let rounds = vec![
        vec![],
        vec![command(Command::WindowCreated(None))],
        vec![command(Command::FocusGained), window_created()],
    ];
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), GlutConfig::default());

    glut.create_window("wait").unwrap();
    assert_eq!(glut.events().polls, 3);
    assert!(glut.engine().is_initialized());
}

#[test]
fn test_create_window_times_out() {
    let egl = MockEgl::default();
    let config = GlutConfig { window_timeout: Duration::from_millis(20), ..GlutConfig::default() };
    let mut glut = new_glut(&egl, ScriptedEvents::new(vec![]), config);

    match glut.create_window("never") {
        Err(Error::WindowTimeout) => {}
        other => panic!("expected WindowTimeout, got {:?}", other),
    }
    assert!(!glut.engine().is_initialized());
    assert!(glut.events().polls > 0);
}

#[test]
fn test_create_window_reports_context_failure() {
    let egl = MockEgl::default();
    egl.state().fail_make_current = true;
    let mut glut = new_glut(&egl,
                            ScriptedEvents::new(vec![vec![window_created()]]),
                            GlutConfig::default());

    match glut.create_window("broken") {
        Err(Error::MakeCurrentFailed(_)) => {}
        other => panic!("expected MakeCurrentFailed, got {:?}", other),
    }
    assert!(!glut.engine().is_initialized());
    assert_eq!(egl.live_objects(), (0, 0, 0));
}

#[test]
fn test_create_window_after_window_destroyed() {
    let egl = MockEgl::default();
    let rounds = vec![vec![command(Command::WindowDestroyed)]];
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), GlutConfig::default());

    match glut.create_window("gone") {
        Err(Error::WindowDestroyed) => {}
        other => panic!("expected WindowDestroyed, got {:?}", other),
    }
}

#[test]
fn test_create_window_restores_saved_state() {
    let egl = MockEgl::default();
    let mut events = ScriptedEvents::new(vec![vec![window_created()]]);
    events.saved_state = Some(SavedState { x: 7, y: -9 }.to_bytes().to_vec());
    let mut glut = new_glut(&egl, events, GlutConfig::default());

    glut.create_window("restored").unwrap();
    assert_eq!(glut.engine().saved_state(), SavedState { x: 7, y: -9 });
}

#[test]
fn test_create_window_uses_the_display_mode() {
    let egl = MockEgl::default();
    let mut glut = new_glut(&egl,
                            ScriptedEvents::new(vec![vec![window_created()]]),
                            GlutConfig::default());
    glut.init_display_mode(DisplayMode::RGBA | DisplayMode::DOUBLE | DisplayMode::DEPTH);
    glut.init_window_size(640, 480);
    glut.create_window("My First Cube").unwrap();

    assert_eq!(attribute_value(&egl.0.borrow().config_attributes, egl::DEPTH_SIZE), Some(24));
}

#[test]
fn test_save_state_response_reaches_the_platform() {
    let egl = MockEgl::default();
    let rounds = vec![
        vec![window_created()],
        vec![PlatformEvent::Input(InputEvent::Motion { x: 120.0, y: 340.0 }),
             command(Command::SaveState),
             command(Command::WindowDestroyed)],
    ];
    let mut glut = new_glut(&egl, ScriptedEvents::new(rounds), GlutConfig::default());
    glut.create_window("save").unwrap();
    glut.main_loop();

    assert_eq!(glut.events().responses[1..],
               [EventResponse::Handled,
                EventResponse::SaveState(SavedState { x: 120, y: 340 }),
                EventResponse::Handled]);
}

#[test]
fn test_queries() {
    let egl = MockEgl::default();
    let mut glut = new_glut(&egl,
                            ScriptedEvents::new(vec![vec![window_created()]]),
                            GlutConfig::default());
    assert_eq!(glut.get(GlutQuery::WindowWidth), 0);
    assert_eq!(glut.drawable_size(), None);
    assert!(glut.swap_buffers().is_err());

    glut.create_window("queries").unwrap();
    assert_eq!(glut.get(GlutQuery::WindowWidth), 1080);
    assert_eq!(glut.get(GlutQuery::WindowHeight), 1920);
    assert_eq!(glut.get_proc_address("glViewport"), handle(0x1234));
    glut.swap_buffers().unwrap();
    glut.post_redisplay();

    let before = glut.get(GlutQuery::ElapsedTime);
    thread::sleep(Duration::from_millis(5));
    let after = glut.get(GlutQuery::ElapsedTime);
    assert!(before >= 0);
    assert!(after >= before + 5);
}

#[test]
fn test_native_window_from_null() {
    assert!(unsafe { NativeWindow::from_ptr(std::ptr::null_mut()) }.is_none());
    assert_eq!(fake_window().as_ptr(), 0x1000 as *mut c_void);
}

#[cfg(feature = "mg-raw-window-handle-06")]
#[test]
fn test_native_window_from_raw_window_handle() {
    use rwh_06::{AndroidNdkWindowHandle, RawWindowHandle, WebWindowHandle};
    use std::ptr::NonNull;

    let pointer = NonNull::new(0x2000 as *mut c_void).unwrap();
    let handle = RawWindowHandle::AndroidNdk(AndroidNdkWindowHandle::new(pointer));
    let window = unsafe { NativeWindow::from_rwh(handle) }.unwrap();
    assert_eq!(window.as_ptr(), 0x2000 as *mut c_void);

    let web = RawWindowHandle::Web(WebWindowHandle::new(1));
    match unsafe { NativeWindow::from_rwh(web) } {
        Err(Error::IncompatibleNativeWidget) => {}
        other => panic!("expected IncompatibleNativeWidget, got {:?}", other),
    }
}

#[test]
fn test_read_shader_source() {
    let directory = std::env::temp_dir().join(format!("miniglut-test-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    let path = directory.join("triangle.v.glsl");
    std::fs::write(&path, "attribute vec2 coord2d;\n").unwrap();

    assert_eq!(crate::shader::read_source(&path).unwrap(), "attribute vec2 coord2d;\n");
    match crate::shader::read_source(&directory.join("missing.glsl")) {
        Err(Error::ShaderSourceUnreadable(missing, _)) => {
            assert_eq!(missing, directory.join("missing.glsl"))
        }
        other => panic!("expected ShaderSourceUnreadable, got {:?}", other),
    }

    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn test_oversized_shader_source_is_rejected() {
    let directory = std::env::temp_dir().join(format!("miniglut-large-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    let path = directory.join("large.f.glsl");
    std::fs::write(&path, "void main(void) {}\n").unwrap();

    match crate::shader::read_source_with_limit(&path, 8) {
        Err(Error::ShaderSourceTooLarge(large)) => assert_eq!(large, path),
        other => panic!("expected ShaderSourceTooLarge, got {:?}", other),
    }
    // Exactly at the limit is fine.
    assert_eq!(crate::shader::read_source_with_limit(&path, 19).unwrap(),
               "void main(void) {}\n");

    std::fs::remove_dir_all(&directory).unwrap();
}

#[cfg(dlopen_egl)]
#[test]
fn test_egl_error_codes() {
    use crate::platform::egl::windowing_api_error;

    assert_eq!(windowing_api_error(egl::BAD_MATCH), WindowingApiError::BadMatch);
    assert_eq!(windowing_api_error(egl::BAD_NATIVE_WINDOW), WindowingApiError::BadNativeWindow);
    assert_eq!(windowing_api_error(egl::CONTEXT_LOST), WindowingApiError::ContextLost);
    assert_eq!(windowing_api_error(egl::SUCCESS), WindowingApiError::Failed);
}
