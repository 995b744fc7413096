// miniglut/src/callbacks.rs
//
//! The registered display, idle and reshape handlers.

use crate::window::Window;

pub type DisplayCallback = Box<dyn FnMut(&dyn Window)>;
pub type IdleCallback = Box<dyn FnMut(&dyn Window)>;
/// Receives the width and height of the window.
pub type ReshapeCallback = Box<dyn FnMut(i32, i32)>;

/// At most one handler per callback kind. Registering again replaces the previous handler.
#[derive(Default)]
pub struct CallbackRegistry {
    display: Option<DisplayCallback>,
    idle: Option<IdleCallback>,
    reshape: Option<ReshapeCallback>,
}

impl CallbackRegistry {
    #[inline]
    pub fn new() -> CallbackRegistry {
        CallbackRegistry::default()
    }

    #[inline]
    pub fn set_display_callback(&mut self, callback: DisplayCallback) {
        self.display = Some(callback);
    }

    #[inline]
    pub fn set_idle_callback(&mut self, callback: IdleCallback) {
        self.idle = Some(callback);
    }

    #[inline]
    pub fn set_reshape_callback(&mut self, callback: ReshapeCallback) {
        self.reshape = Some(callback);
    }

    pub(crate) fn display(&mut self, window: &dyn Window) {
        if let Some(ref mut display) = self.display {
            display(window);
        }
    }

    pub(crate) fn idle(&mut self, window: &dyn Window) {
        if let Some(ref mut idle) = self.idle {
            idle(window);
        }
    }

    pub(crate) fn reshape(&mut self, width: i32, height: i32) {
        if let Some(ref mut reshape) = self.reshape {
            reshape(width, height);
        }
    }
}
