// miniglut/android-example/rust/src/lib.rs
//
//! A triangle that fades in and out every five seconds.

use android_activity::AndroidApp;
use glow::HasContext;
use log::{error, info};
use miniglut::platform::android::{self, AndroidGlut};
use miniglut::{shader, DisplayMode, Error, GlutConfig, ReshapeSize, Window};
use std::f32::consts::PI;
use std::path::Path;
use std::rc::Rc;

const FADE_PERIOD_SECONDS: f32 = 5.0;

// x, y, then r, g, b.
const FLOATS_PER_VERTEX: i32 = 5;
static TRIANGLE_ATTRIBUTES: [f32; 15] = [
     0.0,  0.8,   1.0, 1.0, 0.0,
    -0.8, -0.8,   0.0, 0.0, 1.0,
     0.8, -0.8,   1.0, 0.0, 0.0,
];

#[derive(Debug)]
enum DemoError {
    Glut(Error),
    Gl(String),
}

impl From<Error> for DemoError {
    fn from(err: Error) -> DemoError {
        DemoError::Glut(err)
    }
}

struct Triangle {
    gl: glow::Context,
    program: glow::Program,
    vbo: glow::Buffer,
    coord2d: u32,
    v_color: u32,
    fade: glow::UniformLocation,
}

impl Triangle {
    fn new(gl: glow::Context) -> Result<Triangle, DemoError> {
        let program = shader::create_program(&gl,
                                             Path::new("triangle.v.glsl"),
                                             Path::new("triangle.f.glsl"))?;
        let coord2d = shader::attrib_location(&gl, program, "coord2d")?;
        let v_color = shader::attrib_location(&gl, program, "v_color")?;
        let fade = shader::uniform_location(&gl, program, "fade")?;

        let bytes: Vec<u8> = TRIANGLE_ATTRIBUTES.iter().flat_map(|value| value.to_ne_bytes())
                                                .collect();
        unsafe {
            let vbo = gl.create_buffer().map_err(DemoError::Gl)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &bytes, glow::STATIC_DRAW);

            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            Ok(Triangle { gl, program, vbo, coord2d, v_color, fade })
        }
    }

    // Alpha goes 0 -> 1 -> 0 over each period.
    fn logic(&self, window: &dyn Window) {
        let seconds = window.elapsed_time().as_secs_f32();
        let fade = (seconds * 2.0 * PI / FADE_PERIOD_SECONDS).sin() / 2.0 + 0.5;
        unsafe {
            self.gl.use_program(Some(self.program));
            self.gl.uniform_1_f32(Some(&self.fade), fade);
        }
    }

    fn render(&self, window: &dyn Window) {
        let gl = &self.gl;
        let stride = FLOATS_PER_VERTEX * 4;
        unsafe {
            gl.clear_color(1.0, 1.0, 1.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.enable_vertex_attrib_array(self.coord2d);
            gl.enable_vertex_attrib_array(self.v_color);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.vertex_attrib_pointer_f32(self.coord2d, 2, glow::FLOAT, false, stride, 0);
            gl.vertex_attrib_pointer_f32(self.v_color, 3, glow::FLOAT, false, stride, 2 * 4);

            gl.draw_arrays(glow::TRIANGLES, 0, 3);

            gl.disable_vertex_attrib_array(self.coord2d);
            gl.disable_vertex_attrib_array(self.v_color);
        }
        if let Err(err) = window.swap_buffers() {
            error!("Failed to swap buffers: {:?}", err);
        }
    }
}

impl Drop for Triangle {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_buffer(self.vbo);
        }
    }
}

fn run(glut: &mut AndroidGlut) -> Result<(), DemoError> {
    glut.init_display_mode(DisplayMode::RGBA | DisplayMode::ALPHA | DisplayMode::DOUBLE);
    glut.init_window_size(640, 480);
    glut.create_window("My Fading Triangle")?;

    let gl = unsafe { glow::Context::from_loader_function(|symbol| glut.get_proc_address(symbol)) };
    let triangle = Rc::new(Triangle::new(gl)?);

    let reshape_triangle = triangle.clone();
    glut.reshape_func(move |width, height| unsafe {
        reshape_triangle.gl.viewport(0, 0, width, height);
    });
    let idle_triangle = triangle.clone();
    glut.idle_func(move |window| idle_triangle.logic(window));
    glut.display_func(move |window| triangle.render(window));

    glut.main_loop();
    Ok(())
}

#[no_mangle]
fn android_main(app: AndroidApp) {
    let config = GlutConfig { reshape_size: ReshapeSize::Drawable, ..GlutConfig::default() };
    android::start_with_config(app, config, |glut| {
        if let Err(err) = run(glut) {
            error!("Triangle failed: {:?}", err);
        }
        info!("Triangle finished");
    });
}
