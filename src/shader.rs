// miniglut/src/shader.rs
//
//! Shader loading helpers: read GLSL from files, compile, link and look up program inputs.
//!
//! Compiler and linker diagnostics are logged and also returned inside the error.

use crate::Error;

use glow::HasContext;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Source files longer than this are rejected.
pub const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads a whole shader source file.
pub fn read_source(path: &Path) -> Result<String, Error> {
    read_source_with_limit(path, MAX_SOURCE_SIZE)
}

pub(crate) fn read_source_with_limit(path: &Path, limit: u64) -> Result<String, Error> {
    let mut bytes = vec![];
    File::open(path)
        .and_then(|file| file.take(limit + 1).read_to_end(&mut bytes))
        .map_err(|err| {
            error!("Error opening {}: {}", path.display(), err);
            Error::ShaderSourceUnreadable(path.to_owned(), err)
        })?;
    if bytes.len() as u64 > limit {
        error!("{} is larger than {} bytes", path.display(), limit);
        return Err(Error::ShaderSourceTooLarge(path.to_owned()));
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Compiles the shader in `path`. `shader_type` is `glow::VERTEX_SHADER` or
/// `glow::FRAGMENT_SHADER`.
pub fn create_shader<H>(gl: &H, path: &Path, shader_type: u32) -> Result<H::Shader, Error>
                        where H: HasContext {
    let source = read_source(path)?;
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(Error::ShaderCompilationFailed)?;
        gl.shader_source(shader, &source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            error!("{}: {}", path.display(), log);
            gl.delete_shader(shader);
            return Err(Error::ShaderCompilationFailed(log));
        }
        Ok(shader)
    }
}

/// Compiles both shaders and links them into a program.
pub fn create_program<H>(gl: &H, vertex_path: &Path, fragment_path: &Path)
                         -> Result<H::Program, Error>
                         where H: HasContext {
    let vertex_shader = create_shader(gl, vertex_path, glow::VERTEX_SHADER)?;
    let fragment_shader = match create_shader(gl, fragment_path, glow::FRAGMENT_SHADER) {
        Ok(fragment_shader) => fragment_shader,
        Err(err) => {
            unsafe { gl.delete_shader(vertex_shader) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vertex_shader);
                gl.delete_shader(fragment_shader);
                return Err(Error::ProgramLinkFailed(err));
            }
        };
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        // The program keeps the compiled code alive.
        gl.detach_shader(program, vertex_shader);
        gl.detach_shader(program, fragment_shader);
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            error!("glLinkProgram: {}", log);
            gl.delete_program(program);
            return Err(Error::ProgramLinkFailed(log));
        }
        Ok(program)
    }
}

pub fn attrib_location<H>(gl: &H, program: H::Program, name: &str) -> Result<u32, Error>
                          where H: HasContext {
    match unsafe { gl.get_attrib_location(program, name) } {
        Some(location) => Ok(location),
        None => {
            error!("Could not bind attribute {}", name);
            Err(Error::AttributeNotFound(name.to_owned()))
        }
    }
}

pub fn uniform_location<H>(gl: &H, program: H::Program, name: &str)
                           -> Result<H::UniformLocation, Error>
                           where H: HasContext {
    match unsafe { gl.get_uniform_location(program, name) } {
        Some(location) => Ok(location),
        None => {
            error!("Could not bind uniform {}", name);
            Err(Error::UniformNotFound(name.to_owned()))
        }
    }
}
