use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use cgmath::Vector2;
use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;
use super::super::super::errors::*;
use super::super::{BufferTarget, PolygonMode, Primitive, VertexAttribPointer, Visitor};
use super::capabilities::Capabilities;

/// Forwards every call to the OpenGL context that is current on this thread.
pub struct GLVisitor {
    capabilities: Capabilities,
}

impl GLVisitor {
    /// Creates a visitor over the functions loaded with `gl::load_with`.
    ///
    /// # Unsafe
    ///
    /// The context those functions belong to must be current on the calling thread for as
    /// long as the visitor is alive.
    pub unsafe fn new() -> Result<Self> {
        if !gl::CreateShader::is_loaded() || !gl::GenVertexArrays::is_loaded() {
            return Err(Error::Requirement("shader and vertex array functions".into()));
        }

        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        capabilities.check()?;

        Ok(GLVisitor { capabilities })
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Visitor for GLVisitor {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32> {
        unsafe {
            let id = gl::CreateShader(stage.into());
            if id == 0 {
                check()?;
                return Err(Error::Backend(format!("[GL] Failed to create {} shader.", stage)));
            }

            if let Err(err) = check() {
                gl::DeleteShader(id);
                return Err(err);
            }

            Ok(id)
        }
    }

    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<bool> {
        let c_str = CString::new(source.as_bytes())
            .map_err(|_| Error::Backend("[GL] Shader source contains a nul byte.".into()))?;

        unsafe {
            gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut status = GLint::from(gl::FALSE);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
            check()?;

            Ok(status == GLint::from(gl::TRUE))
        }
    }

    fn shader_info_log(&mut self, shader: u32) -> Result<String> {
        unsafe {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            check()?;

            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written = 0;
            gl::GetShaderInfoLog(
                shader,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );

            check()?;
            buf.truncate(written.max(0) as usize);
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }

    fn delete_shader(&mut self, shader: u32) -> Result<()> {
        unsafe {
            gl::DeleteShader(shader);
            check()
        }
    }

    fn create_program(&mut self) -> Result<u32> {
        unsafe {
            let id = gl::CreateProgram();
            if id == 0 {
                check()?;
                return Err(Error::Backend("[GL] Failed to create program.".into()));
            }

            if let Err(err) = check() {
                gl::DeleteProgram(id);
                return Err(err);
            }

            Ok(id)
        }
    }

    fn attach_shader(&mut self, program: u32, shader: u32) -> Result<()> {
        unsafe {
            gl::AttachShader(program, shader);
            check()
        }
    }

    fn link_program(&mut self, program: u32) -> Result<bool> {
        unsafe {
            gl::LinkProgram(program);

            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            check()?;

            Ok(status == GLint::from(gl::TRUE))
        }
    }

    fn validate_program(&mut self, program: u32) -> Result<bool> {
        unsafe {
            gl::ValidateProgram(program);

            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
            check()?;

            Ok(status == GLint::from(gl::TRUE))
        }
    }

    fn program_info_log(&mut self, program: u32) -> Result<String> {
        unsafe {
            let mut len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            check()?;

            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written = 0;
            gl::GetProgramInfoLog(
                program,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );

            check()?;
            buf.truncate(written.max(0) as usize);
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }

    fn delete_program(&mut self, program: u32) -> Result<()> {
        unsafe {
            gl::DeleteProgram(program);
            check()
        }
    }

    fn use_program(&mut self, program: u32) -> Result<()> {
        unsafe {
            gl::UseProgram(program);
            check()
        }
    }

    fn uniform_location(&mut self, program: u32, name: &str) -> Result<i32> {
        let c_name = CString::new(name.as_bytes())
            .map_err(|_| Error::Backend(format!("[GL] Uniform name {:?} contains a nul byte.", name)))?;

        unsafe {
            let location = gl::GetUniformLocation(program, c_name.as_ptr());
            check()?;
            Ok(location)
        }
    }

    fn uniform_4f(&mut self, location: i32, value: [f32; 4]) -> Result<()> {
        unsafe {
            gl::Uniform4f(location, value[0], value[1], value[2], value[3]);
            check()
        }
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<u32> {
        unsafe {
            let mut id = 0;
            gl::GenBuffers(1, &mut id);
            if id == 0 {
                return Err(Error::Backend("[GL] Failed to create buffer.".into()));
            }

            let tp: GLenum = target.into();
            gl::BindBuffer(tp, id);

            let value = if data.is_empty() {
                ptr::null()
            } else {
                data.as_ptr() as *const c_void
            };

            gl::BufferData(tp, data.len() as GLsizeiptr, value, gl::STATIC_DRAW);

            if let Err(err) = check() {
                gl::DeleteBuffers(1, &id);
                return Err(err);
            }

            Ok(id)
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) -> Result<()> {
        unsafe {
            gl::BindBuffer(target.into(), buffer);
            check()
        }
    }

    fn delete_buffer(&mut self, buffer: u32) -> Result<()> {
        unsafe {
            gl::DeleteBuffers(1, &buffer);
            check()
        }
    }

    fn create_vertex_array(&mut self) -> Result<u32> {
        unsafe {
            let mut id = 0;
            gl::GenVertexArrays(1, &mut id);
            check()?;

            if id == 0 {
                return Err(Error::Backend("[GL] Failed to create vertex array.".into()));
            }

            Ok(id)
        }
    }

    fn bind_vertex_array(&mut self, vao: u32) -> Result<()> {
        unsafe {
            gl::BindVertexArray(vao);
            check()
        }
    }

    fn delete_vertex_array(&mut self, vao: u32) -> Result<()> {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
            check()
        }
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribPointer) -> Result<()> {
        let normalized = if attribute.normalized {
            gl::TRUE
        } else {
            gl::FALSE
        };

        unsafe {
            gl::EnableVertexAttribArray(attribute.index);
            gl::VertexAttribPointer(
                attribute.index,
                GLint::from(attribute.size),
                attribute.format.into(),
                normalized,
                attribute.stride as GLsizei,
                attribute.offset as usize as *const c_void,
            );

            check()
        }
    }

    fn clear(&mut self, color: [f32; 4]) -> Result<()> {
        unsafe {
            gl::ClearColor(color[0], color[1], color[2], color[3]);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            check()
        }
    }

    fn viewport(&mut self, position: Vector2<i32>, size: Vector2<u32>) -> Result<()> {
        unsafe {
            gl::Viewport(position.x, position.y, size.x as GLsizei, size.y as GLsizei);
            check()
        }
    }

    fn polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
            check()
        }
    }

    fn draw_elements(&mut self, primitive: Primitive, count: u32) -> Result<()> {
        unsafe {
            gl::DrawElements(
                primitive.into(),
                count as GLsizei,
                gl::UNSIGNED_INT,
                ptr::null(),
            );

            check()
        }
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<()> {
        unsafe {
            gl::DrawArrays(primitive.into(), first as GLint, count as GLsizei);
            check()
        }
    }

    fn flush(&mut self) -> Result<()> {
        unsafe {
            gl::Finish();
            check()
        }
    }
}

unsafe fn check() -> Result<()> {
    let msg = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "[GL] An unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "[GL] A numeric argument is out of range.",
        gl::INVALID_OPERATION => {
            "[GL] The specified operation is not allowed in the current state."
        }
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "[GL] There is not enough memory left to execute the command.",
        _ => "[GL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Backend(msg.to_owned()))
}
