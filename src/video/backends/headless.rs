//! A visitor that never touches a GPU.
//!
//! It keeps just enough bookkeeping to behave like a strict driver: shader sources are given a
//! rough syntax check, programs only link with one compiled stage of each kind, uniform
//! locations are resolved from the `uniform` declarations of the linked sources, and every
//! call is counted in a shared `HeadlessStats` so tests can observe what crossed the boundary.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use cgmath::Vector2;

use super::super::assets::prelude::*;
use super::super::errors::*;
use super::{BufferTarget, PolygonMode, Primitive, VertexAttribPointer, Visitor};

/// Driver calls that a `HeadlessVisitor` can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    CompileShader,
    LinkProgram,
    ValidateProgram,
}

/// Call counters shared between a `HeadlessVisitor` and whoever created it.
#[derive(Debug, Default)]
pub struct HeadlessStats {
    pub shaders_created: Cell<usize>,
    pub shaders_deleted: Cell<usize>,
    pub programs_created: Cell<usize>,
    pub programs_deleted: Cell<usize>,
    pub buffers_created: Cell<usize>,
    pub buffers_deleted: Cell<usize>,
    pub vertex_arrays_created: Cell<usize>,
    pub vertex_arrays_deleted: Cell<usize>,

    pub uniform_location_queries: Cell<usize>,
    pub use_program_calls: Cell<usize>,
    pub bind_buffer_calls: Cell<usize>,
    pub bind_vertex_array_calls: Cell<usize>,
    pub attribute_pointers: Cell<usize>,
    pub clears: Cell<usize>,
    pub viewports: Cell<usize>,
    pub draw_elements_calls: Cell<usize>,
    pub draw_arrays_calls: Cell<usize>,
    pub vertices_drawn: Cell<usize>,

    /// Every `(location, value)` pushed with `uniform_4f`, in order.
    pub uniforms: RefCell<Vec<(i32, [f32; 4])>>,
    pub polygon_mode: Cell<PolygonMode>,
}

impl HeadlessStats {
    /// The number of objects that were created but not deleted yet.
    pub fn live_objects(&self) -> usize {
        let created = self.shaders_created.get()
            + self.programs_created.get()
            + self.buffers_created.get()
            + self.vertex_arrays_created.get();

        let deleted = self.shaders_deleted.get()
            + self.programs_deleted.get()
            + self.buffers_deleted.get()
            + self.vertex_arrays_deleted.get();

        created - deleted
    }
}

#[inline]
fn incr(v: &Cell<usize>) {
    v.set(v.get() + 1);
}

#[derive(Debug)]
struct HeadlessShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct HeadlessProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
}

pub struct HeadlessVisitor {
    stats: Rc<HeadlessStats>,
    next: u32,
    shaders: HashMap<u32, HeadlessShader>,
    programs: HashMap<u32, HeadlessProgram>,
    buffers: HashMap<u32, BufferTarget>,
    vertex_arrays: HashSet<u32>,
    current_program: u32,
    bound_array_buffer: u32,
    bound_element_buffer: u32,
    bound_vertex_array: u32,
    faults: HashSet<Fault>,
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new()
    }
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            stats: Rc::new(HeadlessStats::default()),
            next: 0,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            vertex_arrays: HashSet::new(),
            current_program: 0,
            bound_array_buffer: 0,
            bound_element_buffer: 0,
            bound_vertex_array: 0,
            faults: HashSet::new(),
        }
    }

    /// Returns the counters of this visitor. Grab them before handing the visitor over to a
    /// `Device`.
    pub fn stats(&self) -> Rc<HeadlessStats> {
        self.stats.clone()
    }

    fn allocate(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    /// Makes every later call of the given kind return a backend error.
    pub fn inject_fault(&mut self, fault: Fault) {
        self.faults.insert(fault);
    }

    fn fault(&self, fault: Fault) -> Result<()> {
        if self.faults.contains(&fault) {
            return Err(Error::Backend(format!("[Headless] {:?} failed.", fault)));
        }

        Ok(())
    }

    fn invalid<T>(what: &str, id: u32) -> Result<T> {
        Err(Error::Backend(format!("[Headless] {} {} is invalid.", what, id)))
    }
}

/// Rough structural check standing in for a GLSL front end.
fn check_source(source: &str) -> ::std::result::Result<(), String> {
    if !source.contains("main") {
        return Err("0:1(1): error: entry point `main` is not defined".into());
    }

    let mut braces = 0i32;
    let mut parens = 0i32;
    for (line, text) in source.lines().enumerate() {
        for c in text.chars() {
            match c {
                '{' => braces += 1,
                '}' => braces -= 1,
                '(' => parens += 1,
                ')' => parens -= 1,
                _ => {}
            }

            if braces < 0 || parens < 0 {
                return Err(format!("0:{}(1): error: syntax error, unexpected `{}`", line + 1, c));
            }
        }
    }

    if braces != 0 || parens != 0 {
        return Err("0:1(1): error: syntax error, unexpected end of file".into());
    }

    Ok(())
}

/// Collects the names of `uniform <type> <name>;` declarations.
fn collect_uniforms(source: &str, uniforms: &mut Vec<String>) {
    for line in source.lines() {
        let mut tokens = line
            .split(|c: char| c.is_whitespace() || c == ';')
            .filter(|v| !v.is_empty());

        if tokens.next() != Some("uniform") {
            continue;
        }

        if let Some(name) = tokens.nth(1) {
            let name = name.split('[').next().unwrap_or(name);
            if !uniforms.iter().any(|v| v == name) {
                uniforms.push(name.to_owned());
            }
        }
    }
}

impl Visitor for HeadlessVisitor {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32> {
        let id = self.allocate();
        self.shaders.insert(
            id,
            HeadlessShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );

        incr(&self.stats.shaders_created);
        Ok(id)
    }

    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<bool> {
        self.fault(Fault::CompileShader)?;
        let data = match self.shaders.get_mut(&shader) {
            Some(v) => v,
            None => return Self::invalid("Shader", shader),
        };

        data.source = source.to_owned();
        match check_source(source) {
            Ok(_) => {
                data.compiled = true;
                data.log.clear();
            }
            Err(log) => {
                data.compiled = false;
                data.log = log;
            }
        }

        Ok(data.compiled)
    }

    fn shader_info_log(&mut self, shader: u32) -> Result<String> {
        match self.shaders.get(&shader) {
            Some(v) => Ok(v.log.clone()),
            None => Self::invalid("Shader", shader),
        }
    }

    fn delete_shader(&mut self, shader: u32) -> Result<()> {
        if self.shaders.remove(&shader).is_none() {
            return Self::invalid("Shader", shader);
        }

        incr(&self.stats.shaders_deleted);
        Ok(())
    }

    fn create_program(&mut self) -> Result<u32> {
        let id = self.allocate();
        self.programs.insert(id, HeadlessProgram::default());
        incr(&self.stats.programs_created);
        Ok(id)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) -> Result<()> {
        if !self.shaders.contains_key(&shader) {
            return Self::invalid("Shader", shader);
        }

        match self.programs.get_mut(&program) {
            Some(v) => {
                v.attached.push(shader);
                Ok(())
            }
            None => Self::invalid("Program", program),
        }
    }

    fn link_program(&mut self, program: u32) -> Result<bool> {
        self.fault(Fault::LinkProgram)?;
        let shaders = &self.shaders;
        let data = match self.programs.get_mut(&program) {
            Some(v) => v,
            None => return Self::invalid("Program", program),
        };

        let mut uniforms = Vec::new();
        let mut missing = Vec::new();
        for &stage in &ShaderStage::ALL {
            let shader = data
                .attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|v| v.stage == stage && v.compiled);

            match shader {
                Some(v) => collect_uniforms(&v.source, &mut uniforms),
                None => missing.push(stage),
            }
        }

        if missing.is_empty() {
            data.linked = true;
            data.log.clear();
            data.uniforms = uniforms;
        } else {
            data.linked = false;
            data.log = format!("error: no compiled {:?} shader attached", missing);
            data.uniforms.clear();
        }

        Ok(data.linked)
    }

    fn validate_program(&mut self, program: u32) -> Result<bool> {
        self.fault(Fault::ValidateProgram)?;
        match self.programs.get(&program) {
            Some(v) => Ok(v.linked),
            None => Self::invalid("Program", program),
        }
    }

    fn program_info_log(&mut self, program: u32) -> Result<String> {
        match self.programs.get(&program) {
            Some(v) => Ok(v.log.clone()),
            None => Self::invalid("Program", program),
        }
    }

    fn delete_program(&mut self, program: u32) -> Result<()> {
        if self.programs.remove(&program).is_none() {
            return Self::invalid("Program", program);
        }

        if self.current_program == program {
            self.current_program = 0;
        }

        incr(&self.stats.programs_deleted);
        Ok(())
    }

    fn use_program(&mut self, program: u32) -> Result<()> {
        if program != 0 && !self.programs.contains_key(&program) {
            return Self::invalid("Program", program);
        }

        self.current_program = program;
        incr(&self.stats.use_program_calls);
        Ok(())
    }

    fn uniform_location(&mut self, program: u32, name: &str) -> Result<i32> {
        incr(&self.stats.uniform_location_queries);

        let data = match self.programs.get(&program) {
            Some(v) => v,
            None => return Self::invalid("Program", program),
        };

        if !data.linked {
            return Err(Error::Backend(format!(
                "[Headless] Program {} has not been linked successfully.",
                program
            )));
        }

        Ok(data
            .uniforms
            .iter()
            .position(|v| v == name)
            .map(|v| v as i32)
            .unwrap_or(-1))
    }

    fn uniform_4f(&mut self, location: i32, value: [f32; 4]) -> Result<()> {
        if self.current_program == 0 {
            return Err(Error::Backend("[Headless] No program is in use.".into()));
        }

        self.stats.uniforms.borrow_mut().push((location, value));
        Ok(())
    }

    fn create_buffer(&mut self, target: BufferTarget, _: &[u8]) -> Result<u32> {
        let id = self.allocate();
        self.buffers.insert(id, target);
        self.bind_buffer(target, id)?;
        incr(&self.stats.buffers_created);
        Ok(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) -> Result<()> {
        if buffer != 0 && !self.buffers.contains_key(&buffer) {
            return Self::invalid("Buffer", buffer);
        }

        match target {
            BufferTarget::Array => self.bound_array_buffer = buffer,
            BufferTarget::ElementArray => self.bound_element_buffer = buffer,
        }

        incr(&self.stats.bind_buffer_calls);
        Ok(())
    }

    fn delete_buffer(&mut self, buffer: u32) -> Result<()> {
        if self.buffers.remove(&buffer).is_none() {
            return Self::invalid("Buffer", buffer);
        }

        if self.bound_array_buffer == buffer {
            self.bound_array_buffer = 0;
        }

        if self.bound_element_buffer == buffer {
            self.bound_element_buffer = 0;
        }

        incr(&self.stats.buffers_deleted);
        Ok(())
    }

    fn create_vertex_array(&mut self) -> Result<u32> {
        let id = self.allocate();
        self.vertex_arrays.insert(id);
        incr(&self.stats.vertex_arrays_created);
        Ok(id)
    }

    fn bind_vertex_array(&mut self, vao: u32) -> Result<()> {
        if vao != 0 && !self.vertex_arrays.contains(&vao) {
            return Self::invalid("VertexArray", vao);
        }

        self.bound_vertex_array = vao;
        incr(&self.stats.bind_vertex_array_calls);
        Ok(())
    }

    fn delete_vertex_array(&mut self, vao: u32) -> Result<()> {
        if !self.vertex_arrays.remove(&vao) {
            return Self::invalid("VertexArray", vao);
        }

        if self.bound_vertex_array == vao {
            self.bound_vertex_array = 0;
        }

        incr(&self.stats.vertex_arrays_deleted);
        Ok(())
    }

    fn vertex_attrib_pointer(&mut self, _: &VertexAttribPointer) -> Result<()> {
        if self.bound_vertex_array == 0 || self.bound_array_buffer == 0 {
            return Err(Error::Backend(
                "[Headless] Attribute pointers need a bound vertex array and array buffer.".into(),
            ));
        }

        incr(&self.stats.attribute_pointers);
        Ok(())
    }

    fn clear(&mut self, _: [f32; 4]) -> Result<()> {
        incr(&self.stats.clears);
        Ok(())
    }

    fn viewport(&mut self, _: Vector2<i32>, _: Vector2<u32>) -> Result<()> {
        incr(&self.stats.viewports);
        Ok(())
    }

    fn polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        self.stats.polygon_mode.set(mode);
        Ok(())
    }

    fn draw_elements(&mut self, _: Primitive, count: u32) -> Result<()> {
        if self.current_program == 0
            || self.bound_vertex_array == 0
            || self.bound_element_buffer == 0
        {
            return Err(Error::Backend(
                "[Headless] Indexed draws need a program, a vertex array and an index buffer."
                    .into(),
            ));
        }

        incr(&self.stats.draw_elements_calls);
        let drawn = self.stats.vertices_drawn.get() + count as usize;
        self.stats.vertices_drawn.set(drawn);
        Ok(())
    }

    fn draw_arrays(&mut self, _: Primitive, _: u32, count: u32) -> Result<()> {
        if self.current_program == 0 || self.bound_vertex_array == 0 {
            return Err(Error::Backend(
                "[Headless] Draws need a program and a vertex array.".into(),
            ));
        }

        incr(&self.stats.draw_arrays_calls);
        let drawn = self.stats.vertices_drawn.get() + count as usize;
        self.stats.vertices_drawn.set(drawn);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
