extern crate glsandbox;

use glsandbox::video::errors::Error;
use glsandbox::video::prelude::*;

const VS: &str = "#version 330 core
layout(location = 0) in vec4 position;
void main()
{
    gl_Position = position;
}
";

const FS: &str = "#version 330 core
layout(location = 0) out vec4 color;
uniform vec4 u_Color;
void main()
{
    color = u_Color;
}
";

#[test]
fn compile_failure() {
    let (mut ctx, stats) = Context::headless();
    let broken = "#version 330 core\nvoid main()\n{\n    color = vec4(1.0;\n";

    match Shader::new(&mut ctx, &ShaderSource::new(VS, broken)) {
        Err(Error::CompileFailure { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(log.contains("error"));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(stats.live_objects(), 0);
}

#[test]
fn pass_through() {
    let (mut ctx, _) = Context::headless();
    let shader = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();
    assert!(shader.id() != 0);
    assert!(!shader.is_bound(&ctx));

    shader.bind(&mut ctx).unwrap();
    assert!(shader.is_bound(&ctx));

    shader.unbind(&mut ctx).unwrap();
    assert!(!shader.is_bound(&ctx));
}

#[test]
fn from_file() {
    let (mut ctx, _) = Context::headless();
    let shader = Shader::from_file(&mut ctx, "res/shaders/Basic.shader").unwrap();
    assert_eq!(shader.uniform_location("u_Color").unwrap(), Some(0));
}

#[test]
fn uniform_cache() {
    let (mut ctx, stats) = Context::headless();
    let shader = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();

    let first = shader.uniform_location("u_Color").unwrap();
    let second = shader.uniform_location("u_Color").unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(stats.uniform_location_queries.get(), 1);
}

#[test]
fn missing_uniform() {
    let (mut ctx, stats) = Context::headless();
    let shader = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();

    assert_eq!(shader.uniform_location("u_Missing").unwrap(), None);
    assert_eq!(shader.uniform_location("u_Missing").unwrap(), None);
    assert_eq!(stats.uniform_location_queries.get(), 1);

    shader.bind(&mut ctx).unwrap();
    shader
        .set_uniform4f(&ctx, "u_Missing", [1.0, 0.0, 0.0, 1.0])
        .unwrap();
    assert!(stats.uniforms.borrow().is_empty());
}

#[test]
fn uniform_requires_binding() {
    let (mut ctx, stats) = Context::headless();
    let shader = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();

    match shader.set_uniform4f(&ctx, "u_Color", [0.5, 0.3, 0.8, 1.0]) {
        Err(Error::ProgramNotBound(id)) => assert_eq!(id, shader.id()),
        other => panic!("unexpected {:?}", other),
    }

    shader.bind(&mut ctx).unwrap();
    shader
        .set_uniform4f(&ctx, "u_Color", [0.5, 0.3, 0.8, 1.0])
        .unwrap();

    assert_eq!(*stats.uniforms.borrow(), vec![(0, [0.5, 0.3, 0.8, 1.0])]);
}

#[test]
fn bind_deduplication() {
    let (mut ctx, stats) = Context::headless();
    let a = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();
    let b = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();

    a.bind(&mut ctx).unwrap();
    a.bind(&mut ctx).unwrap();
    assert_eq!(stats.use_program_calls.get(), 1);

    b.bind(&mut ctx).unwrap();
    a.bind(&mut ctx).unwrap();
    assert_eq!(stats.use_program_calls.get(), 3);
}

fn faulty_context(fault: Fault) -> (Context, std::rc::Rc<HeadlessStats>) {
    let mut visitor = HeadlessVisitor::new();
    visitor.inject_fault(fault);
    let stats = visitor.stats();
    (Context::new(Box::new(visitor)), stats)
}

#[test]
fn driver_errors_release_objects() {
    for &fault in &[
        Fault::CompileShader,
        Fault::LinkProgram,
        Fault::ValidateProgram,
    ] {
        let (mut ctx, stats) = faulty_context(fault);

        match Shader::new(&mut ctx, &ShaderSource::new(VS, FS)) {
            Err(Error::Backend(_)) => {}
            other => panic!("unexpected {:?} for {:?}", other, fault),
        }

        assert_eq!(stats.live_objects(), 0, "{:?}", fault);
        assert!(stats.shaders_created.get() > 0);
    }
}

#[test]
fn link_error_releases_both_stages() {
    let (mut ctx, stats) = faulty_context(Fault::LinkProgram);
    assert!(Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).is_err());

    assert_eq!(stats.shaders_created.get(), 2);
    assert_eq!(stats.shaders_deleted.get(), 2);
    assert_eq!(stats.programs_created.get(), 1);
    assert_eq!(stats.programs_deleted.get(), 1);
}
