#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
extern crate clap;
extern crate env_logger;

extern crate glsandbox;

use std::path::PathBuf;
use std::process;

use glsandbox::application::settings::{SceneKind, Settings};
use glsandbox::application::Engine;
use glsandbox::errors::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = clap::App::new("glsandbox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draws triangles with shaders loaded from tagged shader files")
        .arg(
            clap::Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .value_name("FILE")
                .help("Reads settings from a JSON file"),
        )
        .arg(
            clap::Arg::with_name("scene")
                .short("s")
                .long("scene")
                .takes_value(true)
                .possible_values(&["basic", "two_triangles"])
                .help("Chooses the scene to draw"),
        )
        .arg(
            clap::Arg::with_name("shader")
                .long("shader")
                .takes_value(true)
                .value_name("FILE")
                .help("Sets the tagged shader resource of the basic scene"),
        )
        .arg(
            clap::Arg::with_name("headless")
                .long("headless")
                .takes_value(true)
                .value_name("FRAMES")
                .help("Runs without a window for the given number of frames"),
        )
        .get_matches();

    let settings = match settings(&matches) {
        Ok(v) => v,
        Err(err) => {
            error!("{}", pretty(&err));
            process::exit(1);
        }
    };

    let (window, ctx) = match Engine::setup(&settings) {
        Ok(v) => v,
        Err(err) => {
            error!("{}", pretty(&err));
            process::exit(-1);
        }
    };

    let mut engine = Engine::new(window, ctx, &settings.render);
    if let Err(err) = engine.load_scene(&settings) {
        error!("{}", pretty(&err));
        process::exit(1);
    }

    if let Err(err) = engine.run() {
        error!("{}", pretty(&err));
        process::exit(1);
    }
}

fn settings(matches: &clap::ArgMatches) -> Result<Settings> {
    let mut settings = match matches.value_of("config") {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(name) = matches.value_of("scene") {
        settings.scene = match SceneKind::parse(name) {
            Some(v) => v,
            None => bail!("Unknown scene {}.", name),
        };
    }

    if let Some(path) = matches.value_of("shader") {
        settings.shader = PathBuf::from(path);
    }

    if let Some(frames) = matches.value_of("headless") {
        let frames = frames
            .parse::<u32>()
            .with_context(|_| format!("Invalid frame count {}.", frames))?;
        settings.headless_frames = Some(frames);
    }

    Ok(settings)
}

fn pretty(err: &Error) -> String {
    let mut text = err.to_string();
    for cause in err.iter_causes() {
        text.push_str(&format!("\n  caused by: {}", cause));
    }

    text
}
