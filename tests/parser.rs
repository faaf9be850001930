extern crate glsandbox;
extern crate rand;

use rand::Rng;

use glsandbox::video::prelude::*;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 ;(){}=.,_\t";

fn random_line<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(0, 40);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0, ALPHABET.len())] as char)
        .collect()
}

fn random_section<R: Rng>(rng: &mut R) -> Vec<String> {
    let lines = rng.gen_range(0, 12);
    (0..lines).map(|_| random_line(rng)).collect()
}

#[test]
fn round_trip() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let vertex = random_section(&mut rng);
        let fragment = random_section(&mut rng);
        let vertex_first = rng.gen::<bool>();

        let mut text = String::new();
        let sections = if vertex_first {
            [("vertex", &vertex), ("fragment", &fragment)]
        } else {
            [("fragment", &fragment), ("vertex", &vertex)]
        };

        for &(name, lines) in &sections {
            text.push_str(&format!("#shader {}\n", name));
            for line in lines.iter() {
                text.push_str(line);
                text.push('\n');
            }
        }

        let source = ShaderSource::parse_str(&text);
        let expected = |lines: &Vec<String>| -> String {
            lines.iter().map(|v| format!("{}\n", v)).collect()
        };

        assert_eq!(source.vertex, expected(&vertex));
        assert_eq!(source.fragment, expected(&fragment));
    }
}

#[test]
fn two_sections() {
    let source = ShaderSource::parse_str("#shader vertex\nA\n#shader fragment\nB\n");
    assert_eq!(source, ShaderSource::new("A\n", "B\n"));
}

#[test]
fn missing_fragment_marker() {
    let source = ShaderSource::parse_str("#shader vertex\nvoid main() {}\n");
    assert_eq!(source.vertex, "void main() {}\n");
    assert_eq!(source.fragment, "");
}

#[test]
fn basic_resource() {
    let source = ShaderSource::load("res/shaders/Basic.shader").unwrap();
    assert!(source.vertex.starts_with("#version 330 core\n"));
    assert!(source.vertex.contains("in vec4 position;"));
    assert!(!source.vertex.contains("u_Color"));
    assert!(source.fragment.contains("uniform vec4 u_Color;"));
    assert!(!source.fragment.contains(SHADER_MARKER));
}

#[test]
fn missing_resource() {
    match ShaderSource::load("res/shaders/Nothing.shader") {
        Err(glsandbox::video::errors::Error::ResourceMissing { path, .. }) => {
            assert!(path.ends_with("Nothing.shader"));
        }
        other => panic!("unexpected {:?}", other),
    }
}
