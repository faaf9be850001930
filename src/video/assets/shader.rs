//! Tagged shader resources.
//!
//! A shader resource is a plain text file that carries both stages of a program. Lines that
//! contain the `#shader` marker switch the active section, every other line is copied into the
//! active section verbatim:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! layout(location = 0) in vec4 position;
//! void main() { gl_Position = position; }
//!
//! #shader fragment
//! #version 330 core
//! uniform vec4 u_Color;
//! out vec4 color;
//! void main() { color = u_Color; }
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::video::errors::*;

/// The token that marks a section switch.
pub const SHADER_MARKER: &str = "#shader";

/// The programmable stages a `ShaderSource` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Both stages, in the order they are compiled.
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    fn from_marker(line: &str) -> Option<ShaderStage> {
        if line.contains("vertex") {
            Some(ShaderStage::Vertex)
        } else if line.contains("fragment") {
            Some(ShaderStage::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// The source text of a vertex and a fragment stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Creates a source from two inline stage texts.
    pub fn new<T1, T2>(vertex: T1, fragment: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        ShaderSource {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Reads and splits the shader resource at `path`.
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let rsp = |err: io::Error| {
            let path = path.to_owned();
            let reason = err.to_string();
            match err.kind() {
                io::ErrorKind::InvalidData => Error::ResourceInvalid { path, reason },
                _ => Error::ResourceMissing { path, reason },
            }
        };

        let file = File::open(path).map_err(rsp)?;
        let source = Self::parse(BufReader::new(file)).map_err(rsp)?;
        debug!(
            "Loaded shader resource {:?}.\nVERTEX\n{}\nFRAGMENT\n{}",
            path, source.vertex, source.fragment
        );

        Ok(source)
    }

    /// Splits a tagged shader text that is already in memory.
    pub fn parse_str(text: &str) -> Self {
        // Reading from a byte slice never fails.
        Self::parse(text.as_bytes()).unwrap_or_default()
    }

    /// Splits a tagged shader text on its `#shader` marker lines.
    ///
    /// Lines that appear before the first marker do not belong to any stage and are
    /// discarded. A marker line that names neither stage leaves the active section unchanged.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut source = ShaderSource::default();
        let mut current: Option<ShaderStage> = None;
        let mut discarded = 0;

        for line in reader.lines() {
            let line = line?;

            if line.contains(SHADER_MARKER) {
                if let Some(stage) = ShaderStage::from_marker(&line) {
                    current = Some(stage);
                }

                continue;
            }

            match current {
                Some(stage) => {
                    let buf = source.stage_mut(stage);
                    buf.push_str(&line);
                    buf.push('\n');
                }
                None => {
                    if !line.trim().is_empty() {
                        discarded += 1;
                    }
                }
            }
        }

        if discarded > 0 {
            warn!(
                "Discarded {} line(s) that appear before the first `{}` marker.",
                discarded, SHADER_MARKER
            );
        }

        Ok(source)
    }

    /// Returns the source text of `stage`.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        let source = ShaderSource::parse_str("#shader vertex\nA\n#shader fragment\nB\n");
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
        assert_eq!(source.stage(ShaderStage::Vertex), "A\n");
        assert_eq!(source.stage(ShaderStage::Fragment), "B\n");
    }

    #[test]
    fn missing_marker() {
        let source = ShaderSource::parse_str("#shader vertex\nvoid main() {}\n");
        assert_eq!(source.vertex, "void main() {}\n");
        assert!(source.fragment.is_empty());

        let source = ShaderSource::parse_str("#shader fragment\nvoid main() {}\n");
        assert!(source.vertex.is_empty());
        assert_eq!(source.fragment, "void main() {}\n");
    }

    #[test]
    fn preamble() {
        let source = ShaderSource::parse_str("// header\n\n#shader fragment\nB\n");
        assert!(source.vertex.is_empty());
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn sections_accumulate() {
        let text = "#shader vertex\nA\n#shader fragment\nB\n#shader vertex\nC\n";
        let source = ShaderSource::parse_str(text);
        assert_eq!(source.vertex, "A\nC\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn unknown_marker() {
        let text = "#shader vertex\nA\n#shader geometry\nB\n";
        let source = ShaderSource::parse_str(text);
        assert_eq!(source.vertex, "A\nB\n");
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn verbatim() {
        let text = "#shader vertex\n\n    indented;\r\n\n#shader fragment\nno newline";
        let source = ShaderSource::parse_str(text);
        assert_eq!(source.vertex, "\n    indented;\n\n");
        assert_eq!(source.fragment, "no newline\n");
    }

    #[test]
    fn load_missing() {
        match ShaderSource::load("res/shaders/does-not-exist.shader") {
            Err(Error::ResourceMissing { path, .. }) => {
                assert_eq!(path, Path::new("res/shaders/does-not-exist.shader"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn load_invalid_utf8() {
        let path = std::env::temp_dir().join(format!(
            "glsandbox-invalid-{}.shader",
            std::process::id()
        ));
        std::fs::write(&path, b"#shader vertex\n\xff\xfe\n").unwrap();

        let rsp = ShaderSource::load(&path);
        std::fs::remove_file(&path).unwrap();

        match rsp {
            Err(Error::ResourceInvalid { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected {:?}", other),
        }
    }
}
