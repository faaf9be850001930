use std::cmp;
use std::ffi;

use gl;
use gl::types::*;

use crate::video::errors::*;

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Parses a `GL_VERSION` string, e.g. `4.6.0 NVIDIA 535.54` or `OpenGL ES 3.2 Mesa`.
    pub fn parse_str(desc: &str) -> Option<Version> {
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            // Profile names such as `OpenGL ES-CM 1.1`.
            (true, desc[10..].splitn(2, ' ').nth(1).unwrap_or(""))
        } else {
            (false, desc)
        };

        let desc = desc.split(' ').next()?;
        let mut iter = desc.split('.');
        let major = iter.next()?.parse().ok()?;
        let minor = iter.next()?.parse().ok()?;

        if es {
            Some(Version::ES(major, minor))
        } else {
            Some(Version::GL(major, minor))
        }
    }
}

/// What the current context reports about itself.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,
    pub shading_language: String,
}

impl Capabilities {
    /// Queries the capabilities of the current context using the loaded functions.
    ///
    /// # Unsafe
    ///
    /// You must ensure that the functions belong to the current context, otherwise you will get
    /// an undefined behavior.
    pub unsafe fn parse() -> Result<Capabilities> {
        let desc = get_string(gl::VERSION)?;
        let version = Version::parse_str(&desc)
            .ok_or_else(|| Error::Backend(format!("[GL] Unrecognized version string {:?}.", desc)))?;

        Ok(Capabilities {
            version,
            vendor: get_string(gl::VENDOR)?,
            renderer: get_string(gl::RENDERER)?,
            shading_language: get_string(gl::SHADING_LANGUAGE_VERSION)?,
        })
    }

    /// Vertex array objects are core since GL 3.0 and ES 3.0.
    pub fn check(&self) -> Result<()> {
        let supported = match self.version {
            Version::GL(..) => self.version >= Version::GL(3, 0),
            Version::ES(..) => self.version >= Version::ES(3, 0),
        };

        if !supported {
            return Err(Error::Requirement(format!(
                "vertex array objects (context version {:?})",
                self.version
            )));
        }

        Ok(())
    }
}

unsafe fn get_string(name: GLenum) -> Result<String> {
    let desc = gl::GetString(name);
    if desc.is_null() {
        return Err(Error::Backend(format!("[GL] glGetString({:#x}) returned null.", name)));
    }

    let desc = ffi::CStr::from_ptr(desc as *const _);
    Ok(desc.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(Version::parse_str("3.3.0 NVIDIA 535.54"), Some(Version::GL(3, 3)));
        assert_eq!(Version::parse_str("4.1 Metal - 83.1"), Some(Version::GL(4, 1)));
        assert_eq!(Version::parse_str("OpenGL ES 3.2 Mesa 23.0"), Some(Version::ES(3, 2)));
        assert_eq!(Version::parse_str("OpenGL ES-CM 1.1"), Some(Version::ES(1, 1)));
        assert_eq!(Version::parse_str("garbage"), None);
    }

    #[test]
    fn compare() {
        assert!(Version::GL(3, 3) >= Version::GL(3, 0));
        assert!(Version::GL(2, 1) < Version::GL(3, 0));
        assert!(!(Version::ES(3, 0) >= Version::GL(3, 0)));
        assert!(!(Version::GL(3, 0) >= Version::ES(3, 0)));
    }

    #[test]
    fn requirement() {
        let caps = Capabilities {
            version: Version::GL(2, 1),
            vendor: "mock".into(),
            renderer: "mock".into(),
            shading_language: "1.20".into(),
        };

        assert!(caps.check().is_err());

        let caps = Capabilities {
            version: Version::GL(3, 3),
            ..caps
        };

        assert!(caps.check().is_ok());
    }
}
