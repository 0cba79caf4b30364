use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    ptr,
};

use eyre::{eyre, Context, Result};
use gl::types::GLenum;

/// One pipeline stage a shader source can be compiled for.
///
/// `End` is the sentinel terminating a descriptor list; it never reaches the
/// driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
    End,
}

impl ShaderStage {
    pub fn gl_enum(self) -> Option<GLenum> {
        match self {
            ShaderStage::Vertex => Some(gl::VERTEX_SHADER),
            ShaderStage::Geometry => Some(gl::GEOMETRY_SHADER),
            ShaderStage::Fragment => Some(gl::FRAGMENT_SHADER),
            ShaderStage::End => None,
        }
    }

    /// Stage name used in compile diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometric",
            ShaderStage::Fragment => "fragment",
            ShaderStage::End => "none",
        }
    }
}

/// A shader stage paired with the file its source is read from.
#[derive(Debug, Clone)]
pub struct ShaderDescriptor {
    pub stage: ShaderStage,
    pub path: PathBuf,
}

impl ShaderDescriptor {
    pub fn new(stage: ShaderStage, path: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            path: path.into(),
        }
    }

    /// The sentinel entry terminating a descriptor list.
    pub fn end() -> Self {
        Self {
            stage: ShaderStage::End,
            path: PathBuf::new(),
        }
    }
}

/// Reads a shader source file into a NUL-terminated byte buffer.
///
/// The buffer holds the file content plus a single trailing `0`, so its
/// length is always `filesize + 1`.
pub fn load_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();

    let mut file =
        File::open(path).wrap_err_with(|| format!("unable to open file '{}'", path.display()))?;
    let len = file
        .metadata()
        .wrap_err_with(|| format!("unable to stat file '{}'", path.display()))?
        .len() as usize;

    let mut source = Vec::with_capacity(len + 1);
    file.read_to_end(&mut source)
        .wrap_err_with(|| format!("unable to read file '{}'", path.display()))?;

    // Zero bytes read and an empty file are the same condition
    if source.is_empty() {
        return Err(eyre!("file '{}' is empty", path.display()));
    }

    source.push(b'\0');
    Ok(source)
}

/// Compiles a NUL-terminated source buffer as a shader of the given stage.
///
/// The shader object is returned even when compilation fails, together with
/// the driver's info log, so the caller can still attach it and observe the
/// failure again at link time. Compile failures are printed to stderr with
/// the stage name.
pub fn compile(stage: ShaderStage, source: &[u8]) -> (u32, Option<String>) {
    debug_assert!(source.ends_with(b"\0"));

    let typ = match stage.gl_enum() {
        Some(typ) => typ,
        None => return (0, Some("no shader stage to compile".to_string())),
    };

    unsafe {
        let shader = gl::CreateShader(typ);
        gl::ShaderSource(shader, 1, &(source.as_ptr() as _), ptr::null());
        gl::CompileShader(shader);

        let mut status = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status == 0 {
            let log = shader_info_log(shader);
            eprintln!("compile failure in {} shader:\n{}", stage.name(), log);
            return (shader, Some(log));
        }

        (shader, None)
    }
}

/// Creates a bare shader object without sourcing or compiling it.
///
/// Used when the source could not be loaded: the object is still attached so
/// the failure surfaces again at link time.
pub fn create_uncompiled(stage: ShaderStage) -> u32 {
    match stage.gl_enum() {
        Some(typ) => unsafe { gl::CreateShader(typ) },
        None => 0,
    }
}

fn shader_info_log(shader: u32) -> String {
    unsafe {
        let mut len = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);

        let mut log = vec![0u8; len.max(0) as usize];
        let mut written = 0;
        gl::GetShaderInfoLog(shader, len, &mut written, log.as_mut_ptr() as _);
        log.truncate(written.max(0) as usize);

        String::from_utf8_lossy(&log).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, process};

    use super::*;

    fn scratch_file(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("initgl-{}-{}", process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loaded_source_is_file_bytes_plus_nul() {
        let content = b"#version 330 core\nvoid main() {}\n";
        let path = scratch_file("basic.vert", content);

        let source = load_source(&path).unwrap();
        assert_eq!(source.len(), content.len() + 1);
        assert_eq!(&source[..content.len()], &content[..]);
        assert_eq!(source[content.len()], 0);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_source("no/such/shader.vert").unwrap_err();
        assert!(err.to_string().contains("no/such/shader.vert"));
    }

    #[test]
    fn empty_file_is_rejected() {
        let path = scratch_file("empty.vert", b"");

        let err = load_source(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("is empty"));
        assert!(msg.contains(path.to_str().unwrap()));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn stage_names_match_diagnostics() {
        assert_eq!(ShaderStage::Vertex.name(), "vertex");
        assert_eq!(ShaderStage::Geometry.name(), "geometric");
        assert_eq!(ShaderStage::Fragment.name(), "fragment");
    }

    #[test]
    fn sentinel_has_no_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), Some(gl::VERTEX_SHADER));
        assert_eq!(ShaderStage::Geometry.gl_enum(), Some(gl::GEOMETRY_SHADER));
        assert_eq!(ShaderStage::Fragment.gl_enum(), Some(gl::FRAGMENT_SHADER));
        assert!(ShaderStage::End.gl_enum().is_none());
    }

    #[test]
    fn sentinel_descriptor_has_no_path() {
        let end = ShaderDescriptor::end();
        assert_eq!(end.stage, ShaderStage::End);
        assert_eq!(end.path, PathBuf::new());
    }
}
