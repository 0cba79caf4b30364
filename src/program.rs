use std::path::PathBuf;

use crate::{
    shader::{self, ShaderDescriptor, ShaderStage},
    transforms,
};

const POS_ATTRIB_INDEX: u32 = 0;
const COLOR_ATTRIB_INDEX: u32 = 1;

/// Outcome of one shader stage during a program build.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: ShaderStage,
    pub path: PathBuf,
    pub compile_ok: bool,
    /// Driver info log, or the loader error when the source never loaded.
    pub log: Option<String>,
}

/// Outcome of building one shader program.
///
/// A program handle is always present, valid or not; `link_ok` and the
/// per-stage reports say whether it is usable.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub program: u32,
    pub link_ok: bool,
    pub link_log: Option<String>,
    pub stages: Vec<StageReport>,
}

impl BuildReport {
    /// True when every stage compiled and the program linked.
    pub fn ok(&self) -> bool {
        self.link_ok && self.stages.iter().all(|s| s.compile_ok)
    }
}

/// Compiles every descriptor up to the sentinel and links the result.
///
/// Failures are printed to stderr and recorded in the report; the build never
/// aborts early. A stage that fails to compile (or whose source never loaded)
/// is still attached, so the failure shows up again in the link status.
/// Attached shader objects are deleted only when the link fails.
pub fn build_program(descriptors: &[ShaderDescriptor]) -> BuildReport {
    let mut handles = Vec::new();
    let mut stages = Vec::new();

    for desc in active(descriptors) {
        let (handle, log) = match shader::load_source(&desc.path) {
            Ok(source) => shader::compile(desc.stage, &source),
            Err(err) => {
                eprintln!("{err:#}");
                (shader::create_uncompiled(desc.stage), Some(format!("{err:#}")))
            }
        };

        stages.push(StageReport {
            stage: desc.stage,
            path: desc.path.clone(),
            compile_ok: log.is_none(),
            log,
        });
        handles.push(handle);
    }

    let program = unsafe { gl::CreateProgram() };
    for &handle in &handles {
        unsafe { gl::AttachShader(program, handle) };
    }

    unsafe {
        gl::BindAttribLocation(program, POS_ATTRIB_INDEX, b"in_position\0".as_ptr() as _);
        gl::BindAttribLocation(program, COLOR_ATTRIB_INDEX, b"in_color\0".as_ptr() as _);
        gl::LinkProgram(program);
    }

    let mut status = 0;
    unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };

    let link_log = if status == 0 {
        let log = program_info_log(program);
        eprintln!("shader linking failed:\n{}", log);
        for &handle in &handles {
            unsafe { gl::DeleteShader(handle) };
        }
        Some(log)
    } else {
        None
    };

    BuildReport {
        program,
        link_ok: status != 0,
        link_log,
        stages,
    }
}

/// Builds a program from the descriptor list, activates it and uploads the
/// fixed camera transforms.
///
/// Activation and upload are unconditional, matching the build's
/// never-abort policy: a failed link still yields a (useless) active
/// program and two no-op uploads.
pub fn init_shaders(descriptors: &[ShaderDescriptor]) -> BuildReport {
    let report = build_program(descriptors);

    unsafe { gl::UseProgram(report.program) };
    transforms::upload_camera(report.program);

    report
}

/// Descriptors up to (excluding) the first sentinel entry.
fn active(descriptors: &[ShaderDescriptor]) -> &[ShaderDescriptor] {
    let end = descriptors
        .iter()
        .position(|d| d.stage == ShaderStage::End)
        .unwrap_or(descriptors.len());
    &descriptors[..end]
}

fn program_info_log(program: u32) -> String {
    unsafe {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);

        let mut log = vec![0u8; len.max(0) as usize];
        let mut written = 0;
        gl::GetProgramInfoLog(program, len, &mut written, log.as_mut_ptr() as _);
        log.truncate(written.max(0) as usize);

        String::from_utf8_lossy(&log).into_owned()
    }
}
