//! Loading, compiling and linking of OpenGL shader programs from source
//! files, plus a fixed camera/projection uniform setup.
//!
//! The caller owns the rendering context: a context must be current on this
//! thread and the `gl` function pointers loaded (`gl::load_with`) before
//! anything here is called.

/// Building and linking of shader programs.
pub mod program;

/// Shader stages, descriptors and source loading.
pub mod shader;

/// Fixed camera and projection transforms.
pub mod transforms;

pub use program::{build_program, init_shaders, BuildReport, StageReport};
pub use shader::{load_source, ShaderDescriptor, ShaderStage};
