use glam::{Mat4, Vec3};

/// Vertical field of view of the fixed projection, in degrees.
const FOV_DEG: f32 = 57.;
const NEAR: f32 = 0.1;
const FAR: f32 = 500.;

/// View of a camera sitting at (0, 0, 50), looking at the origin, up +Y.
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(
        Vec3::new(0., 0., 50.),
        Vec3::new(0., 0., 0.),
        Vec3::new(0., 1., 0.),
    )
}

/// Perspective projection with a square aspect and a 0.1..500 depth range.
pub fn projection_matrix() -> Mat4 {
    Mat4::perspective_rh(FOV_DEG.to_radians(), 1., NEAR, FAR)
}

/// Uploads the fixed view and projection matrices to `program` under the
/// uniform names `viewMatrix` and `Matrix`.
///
/// Lookup is by name with no presence check: a shader lacking either uniform
/// yields location -1 and the upload is a silent no-op.
pub fn upload_camera(program: u32) {
    set_mat4(program, view_matrix(), "viewMatrix\0");
    set_mat4(program, projection_matrix(), "Matrix\0");
}

/// Sets a mat4 uniform by name. `name` must be a NUL-terminated ASCII string.
pub fn set_mat4(program: u32, mat: Mat4, name: &str) {
    assert!(name.is_ascii());
    assert!(name.ends_with('\0'));
    unsafe {
        let loc = gl::GetUniformLocation(program, name.as_ptr() as _);
        gl::UniformMatrix4fv(loc, 1, gl::FALSE, mat.to_cols_array().as_ptr() as _);
    }
}
