//! Minimal OpenGL, CGL and CoreVideo FFI for the IOSurface aliasing path.
//!
//! Only the handful of entry points the mapping call needs; GL enumerant
//! values live in [`crate::format`] so the mapper stays portable.

use std::ffi::{CStr, c_char, c_void};

pub type GLenum = u32;
pub type GLuint = u32;
pub type GLsizei = i32;
pub type CGLContextObj = *mut c_void;
pub type CGLError = i32;
pub type IOSurfaceRef = *mut c_void;

pub const K_CGL_NO_ERROR: CGLError = 0;

#[link(name = "OpenGL", kind = "framework")]
unsafe extern "C" {
    pub fn glGenTextures(n: GLsizei, textures: *mut GLuint);
    pub fn glBindTexture(target: GLenum, texture: GLuint);
    pub fn CGLGetCurrentContext() -> CGLContextObj;
    pub fn CGLTexImageIOSurface2D(
        ctx: CGLContextObj,
        target: GLenum,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        data_type: GLenum,
        io_surface: IOSurfaceRef,
        plane: GLuint,
    ) -> CGLError;
    pub fn CGLErrorString(error: CGLError) -> *const c_char;
}

#[link(name = "CoreVideo", kind = "framework")]
unsafe extern "C" {
    pub fn CVPixelBufferGetIOSurface(buffer: *const c_void) -> IOSurfaceRef;
}

/// Human-readable text for a CGL error code.
pub fn cgl_error_string(code: CGLError) -> &'static str {
    let ptr = unsafe { CGLErrorString(code) };
    if ptr.is_null() {
        return "unknown CGL error";
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("unknown CGL error")
}
