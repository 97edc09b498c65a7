use std::cell::Cell;
use std::ffi::c_void;

use log::warn;
use objc2_core_video::{
    CVPixelBuffer, CVPixelBufferGetHeight, CVPixelBufferGetHeightOfPlane,
    CVPixelBufferGetPixelFormatType, CVPixelBufferGetPlaneCount, CVPixelBufferGetWidth,
    CVPixelBufferGetWidthOfPlane,
};

use crate::error::{Error, PlatformError};
use crate::format::{self, GL_TEXTURE_RECTANGLE};
use crate::platform::macos::gl;
use crate::resource::InteropResource;
use crate::types::{PixelFormatDescriptor, PlaneStrides, TextureHandle};

/// Zero-copy interop resource backed by `CGLTexImageIOSurface2D`.
///
/// Aliases the IOSurface behind a decoded `CVPixelBuffer` as a rectangle
/// texture's image data. Stateless across frames apart from a soft-failure
/// counter, which is confined to the rendering-context thread (hence `Cell`,
/// not an atomic — all calls must come from the thread owning the current
/// CGL context).
#[derive(Debug, Default)]
pub struct IoSurfaceInterop {
    failures: Cell<u64>,
}

impl IoSurfaceInterop {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_failure(&self, plane: usize, e: PlatformError) {
        warn!("error aliasing IOSurface as texture at plane {plane}: {e}");
        self.failures.set(self.failures.get() + 1);
    }
}

impl InteropResource for IoSurfaceInterop {
    type Buffer = CVPixelBuffer;
    type Error = Error;

    fn create_texture(&self) -> TextureHandle {
        let mut tex: gl::GLuint = 0;
        unsafe { gl::glGenTextures(1, &mut tex) };
        TextureHandle(tex)
    }

    fn map(
        &self,
        buffer: &CVPixelBuffer,
        texture: TextureHandle,
        plane: usize,
    ) -> Result<(), Error> {
        let tag = unsafe { CVPixelBufferGetPixelFormatType(buffer) };
        let descriptor = format::descriptor_for_tag(tag).ok_or(Error::UnsupportedFormat)?;
        if plane >= descriptor.plane_count() {
            return Err(Error::InvalidPlane);
        }

        // Chroma planes are subsampled, so the aliasing call takes the
        // plane's actual dimensions, not the logical frame dimensions.
        let plane_count = unsafe { CVPixelBufferGetPlaneCount(buffer) };
        let (plane_w, plane_h) = if plane_count == 0 {
            // Non-planar buffer: plane 0 spans the whole image.
            unsafe { (CVPixelBufferGetWidth(buffer), CVPixelBufferGetHeight(buffer)) }
        } else {
            unsafe {
                (
                    CVPixelBufferGetWidthOfPlane(buffer, plane),
                    CVPixelBufferGetHeightOfPlane(buffer, plane),
                )
            }
        };

        let params = format::gl_params_for(&descriptor);
        let params = format::alias_chroma_as_alpha(params, &descriptor);
        let params = format::promote_packed_422(params, plane, tag);
        let p = params[plane];

        unsafe { gl::glBindTexture(GL_TEXTURE_RECTANGLE, texture.0) };

        let surface = unsafe {
            gl::CVPixelBufferGetIOSurface(buffer as *const CVPixelBuffer as *const c_void)
        };
        if surface.is_null() {
            self.record_failure(
                plane,
                PlatformError::Message("pixel buffer has no backing IOSurface"),
            );
        } else {
            let err = unsafe {
                gl::CGLTexImageIOSurface2D(
                    gl::CGLGetCurrentContext(),
                    GL_TEXTURE_RECTANGLE,
                    p.internal_format,
                    plane_w as gl::GLsizei,
                    plane_h as gl::GLsizei,
                    p.transfer_format,
                    p.data_type,
                    surface,
                    plane as gl::GLuint,
                )
            };
            if err != gl::K_CGL_NO_ERROR {
                self.record_failure(plane, PlatformError::Cgl(err));
            }
        }

        // The rectangle target is never left bound, on success or failure.
        unsafe { gl::glBindTexture(GL_TEXTURE_RECTANGLE, 0) };
        Ok(())
    }

    fn supports_direct_texture_binding(&self) -> bool {
        false
    }

    fn strides_for_width(
        &self,
        tag: u32,
        width: u32,
    ) -> Result<(PlaneStrides, PixelFormatDescriptor), Error> {
        format::rgb422_strides_for_width(tag, width)
            .or_else(|| format::strides_for_width(tag, width))
            .ok_or(Error::UnsupportedFormat)
    }

    fn mapping_failures(&self) -> u64 {
        self.failures.get()
    }
}
