use arrayvec::ArrayVec;

/// Maximum number of planes in any supported pixel format.
pub const MAX_PLANES: usize = 4;

/// Per-plane row strides (bytes) for one frame.
pub type PlaneStrides = ArrayVec<usize, MAX_PLANES>;

/// Video pixel formats reachable through the zero-copy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Semi-planar 4:2:0: one luma plane plus one interleaved CbCr plane.
    Nv12,
    /// Fully planar 4:2:0: separate Y, Cb and Cr planes, 1 byte per sample.
    Yuv420p,
    /// Packed 4:2:2, luma leading (Y0 Cb Y1 Cr).
    Yuyv,
    /// Packed 4:2:2, chroma leading (Cb Y0 Cr Y1).
    Uyvy,
    /// Packed 4:2:2 reinterpreted as a single 4-byte-per-pixel RGB plane,
    /// the layout the rectangle-texture sampling path declares to the GPU.
    Vyu,
    Bgra32,
}

/// Broad layout class of a pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FormatLayout {
    Planar,
    SemiPlanar,
    Packed422,
    PackedRgb,
}

/// One plane of a normalized format description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneDescriptor {
    pub bytes_per_pixel: usize,
    /// Horizontal divisor relative to the logical frame width: 2 for
    /// subsampled chroma planes, 1 otherwise.
    pub width_divisor: u32,
}

/// Normalized description of a video pixel format, derived deterministically
/// from a native format tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelFormatDescriptor {
    pub pixel_format: PixelFormat,
    pub layout: FormatLayout,
    planes: ArrayVec<PlaneDescriptor, MAX_PLANES>,
}

impl PixelFormatDescriptor {
    pub(crate) fn new(
        pixel_format: PixelFormat,
        layout: FormatLayout,
        planes: &[PlaneDescriptor],
    ) -> Self {
        PixelFormatDescriptor {
            pixel_format,
            layout,
            planes: planes.iter().copied().collect(),
        }
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// The per-plane layout entries, in plane order.
    pub fn planes(&self) -> &[PlaneDescriptor] {
        &self.planes
    }

    /// Bytes per pixel of the given plane, or 0 if the plane does not exist.
    pub fn bytes_per_pixel(&self, plane: usize) -> usize {
        self.planes.get(plane).map_or(0, |p| p.bytes_per_pixel)
    }
}

/// Per-plane GL storage parameters consumed by the texture aliasing call:
/// internal format, pixel transfer format and data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlParams {
    pub internal_format: u32,
    pub transfer_format: u32,
    pub data_type: u32,
}

/// GL parameter triples for every plane of a frame, in plane order.
pub type PlaneParams = ArrayVec<GlParams, MAX_PLANES>;

/// A GPU texture object name.
///
/// Created by the interop resource, owned by the caller: the renderer must
/// release it when the stream's dimensions or plane count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);
