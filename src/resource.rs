use crate::types::{PixelFormatDescriptor, PlaneStrides, TextureHandle};

/// Zero-copy mapping of decoded video frames to GPU textures.
///
/// One implementation per platform backend, selected once at pipeline setup
/// (see [`crate::platform`]). All methods must run on the thread that owns
/// the active GPU rendering context; implementations perform no internal
/// synchronization, and a buffer passed to [`map`](InteropResource::map) is
/// borrowed only for the duration of that call.
pub trait InteropResource {
    /// The decoder-owned native pixel buffer type.
    type Buffer: ?Sized;
    type Error: core::error::Error;

    /// Allocate an empty GPU texture name.
    ///
    /// Performs no format-specific work: texture names are cheap and
    /// stream-lifetime, texture storage is frame-lifetime and re-bound on
    /// every [`map`](InteropResource::map) call.
    fn create_texture(&self) -> TextureHandle;

    /// Alias plane `plane` of `buffer` as `texture`'s image data, without a
    /// CPU copy or pixel-format conversion.
    ///
    /// A driver rejection of the aliasing call is a soft failure: it is
    /// logged, counted in
    /// [`mapping_failures`](InteropResource::mapping_failures) and still
    /// returns `Ok(())`, leaving the plane's texture contents undefined for
    /// this frame. An unresolvable format fails with an error before any GPU
    /// call is issued; the caller must use a copy-based upload for that
    /// frame.
    fn map(
        &self,
        buffer: &Self::Buffer,
        texture: TextureHandle,
        plane: usize,
    ) -> Result<(), Self::Error>;

    /// Whether frames may be specified directly as 2D texture images instead
    /// of going through [`map`](InteropResource::map). Zero-copy resources
    /// return `false`.
    fn supports_direct_texture_binding(&self) -> bool;

    /// Row strides and normalized descriptor for frames carrying the given
    /// native format tag, at the given logical width (must be positive).
    fn strides_for_width(
        &self,
        tag: u32,
        width: u32,
    ) -> Result<(PlaneStrides, PixelFormatDescriptor), Self::Error>;

    /// Number of soft map failures since construction.
    fn mapping_failures(&self) -> u64;
}
