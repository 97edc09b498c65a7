#[cfg(target_os = "macos")]
pub mod macos;

/// Create the zero-copy interop resource for the current platform.
///
/// Backend selection happens here, once at pipeline setup; the returned
/// resource is driven through [`crate::resource::InteropResource`] for the
/// lifetime of the stream.
#[cfg(target_os = "macos")]
pub fn new_interop_resource() -> macos::IoSurfaceInterop {
    macos::IoSurfaceInterop::new()
}
