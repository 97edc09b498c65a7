pub mod gl;
pub mod interop;

pub use interop::IoSurfaceInterop;
