//! Pixel-format mapping: native CoreVideo format tags to normalized plane
//! layouts and per-plane GL storage parameters.
//!
//! Everything here is a pure function over immutable tables, so parameter
//! selection for a frame depends only on the native tag. Corrections that the
//! mapping pipeline applies on top of the generic tables
//! ([`alias_chroma_as_alpha`], [`promote_packed_422`]) return corrected
//! copies rather than mutating shared state.

use arrayvec::ArrayVec;

use crate::types::{
    FormatLayout, GlParams, PixelFormat, PixelFormatDescriptor, PlaneDescriptor, PlaneParams,
    PlaneStrides,
};

// kCVPixelFormatType values
#[allow(clippy::mistyped_literal_suffixes)]
pub mod fourcc {
    /// `'420v'` — NV12, video range.
    pub const NV12_VIDEO: u32 = 0x34_32_30_76;
    /// `'420f'` — NV12, full range.
    pub const NV12_FULL: u32 = 0x34_32_30_66;
    /// `'y420'` — planar 4:2:0.
    pub const YUV420P: u32 = 0x79_34_32_30;
    /// `'2vuy'` — packed 4:2:2, chroma leading.
    pub const UYVY: u32 = 0x32_76_75_79;
    /// `'yuvs'` — packed 4:2:2, luma leading.
    pub const YUYV: u32 = 0x79_75_76_73;
    /// `'BGRA'`.
    pub const BGRA: u32 = 0x42_47_52_41;
}

// GL enumerants used by the aliasing call. Defined here rather than pulled
// from a bindings crate so the mapper stays buildable and testable on hosts
// without an OpenGL SDK.
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
pub const GL_ALPHA: u32 = 0x1906;
pub const GL_RGBA: u32 = 0x1908;
pub const GL_LUMINANCE: u32 = 0x1909;
pub const GL_LUMINANCE_ALPHA: u32 = 0x190A;
pub const GL_RGB8: u32 = 0x8051;
pub const GL_RGBA8: u32 = 0x8058;
pub const GL_BGRA: u32 = 0x80E1;
pub const GL_UNSIGNED_INT_8_8_8_8_REV: u32 = 0x8367;
pub const GL_TEXTURE_RECTANGLE: u32 = 0x84F5;
// GL_APPLE_rgb_422: raw 4:2:2 texels sampled without implicit conversion.
pub const GL_UNSIGNED_SHORT_8_8_APPLE: u32 = 0x85BA;
pub const GL_UNSIGNED_SHORT_8_8_REV_APPLE: u32 = 0x85BB;
pub const GL_RGB_422_APPLE: u32 = 0x8A1F;

/// Resolve a native format tag to a normalized descriptor.
///
/// Returns `None` for tags the zero-copy path does not understand; the
/// caller must then fall back to a copy-based upload.
pub fn descriptor_for_tag(tag: u32) -> Option<PixelFormatDescriptor> {
    const FULL: PlaneDescriptor = PlaneDescriptor {
        bytes_per_pixel: 1,
        width_divisor: 1,
    };
    const CHROMA_PAIR: PlaneDescriptor = PlaneDescriptor {
        bytes_per_pixel: 2,
        width_divisor: 2,
    };
    const CHROMA: PlaneDescriptor = PlaneDescriptor {
        bytes_per_pixel: 1,
        width_divisor: 2,
    };
    const PACKED_422: PlaneDescriptor = PlaneDescriptor {
        bytes_per_pixel: 2,
        width_divisor: 1,
    };
    const PACKED_RGB: PlaneDescriptor = PlaneDescriptor {
        bytes_per_pixel: 4,
        width_divisor: 1,
    };

    let descriptor = match tag {
        fourcc::NV12_VIDEO | fourcc::NV12_FULL => PixelFormatDescriptor::new(
            PixelFormat::Nv12,
            FormatLayout::SemiPlanar,
            &[FULL, CHROMA_PAIR],
        ),
        fourcc::YUV420P => PixelFormatDescriptor::new(
            PixelFormat::Yuv420p,
            FormatLayout::Planar,
            &[FULL, CHROMA, CHROMA],
        ),
        fourcc::UYVY => PixelFormatDescriptor::new(
            PixelFormat::Uyvy,
            FormatLayout::Packed422,
            &[PACKED_422],
        ),
        fourcc::YUYV => PixelFormatDescriptor::new(
            PixelFormat::Yuyv,
            FormatLayout::Packed422,
            &[PACKED_422],
        ),
        fourcc::BGRA => PixelFormatDescriptor::new(
            PixelFormat::Bgra32,
            FormatLayout::PackedRgb,
            &[PACKED_RGB],
        ),
        _ => return None,
    };
    Some(descriptor)
}

/// Generic per-plane row strides for a frame of the given logical width.
///
/// Stride of plane `p` is the subsampled plane width times the plane's bytes
/// per pixel. Width must be positive.
pub fn strides_for_width(tag: u32, width: u32) -> Option<(PlaneStrides, PixelFormatDescriptor)> {
    let descriptor = descriptor_for_tag(tag)?;
    let strides = descriptor
        .planes()
        .iter()
        .map(|p| (width / p.width_divisor) as usize * p.bytes_per_pixel)
        .collect();
    Some((strides, descriptor))
}

/// Packed 4:2:2 stride override for the rectangle-texture sampling path.
///
/// The two packed 4:2:2 tags are sampled by the GPU as a single rectangular
/// packed texture, so they are declared as one 4-byte-per-pixel plane and the
/// row stride is `4 * width` regardless of the generic 2-byte computation.
/// Returns `None` for every other tag; callers fall through to
/// [`strides_for_width`].
pub fn rgb422_strides_for_width(
    tag: u32,
    width: u32,
) -> Option<(PlaneStrides, PixelFormatDescriptor)> {
    match tag {
        fourcc::UYVY | fourcc::YUYV => {
            let descriptor = PixelFormatDescriptor::new(
                PixelFormat::Vyu,
                FormatLayout::PackedRgb,
                &[PlaneDescriptor {
                    bytes_per_pixel: 4,
                    width_divisor: 1,
                }],
            );
            let mut strides = PlaneStrides::new();
            strides.push(4 * width as usize);
            Some((strides, descriptor))
        }
        _ => None,
    }
}

/// Per-plane GL parameter triples for a resolved format.
///
/// These are the generic, uncorrected parameters; the mapping pipeline
/// applies [`alias_chroma_as_alpha`] and [`promote_packed_422`] on top.
pub fn gl_params_for(descriptor: &PixelFormatDescriptor) -> PlaneParams {
    const fn plane(internal: u32, transfer: u32, dtype: u32) -> GlParams {
        GlParams {
            internal_format: internal,
            transfer_format: transfer,
            data_type: dtype,
        }
    }

    let mut params = ArrayVec::new();
    match descriptor.pixel_format {
        PixelFormat::Nv12 => {
            params.push(plane(GL_LUMINANCE, GL_LUMINANCE, GL_UNSIGNED_BYTE));
            params.push(plane(
                GL_LUMINANCE_ALPHA,
                GL_LUMINANCE_ALPHA,
                GL_UNSIGNED_BYTE,
            ));
        }
        PixelFormat::Yuv420p => {
            for _ in 0..descriptor.plane_count() {
                params.push(plane(GL_LUMINANCE, GL_LUMINANCE, GL_UNSIGNED_BYTE));
            }
        }
        // Unsized RGBA is a placeholder: promote_packed_422 replaces it with
        // the 4:2:2-specific triple before the aliasing call.
        PixelFormat::Uyvy | PixelFormat::Yuyv | PixelFormat::Vyu => {
            params.push(plane(GL_RGBA, GL_RGBA, GL_UNSIGNED_BYTE));
        }
        PixelFormat::Bgra32 => {
            params.push(plane(GL_RGBA8, GL_BGRA, GL_UNSIGNED_INT_8_8_8_8_REV));
        }
    }
    params
}

/// Rewrite 1-byte luminance chroma planes beyond plane 1 to alpha-channel
/// storage.
///
/// The renderer uses one fragment shader for planar and semi-planar layouts
/// and always samples the trailing planes through the alpha channel; planar
/// formats with 1-byte chroma samples must therefore declare those planes as
/// `GL_ALPHA` rather than `GL_LUMINANCE`. Luma (plane 0) is never rewritten.
pub fn alias_chroma_as_alpha(
    params: PlaneParams,
    descriptor: &PixelFormatDescriptor,
) -> PlaneParams {
    let mut params = params;
    if params.len() > 2
        && params[2].transfer_format == GL_LUMINANCE
        && descriptor.bytes_per_pixel(1) == 1
    {
        for p in &mut params[2..] {
            p.internal_format = GL_ALPHA;
            p.transfer_format = GL_ALPHA;
        }
    }
    params
}

/// Replace the generic packed-RGBA placeholder for `plane` with the packed
/// 4:2:2 triple the driver expects.
///
/// The byte layout is already compatible; only the declared enumerants
/// change so the sampler interprets the channels correctly. The data type
/// selects the byte order: `REV` for the chroma-leading tag (`'2vuy'`),
/// non-`REV` for the luma-leading tag (`'yuvs'`), per GL_APPLE_rgb_422.
pub fn promote_packed_422(params: PlaneParams, plane: usize, tag: u32) -> PlaneParams {
    let mut params = params;
    if let Some(p) = params.get_mut(plane) {
        if p.internal_format == GL_RGBA {
            p.internal_format = GL_RGB8;
            p.transfer_format = GL_RGB_422_APPLE;
            p.data_type = if tag == fourcc::UYVY {
                GL_UNSIGNED_SHORT_8_8_REV_APPLE
            } else {
                GL_UNSIGNED_SHORT_8_8_APPLE
            };
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TAGS: [u32; 6] = [
        fourcc::NV12_VIDEO,
        fourcc::NV12_FULL,
        fourcc::YUV420P,
        fourcc::UYVY,
        fourcc::YUYV,
        fourcc::BGRA,
    ];

    /// Bytes per pixel implied by a (transfer format, data type) pair.
    fn transfer_width(p: &GlParams) -> usize {
        match (p.transfer_format, p.data_type) {
            (GL_LUMINANCE | GL_ALPHA, GL_UNSIGNED_BYTE) => 1,
            (GL_LUMINANCE_ALPHA, GL_UNSIGNED_BYTE) => 2,
            (GL_RGB_422_APPLE, _) => 2,
            (GL_RGBA, GL_UNSIGNED_BYTE) => 4,
            (GL_BGRA, GL_UNSIGNED_INT_8_8_8_8_REV) => 4,
            other => panic!("unexpected transfer pair: {other:?}"),
        }
    }

    #[test]
    fn descriptor_and_params_agree_for_all_tags() {
        for tag in ALL_TAGS {
            let descriptor = descriptor_for_tag(tag).unwrap();
            let params = gl_params_for(&descriptor);
            assert_eq!(params.len(), descriptor.plane_count(), "tag {tag:#x}");
            // The packed 4:2:2 placeholder is 4-wide until promotion; compare
            // against the promoted triple like the mapping pipeline does.
            let promoted = promote_packed_422(params, 0, tag);
            for (plane, p) in promoted.iter().enumerate() {
                assert_eq!(
                    transfer_width(p),
                    descriptor.bytes_per_pixel(plane),
                    "tag {tag:#x} plane {plane}"
                );
            }
        }
    }

    #[test]
    fn layouts_match_plane_counts() {
        use crate::types::FormatLayout;
        for tag in ALL_TAGS {
            let descriptor = descriptor_for_tag(tag).unwrap();
            let expected = match descriptor.layout {
                FormatLayout::Planar => 3,
                FormatLayout::SemiPlanar => 2,
                FormatLayout::Packed422 | FormatLayout::PackedRgb => 1,
            };
            assert_eq!(descriptor.plane_count(), expected, "tag {tag:#x}");
        }
    }

    #[test]
    fn generic_strides_follow_subsampling() {
        let (strides, descriptor) = strides_for_width(fourcc::YUV420P, 640).unwrap();
        assert_eq!(descriptor.pixel_format, PixelFormat::Yuv420p);
        assert_eq!(strides.as_slice(), &[640, 320, 320]);

        let (strides, _) = strides_for_width(fourcc::NV12_VIDEO, 640).unwrap();
        assert_eq!(strides.as_slice(), &[640, 640]);
    }

    #[test]
    fn packed_422_stride_is_four_times_width() {
        for tag in [fourcc::UYVY, fourcc::YUYV] {
            for width in [2, 640, 1920, 1921] {
                let (strides, descriptor) = rgb422_strides_for_width(tag, width).unwrap();
                assert_eq!(descriptor.plane_count(), 1);
                assert_eq!(descriptor.bytes_per_pixel(0), 4);
                assert_eq!(strides.as_slice(), &[4 * width as usize]);
            }
        }
        // Only the two packed tags take the override.
        assert!(rgb422_strides_for_width(fourcc::NV12_VIDEO, 640).is_none());
        assert!(rgb422_strides_for_width(fourcc::BGRA, 640).is_none());
    }

    #[test]
    fn chroma_leading_tag_selects_rev_variant() {
        let (strides, descriptor) = rgb422_strides_for_width(fourcc::UYVY, 640).unwrap();
        assert_eq!(strides[0], 2560);
        assert_eq!(descriptor.pixel_format, PixelFormat::Vyu);

        let generic = descriptor_for_tag(fourcc::UYVY).unwrap();
        let params = promote_packed_422(gl_params_for(&generic), 0, fourcc::UYVY);
        assert_eq!(
            params[0],
            GlParams {
                internal_format: GL_RGB8,
                transfer_format: GL_RGB_422_APPLE,
                data_type: GL_UNSIGNED_SHORT_8_8_REV_APPLE,
            }
        );

        let generic = descriptor_for_tag(fourcc::YUYV).unwrap();
        let params = promote_packed_422(gl_params_for(&generic), 0, fourcc::YUYV);
        assert_eq!(params[0].data_type, GL_UNSIGNED_SHORT_8_8_APPLE);
    }

    #[test]
    fn promotion_leaves_sized_formats_alone() {
        let descriptor = descriptor_for_tag(fourcc::BGRA).unwrap();
        let params = gl_params_for(&descriptor);
        let promoted = promote_packed_422(params.clone(), 0, fourcc::BGRA);
        assert_eq!(promoted, params);
    }

    #[test]
    fn planar_chroma_planes_alias_to_alpha() {
        let descriptor = descriptor_for_tag(fourcc::YUV420P).unwrap();
        let corrected = alias_chroma_as_alpha(gl_params_for(&descriptor), &descriptor);
        assert_eq!(corrected[0].transfer_format, GL_LUMINANCE);
        assert_eq!(corrected[1].transfer_format, GL_LUMINANCE);
        assert_eq!(corrected[2].transfer_format, GL_ALPHA);
        assert_eq!(corrected[2].internal_format, GL_ALPHA);
    }

    #[test]
    fn semi_planar_chroma_is_never_aliased() {
        let descriptor = descriptor_for_tag(fourcc::NV12_FULL).unwrap();
        let params = gl_params_for(&descriptor);
        let corrected = alias_chroma_as_alpha(params.clone(), &descriptor);
        assert_eq!(corrected, params);
        assert_eq!(corrected[1].transfer_format, GL_LUMINANCE_ALPHA);
    }

    #[test]
    fn parameter_selection_is_deterministic() {
        for tag in ALL_TAGS {
            let a = descriptor_for_tag(tag).unwrap();
            let b = descriptor_for_tag(tag).unwrap();
            assert_eq!(a, b);
            let pa = alias_chroma_as_alpha(gl_params_for(&a), &a);
            let pb = alias_chroma_as_alpha(gl_params_for(&b), &b);
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn unknown_tag_resolves_to_nothing() {
        let jpeg = 0x6A_70_65_67; // 'jpeg'
        assert!(descriptor_for_tag(jpeg).is_none());
        assert!(strides_for_width(jpeg, 640).is_none());
        assert!(rgb422_strides_for_width(jpeg, 640).is_none());
    }
}
