use crate::{
    refs::{ObjectReferences, RefType},
    RenderError,
};
use image::DynamicImage;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// A raster graphic (the first-page logo). Decoded once when the renderer
/// is configured; each render call re-encodes it into the document it is
/// building, so documents never share state.
#[derive(Clone)]
pub struct Image {
    image: DynamicImage,
    /// Natural width in pixels, used 1:1 as points when the graphic is placed
    pub width: f32,
    /// Natural height in pixels
    pub height: f32,
}

impl Image {
    /// Decode an image (PNG, JPEG, ...) from a file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image, RenderError> {
        let data = std::fs::read(path)?;
        Self::from_memory(&data)
    }

    /// Decode an image from bytes already in memory
    pub fn from_memory(data: &[u8]) -> Result<Image, RenderError> {
        Ok(Self::new(image::load_from_memory(data)?))
    }

    /// Wrap an already-decoded image
    pub fn new(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image,
            width,
            height,
        }
    }

    /// The natural aspect ratio (height over width)
    pub fn aspect(&self) -> f32 {
        self.height / self.width
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        use image::GenericImageView;

        let id = refs.gen(RefType::Image(image_index));
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = self.image.color().has_alpha().then(|| {
            let alphas: Vec<u8> = self.image.pixels().map(|p| (p.2).0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });
        let bytes = compress_to_vec_zlib(self.image.to_rgb8().as_raw(), level);

        let mut xobject = writer.image_xobject(id, bytes.as_slice());
        xobject.filter(Filter::FlateDecode);
        xobject.width(self.image.width() as i32);
        xobject.height(self.image.height() as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);

        let mask_id = mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            xobject.s_mask(mask_id);
        }
        xobject.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.image.width() as i32);
            s_mask.height(self.image.height() as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_dimensions_and_aspect() {
        let img = Image::new(DynamicImage::new_rgb8(360, 120));
        assert_eq!(img.width, 360.0);
        assert_eq!(img.height, 120.0);
        assert!((img.aspect() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn decodes_png_from_memory() {
        let mut data = Vec::new();
        DynamicImage::new_rgb8(4, 4)
            .write_to(
                &mut std::io::Cursor::new(&mut data),
                image::ImageOutputFormat::Png,
            )
            .unwrap();
        let img = Image::from_memory(&data).unwrap();
        assert_eq!(img.width, 4.0);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(Image::from_memory(b"not an image").is_err());
    }
}
