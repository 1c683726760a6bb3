use crate::refs::{ObjectReferences, RefType};
use crate::{Error, Pt};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

enum RasterData {
    /// Baseline RGB JPEG bytes that PDF viewers can decode as-is
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image (checkmark, signature scan, stamp) ready to be placed on pages.
///
/// Images are stored once per [crate::Document] and may be drawn any number of
/// times. Sizes are in pixels; the compositor treats one pixel as one point.
pub struct Image {
    data: RasterData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Read and decode an image file. Any failure to find, read or decode the file
    /// is reported as [Error::MissingResource].
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::missing(path, "no such file"));
        }
        let data = std::fs::read(path).map_err(|e| Error::missing(path, e))?;
        Self::new_from_bytes(data).map_err(|e| Error::missing(path, e))
    }

    /// Decode an image held in memory, guessing its format from its contents
    pub fn new_from_bytes(data: Vec<u8>) -> Result<Image, Error> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = image.dimensions();

        let data = match (format, image.color()) {
            // we can embed it directly!
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::Jpeg(data),
            _ => RasterData::Decoded(image),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    /// Wrap an already decoded image
    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            data: RasterData::Decoded(image),
            width,
            height,
        }
    }

    /// Native size of the image, one point per pixel
    pub fn native_size(&self) -> (Pt, Pt) {
        (Pt(self.width as f32), Pt(self.height as f32))
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn missing_files_are_missing_resources() {
        let err = Image::new_from_disk("definitely/not/here.png").err().expect("fails");
        assert!(matches!(err, Error::MissingResource { .. }));
    }

    #[test]
    fn undecodable_files_are_missing_resources() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image at all").expect("write");
        let err = Image::new_from_disk(&path).err().expect("fails");
        assert!(matches!(err, Error::MissingResource { .. }));
    }

    #[test]
    fn decodes_png_with_alpha() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("check.png");
        RgbaImage::from_pixel(4, 3, Rgba([0, 128, 0, 200]))
            .save(&path)
            .expect("save png");

        let image = Image::new_from_disk(&path).expect("decodes");
        assert_eq!(image.native_size(), (Pt(4.0), Pt(3.0)));
        let encoded = image.encode();
        assert!(encoded.mask.is_some());
    }
}
