//! Asset delivery: what the globe fetches after mounting and what it does
//! with each result.

use image::RgbaImage;

use super::GlobeEngine;
use crate::data::{AssetKind, AssetLocation};
use crate::error::GlobeError;
use crate::gpu::texture::{decode_image, fit_within};
use crate::options::Options;

/// The fetches a freshly mounted globe needs, point data first. Entries
/// with an empty location are left out; an empty point data source is
/// already recorded as a failed load by the scene.
#[must_use]
pub fn asset_requests(options: &Options) -> Vec<(AssetKind, AssetLocation)> {
    [
        (AssetKind::Points, options.data.url.as_str()),
        (AssetKind::GlobeImage, options.globe.image_url.as_str()),
        (AssetKind::BumpImage, options.globe.bump_image_url.as_str()),
    ]
    .into_iter()
    .filter_map(|(kind, raw)| {
        AssetLocation::resolve(raw).map(|location| (kind, location))
    })
    .collect()
}

/// Decode image bytes and shrink them to fit the device.
///
/// # Errors
///
/// Returns [`GlobeError::Texture`] if the bytes are not a PNG or JPEG.
pub fn prepare_texture(
    bytes: &[u8],
    max_dimension: u32,
) -> Result<RgbaImage, GlobeError> {
    Ok(fit_within(decode_image(bytes)?, max_dimension))
}

impl GlobeEngine {
    /// Hand a finished fetch to the globe.
    ///
    /// Point data rebuilds the hex layer (or marks the load failed).
    /// Images replace the placeholder textures; a failed image keeps the
    /// placeholder. Results arriving after [`dispose`](Self::dispose) are
    /// dropped.
    pub fn supply_asset(
        &mut self,
        kind: AssetKind,
        result: Result<Vec<u8>, GlobeError>,
    ) {
        if self.is_disposed() {
            log::debug!("{kind} arrived after teardown, dropping");
            return;
        }
        match (kind, result) {
            (AssetKind::Points, Ok(bytes)) => {
                self.scene.load_points_csv(&bytes);
            }
            (AssetKind::Points, Err(e)) => self.scene.fail_points(&e),
            (_, Err(e)) => {
                log::warn!("{kind} unavailable, keeping placeholder: {e}");
            }
            (AssetKind::GlobeImage | AssetKind::BumpImage, Ok(bytes)) => {
                self.apply_texture(kind, &bytes);
            }
        }
    }

    fn apply_texture(&mut self, kind: AssetKind, bytes: &[u8]) {
        let bump_scale = self.scene.options().globe.bump_scale;
        let Some(gpu) = self.gpu.get_mut() else {
            return;
        };
        let image =
            match prepare_texture(bytes, gpu.context.max_texture_dimension()) {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("{kind} unusable, keeping placeholder: {e}");
                    return;
                }
            };
        log::info!("{kind} ready ({}x{})", image.width(), image.height());
        if kind == AssetKind::BumpImage {
            gpu.globe.set_bump_map(&gpu.context, &image, bump_scale);
        } else {
            gpu.globe.set_color_map(&gpu.context, &image);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    #[test]
    fn default_requests_cover_all_assets() {
        let requests = asset_requests(&Options::default());
        let kinds: Vec<_> = requests.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            [AssetKind::Points, AssetKind::GlobeImage, AssetKind::BumpImage]
        );
        assert_eq!(requests[0].1, AssetLocation::Local("pop.csv".into()));
        assert!(requests[1].1.as_str().starts_with("https://unpkg.com/"));
    }

    #[test]
    fn empty_locations_are_skipped() {
        let mut options = Options::default();
        options.globe.bump_image_url.clear();
        let requests = asset_requests(&options);
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|(k, _)| *k != AssetKind::BumpImage));
    }

    #[test]
    fn textures_are_fitted_to_the_device() {
        let src = RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let image = prepare_texture(&bytes, 16).unwrap();
        assert_eq!(image.dimensions(), (16, 8));
    }

    #[test]
    fn undecodable_texture_is_an_error() {
        assert!(matches!(
            prepare_texture(b"<html>404</html>", 2048),
            Err(GlobeError::Texture(_))
        ));
    }
}
