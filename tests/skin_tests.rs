use image::{Rgba, RgbaImage};
use plutonium_panels::skin::load_skin_image;
use plutonium_panels::PanelError;

#[test]
fn png_atlas_loads_as_rgba8() {
    let atlas = RgbaImage::from_fn(6, 2, |x, _| Rgba([x as u8 * 40, 10, 200, 255 - x as u8]));
    let path = std::env::temp_dir().join(format!("skin-{}.png", uuid::Uuid::new_v4()));
    atlas.save(&path).unwrap();

    let loaded = load_skin_image(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, atlas);
}

#[test]
fn missing_atlas_file_is_an_image_error() {
    let path = std::env::temp_dir().join(format!("skin-{}.png", uuid::Uuid::new_v4()));
    assert!(matches!(load_skin_image(&path), Err(PanelError::Image(_))));
}

#[cfg(feature = "svg")]
mod svg {
    use plutonium_panels::skin::{load_skin_svg, rasterize_svg};
    use plutonium_panels::PanelError;

    const HALF_RED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
  <rect x="0" y="0" width="4" height="2" fill="#ff0000" fill-opacity="0.5"/>
</svg>"##;

    #[test]
    fn rasterized_svg_has_straight_alpha() {
        let image = rasterize_svg(HALF_RED, 2.0).unwrap();
        assert_eq!(image.dimensions(), (8, 4));

        let [r, g, b, a] = image.get_pixel(4, 2).0;
        // premultiplied output would leave red near 128
        assert!(r >= 250, "red channel {r}");
        assert_eq!((g, b), (0, 0));
        assert!((126..=129).contains(&a), "alpha {a}");
    }

    #[test]
    fn malformed_svg_is_reported() {
        assert!(matches!(
            rasterize_svg("<svg", 1.0),
            Err(PanelError::Svg(_))
        ));
    }

    #[test]
    fn svg_file_loads_through_rasterizer() {
        let path = std::env::temp_dir().join(format!("skin-{}.svg", uuid::Uuid::new_v4()));
        std::fs::write(&path, HALF_RED).unwrap();
        let image = load_skin_svg(&path, 1.0).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(image.dimensions(), (4, 2));

        assert!(matches!(
            load_skin_svg(&path, 1.0),
            Err(PanelError::Io(_))
        ));
    }
}
