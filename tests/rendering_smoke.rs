use qrstudio::rendering::{raster, Surface};
use qrstudio::QrConfig;

#[test]
fn smoke_render_at_default_size() {
    let mut surface = Surface::new();
    surface.apply(&QrConfig::default()).unwrap();
    let frame = surface.handle().snapshot().unwrap();
    let img = raster::rasterize(&frame);
    assert_eq!(img.dimensions(), (256, 256));
}

#[test]
fn smoke_render_at_range_bounds() {
    for size in [128u32, 512] {
        let mut config = QrConfig::default();
        config.set_content("bounds");
        config.set_size(size);

        let mut surface = Surface::new();
        surface.apply(&config).unwrap();
        let frame = surface.handle().snapshot().unwrap();
        let img = raster::rasterize(&frame);
        assert_eq!(img.dimensions(), (size, size));
    }
}

#[test]
fn smoke_empty_content_renders_placeholder_symbol() {
    let mut surface = Surface::new();
    surface.apply(&QrConfig::default()).unwrap();
    let frame = surface.handle().snapshot().unwrap();

    // The placeholder symbol has dark modules like any other.
    let grid = frame.grid_dimension();
    let mut dark = 0;
    for y in 0..grid {
        for x in 0..grid {
            if frame.module_at(x, y) {
                dark += 1;
            }
        }
    }
    assert!(dark > 0);
}
