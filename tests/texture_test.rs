use flow_orrery::{
    data_structures::texture::{cube_side, fit_to_limit, fit_within, square_face},
    resources::texture::{load_image, load_image_or, plain_image},
};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

const WEBGL2_MAX_SIDE: u32 = 2048;

fn assert_pixel_close(actual: &Rgba<u8>, expected: [u8; 4]) {
    for (a, e) in actual.0.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 1, "expected {expected:?}, got {actual:?}");
    }
}

fn filled(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

#[test]
fn sizes_within_the_limit_are_kept() {
    assert_eq!(fit_within(2048, 1024, WEBGL2_MAX_SIDE), (2048, 1024));
    assert_eq!(fit_within(1, 1, WEBGL2_MAX_SIDE), (1, 1));
}

#[test]
fn oversized_textures_shrink_keeping_their_aspect() {
    assert_eq!(fit_within(4096, 2, WEBGL2_MAX_SIDE), (2048, 1));
    assert_eq!(fit_within(8192, 4096, WEBGL2_MAX_SIDE), (2048, 1024));
    assert_eq!(fit_within(1000, 5000, WEBGL2_MAX_SIDE), (410, 2048));
    // very thin images keep at least one pixel
    assert_eq!(fit_within(100_000, 1, WEBGL2_MAX_SIDE), (2048, 1));
}

#[test]
fn fit_to_limit_resizes_the_pixels() {
    let wide = RgbaImage::from_pixel(4096, 2, Rgba([10, 20, 30, 255]));
    let fitted = fit_to_limit(wide, WEBGL2_MAX_SIDE);
    assert_eq!(fitted.dimensions(), (2048, 1));
    assert_pixel_close(fitted.get_pixel(0, 0), [10, 20, 30, 255]);

    let small = RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 4]));
    assert_eq!(fit_to_limit(small.clone(), WEBGL2_MAX_SIDE), small);
}

#[test]
fn cube_faces_share_the_smallest_side() {
    let faces = [
        filled(512, 512, [0; 4]),
        filled(256, 512, [0; 4]),
        filled(512, 512, [0; 4]),
        filled(512, 300, [0; 4]),
        filled(512, 512, [0; 4]),
        filled(512, 512, [0; 4]),
    ];
    assert_eq!(cube_side(&faces, WEBGL2_MAX_SIDE), 256);
}

#[test]
fn cube_side_respects_the_device_limit() {
    let faces: [DynamicImage; 6] = std::array::from_fn(|_| filled(4096, 4096, [0; 4]));
    assert_eq!(cube_side(&faces, WEBGL2_MAX_SIDE), WEBGL2_MAX_SIDE);
}

#[test]
fn a_plain_face_shrinks_the_whole_cube() {
    let mut faces: [DynamicImage; 6] = std::array::from_fn(|_| filled(64, 64, [0; 4]));
    faces[2] = plain_image([4, 4, 12, 255]);
    assert_eq!(cube_side(&faces, WEBGL2_MAX_SIDE), 1);
}

#[test]
fn faces_are_stretched_to_squares() {
    let face = filled(40, 20, [200, 100, 50, 255]);
    let square = square_face(&face, 16);
    assert_eq!(square.dimensions(), (16, 16));
    assert_pixel_close(square.get_pixel(8, 8), [200, 100, 50, 255]);

    let exact = filled(16, 16, [1, 2, 3, 255]);
    assert_eq!(square_face(&exact, 16), exact.to_rgba8());
}

#[test]
fn plain_image_is_one_pixel_of_the_colour() {
    let img = plain_image([190, 170, 130, 160]);
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0), Rgba([190, 170, 130, 160]));
}

#[tokio::test]
async fn loading_a_missing_file_fails() {
    assert!(load_image("missing.jpg").await.is_err());
}

#[tokio::test]
async fn a_missing_file_falls_back_to_its_colour() {
    let img = load_image_or("missing.jpg", [60, 110, 200, 255]).await;
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0), Rgba([60, 110, 200, 255]));
}
