use plutonium_panels::transform::{
    gui_model_matrix, identity, multiply, rect_projection, scale, screen_projection,
    transform_point, translation,
};
use plutonium_panels::{Rect, Size};

fn assert_close(a: [f32; 4], b: [f32; 4]) {
    for i in 0..4 {
        assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
    }
}

#[test]
fn multiply_applies_right_operand_first() {
    let m = multiply(&translation(10.0, 0.0, 0.0), &scale(2.0, 2.0, 1.0));
    assert_close(transform_point(&m, [1.0, 1.0, 0.0, 1.0]), [12.0, 2.0, 0.0, 1.0]);
    let i = multiply(&identity(), &m);
    assert_eq!(i, m);
}

#[test]
fn screen_projection_maps_viewport_to_clip_space() {
    let p = screen_projection(Size {
        width: 200.0,
        height: 100.0,
    });
    assert_close(transform_point(&p, [0.0, 0.0, 0.3, 1.0]), [-1.0, -1.0, 0.3, 1.0]);
    assert_close(transform_point(&p, [200.0, 100.0, 0.0, 1.0]), [1.0, 1.0, 0.0, 1.0]);
    assert_close(transform_point(&p, [100.0, 50.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn rect_projection_places_unit_quad_over_rect() {
    let rect = Rect::new(10.0, 50.0, 40.0, 20.0);
    let m = rect_projection(&identity(), rect);
    assert_close(transform_point(&m, [0.0, 0.0, 0.0, 1.0]), [10.0, 20.0, 0.0, 1.0]);
    assert_close(transform_point(&m, [1.0, 1.0, 0.0, 1.0]), [50.0, 40.0, 0.0, 1.0]);
    assert_close(transform_point(&m, [0.0, 1.0, 0.0, 1.0]), [10.0, 40.0, 0.0, 1.0]);
}

#[test]
fn gui_model_matrix_only_moves_depth() {
    let m = gui_model_matrix(0.25);
    assert_close(transform_point(&m, [1.0, 1.0, 0.0, 1.0]), [1.0, 1.0, 0.25, 1.0]);
}
