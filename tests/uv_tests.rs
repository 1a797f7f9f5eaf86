use std::rc::Rc;

use plutonium_panels::transform::{skin_texture_matrix, transform_point, IDENTITY};
use plutonium_panels::{Panel, PanelError, Rect, Skin, Style};
use uuid::Uuid;

#[test]
fn slice_width_counts_the_spare_slot() {
    assert!((Skin::new(Uuid::new_v4(), 3).slice_width() - 0.25).abs() < 1e-6);
    assert!((Skin::new(Uuid::new_v4(), 0).slice_width() - 1.0).abs() < 1e-6);
}

#[test]
fn texture_matrix_selects_requested_slice() {
    let skin = Skin::new(Uuid::new_v4(), 3);
    let m = skin_texture_matrix(Some(&skin), 2);
    // translate 0.5, scale 0.25 along u
    assert!((m[3][0] - 0.5).abs() < 1e-6);
    assert!((m[0][0] - 0.25).abs() < 1e-6);
    assert!((m[1][1] - 1.0).abs() < 1e-6);

    let left = transform_point(&m, [0.0, 0.0, 0.0, 1.0]);
    let right = transform_point(&m, [1.0, 1.0, 0.0, 1.0]);
    assert!((left[0] - 0.5).abs() < 1e-6 && left[1].abs() < 1e-6);
    assert!((right[0] - 0.75).abs() < 1e-6 && (right[1] - 1.0).abs() < 1e-6);
}

#[test]
fn unskinned_panels_sample_the_whole_default_texture() {
    assert_eq!(skin_texture_matrix(None, 5), IDENTITY);
}

#[test]
fn skin_index_may_use_the_spare_slot_but_not_beyond() {
    let skin = Skin::new(Uuid::new_v4(), 3);
    assert!(skin.check_index(3).is_ok());
    assert!(matches!(
        skin.check_index(4),
        Err(PanelError::SkinIndexOutOfRange {
            index: 4,
            skin_count: 3
        })
    ));
}

#[test]
fn panel_rejects_out_of_atlas_skin_configuration() {
    let style = Rc::new(Style::default());
    let skin = Rc::new(Skin::new(Uuid::new_v4(), 1));

    let built = Panel::rect(Rect::default(), Rc::clone(&style)).with_skin(Rc::clone(&skin), 2);
    assert!(built.is_err());

    let mut panel = Panel::rect(Rect::default(), style)
        .with_skin(Rc::clone(&skin), 1)
        .unwrap();
    assert!(panel.set_render_skin(2).is_err());
    assert_eq!(panel.render_skin(), 1);

    let smaller = Rc::new(Skin::new(Uuid::new_v4(), 0));
    assert!(panel.set_skin(Some(smaller)).is_err());
    assert_eq!(panel.skin().map(|s| s.skin_count()), Some(1));

    panel.set_skin(None).unwrap();
    assert!(panel.set_render_skin(7).is_ok());
}
