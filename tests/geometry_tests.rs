use std::rc::Rc;

use plutonium_panels::{Panel, PanelType, Position, Rect, Style, StyleConfig};

fn style(border_width: f32, hover: f32, click: f32) -> Rc<Style> {
    Rc::new(
        Style::from_config(&StyleConfig {
            border_width,
            button_hover_width: hover,
            button_click_width: click,
            ..StyleConfig::default()
        })
        .unwrap(),
    )
}

#[test]
fn expanded_grows_and_shrinks_every_side() {
    let r = Rect::new(10.0, 20.0, 40.0, 30.0);
    assert_eq!(r.expanded(2.0), Rect::new(8.0, 22.0, 42.0, 28.0));
    assert_eq!(r.expanded(-1.0), Rect::new(11.0, 19.0, 39.0, 31.0));
    assert!((r.width() - 10.0).abs() < 1e-6);
    assert!((r.height() - 10.0).abs() < 1e-6);
}

#[test]
fn from_xywh_is_y_up() {
    let r = Rect::from_xywh(5.0, 10.0, 20.0, 30.0);
    assert_eq!(r, Rect::new(5.0, 25.0, 40.0, 10.0));
}

#[test]
fn contains_includes_edges() {
    let r = Rect::new(0.0, 10.0, 10.0, 0.0);
    assert!(r.contains(Position { x: 0.0, y: 0.0 }));
    assert!(r.contains(Position { x: 10.0, y: 10.0 }));
    assert!(!r.contains(Position { x: 10.1, y: 5.0 }));
    assert!(!r.contains(Position { x: 5.0, y: -0.1 }));
}

#[test]
fn rect_panel_insets_fill_by_border_width() {
    let panel = Panel::rect(Rect::new(0.0, 100.0, 100.0, 0.0), style(5.0, 2.0, 3.0));
    let rects = panel.draw_rects();
    assert_eq!(rects.fill, Rect::new(5.0, 95.0, 95.0, 5.0));
    assert_eq!(rects.border, Rect::new(0.0, 100.0, 100.0, 0.0));
}

#[test]
fn rect_panel_ignores_interaction_state() {
    let mut panel = Panel::rect(Rect::new(0.0, 100.0, 100.0, 0.0), style(5.0, 2.0, 3.0));
    panel.mouse_over = true;
    panel.mouse_click = true;
    assert_eq!(panel.draw_rects().border, panel.bounding_box);
}

#[test]
fn idle_button_draws_at_bounding_box() {
    let panel = Panel::button(Rect::new(0.0, 100.0, 50.0, 0.0), style(4.0, 2.0, 3.0));
    let rects = panel.draw_rects();
    assert_eq!(rects.border, panel.bounding_box);
    assert_eq!(rects.fill, Rect::new(4.0, 96.0, 46.0, 4.0));
}

#[test]
fn hovered_button_grows_by_hover_width() {
    let mut panel = Panel::button(Rect::new(0.0, 100.0, 50.0, 0.0), style(4.0, 2.0, 3.0));
    panel.mouse_over = true;
    let rects = panel.draw_rects();
    assert_eq!(rects.border, Rect::new(-2.0, 102.0, 52.0, -2.0));
    assert_eq!(rects.fill, Rect::new(2.0, 98.0, 48.0, 2.0));
}

#[test]
fn clicked_button_adds_click_width_on_top_of_hover() {
    let mut panel = Panel::button(Rect::new(0.0, 100.0, 50.0, 0.0), style(4.0, 2.0, 3.0));
    panel.mouse_over = true;
    panel.mouse_click = true;
    let rects = panel.draw_rects();
    assert_eq!(rects.border, Rect::new(-5.0, 105.0, 55.0, -5.0));
    assert_eq!(rects.fill, Rect::new(-1.0, 101.0, 51.0, -1.0));
}

#[test]
fn panel_type_dispatch_matches_constructors() {
    let s = style(1.0, 1.0, 1.0);
    assert_eq!(Panel::rect(Rect::default(), Rc::clone(&s)).panel_type, PanelType::Rect);
    assert_eq!(Panel::button(Rect::default(), s).panel_type, PanelType::Button);
}
