use std::rc::Rc;

use crate::input::PointerInput;
use crate::panel::Panel;
use crate::style::{MouseBehavior, PanelCallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    #[default]
    None,
    Rising,
    Falling,
}

impl Edge {
    fn between(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::None,
        }
    }
}

/// Flag changes observed for one panel during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transitions {
    pub hover: Edge,
    pub click: Edge,
}

/// Looks the callback up on the panel's style as it is right now, so a
/// callback that swaps the style is honored by the ones after it.
fn fire(panel: &mut Panel, pick: fn(&MouseBehavior) -> Option<&PanelCallback>) {
    let style = Rc::clone(&panel.style);
    if let Some(callback) = pick(&style.mouse_bhv) {
        callback(panel);
    }
}

/// Advances one panel's hover/click state by a frame and runs its behaviors.
///
/// Order: hover edge, click edge, then the continuous click and hover
/// behaviors. Click is gated by this frame's hover result.
pub fn update_panel(panel: &mut Panel, input: &impl PointerInput) -> Transitions {
    let was_over = panel.mouse_over;
    panel.mouse_over = input.is_over(&panel.bounding_box);
    let hover = Edge::between(was_over, panel.mouse_over);
    match hover {
        Edge::Rising => fire(panel, |b| b.on_mouse_over.as_ref()),
        Edge::Falling => fire(panel, |b| b.on_mouse_away.as_ref()),
        Edge::None => {}
    }

    let was_clicked = panel.mouse_click;
    panel.mouse_click = input.is_primary_down() && panel.mouse_over;
    let click = Edge::between(was_clicked, panel.mouse_click);
    match click {
        Edge::Rising => fire(panel, |b| b.on_mouse_click.as_ref()),
        Edge::Falling => fire(panel, |b| b.on_mouse_unclick.as_ref()),
        Edge::None => {}
    }

    if panel.mouse_click {
        fire(panel, |b| b.mouse_click.as_ref());
    }
    if panel.mouse_over {
        fire(panel, |b| b.mouse_over.as_ref());
    }

    let transitions = Transitions { hover, click };
    if transitions != Transitions::default() {
        log::trace!("panel {} transitions {:?}", panel.id(), transitions);
    }
    transitions
}
