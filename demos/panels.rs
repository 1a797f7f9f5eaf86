use std::rc::Rc;

use plutonium_panels::app::run_app;
use plutonium_panels::skin::rasterize_svg;
use plutonium_panels::{MouseBehavior, Panel, PanelConfig, Rect, Style, StyleConfig};

// three button skins plus the spare slot
const BUTTON_ATLAS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="16">
  <rect x="0" y="0" width="16" height="16" fill="#e05a5a"/>
  <rect x="16" y="0" width="16" height="16" fill="#5ae07a"/>
  <rect x="32" y="0" width="16" height="16" fill="#5a8ae0"/>
  <rect x="48" y="0" width="16" height="16" fill="#ffffff"/>
</svg>"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => PanelConfig::from_json_file(path)?,
        None => PanelConfig::default(),
    };
    let button_config = config.styles.get("button").cloned().unwrap_or(StyleConfig {
        fill_color: [1.0, 1.0, 1.0, 1.0],
        ..StyleConfig::default()
    });
    let window_config = config.styles.get("window").cloned().unwrap_or(StyleConfig {
        fill_color: [0.9, 0.9, 0.95, 0.5],
        border_color: [0.2, 0.2, 0.25, 1.0],
        border_width: 4.0,
        ..StyleConfig::default()
    });

    run_app(config, move |engine| {
        let window_style = Rc::new(Style::from_config(&window_config)?);
        let button_style = Rc::new(Style::with_behavior(
            &button_config,
            MouseBehavior::new()
                .on_mouse_over(|panel| log::info!("hover {}", panel.id()))
                .on_mouse_away(|panel| log::info!("leave {}", panel.id()))
                .on_mouse_click(|panel| log::info!("click {}", panel.id()))
                .on_mouse_unclick(|panel| log::info!("release {}", panel.id())),
        )?);

        let atlas = rasterize_svg(BUTTON_ATLAS, 1.0)?;
        let skin = Rc::new(engine.register_skin(&atlas, 3)?);

        // first draw wins on the shared depth plane, so the buttons go in
        // before the window behind them
        let layer = engine.layer_mut();
        for i in 0..3 {
            let x = 80.0 + i as f32 * 90.0;
            layer.add(
                Panel::button(
                    Rect::from_xywh(x, 100.0, 70.0, 40.0),
                    Rc::clone(&button_style),
                )
                .with_skin(Rc::clone(&skin), i)?,
            );
        }
        layer.add(Panel::rect(
            Rect::from_xywh(40.0, 40.0, 320.0, 240.0),
            window_style,
        ));
        Ok(())
    })
}
