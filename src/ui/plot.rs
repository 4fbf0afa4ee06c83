use std::f32::consts::FRAC_PI_2;

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2,
    epaint::TextShape,
};

use crate::chart::config::ChartConfig;
use crate::chart::model::{ChartModel, Hover};
use crate::chart::scale::tick_label;
use crate::data::model::Season;
use crate::state::AppState;

const TICK_LENGTH: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;

fn tick_font() -> FontId {
    FontId::proportional(10.0)
}

// ---------------------------------------------------------------------------
// Snow chart (central panel)
// ---------------------------------------------------------------------------

/// Render both seasons, the axes, and the hover overlay.
pub fn snow_chart(ui: &mut Ui, state: &mut AppState) {
    let Some(model) = &state.model else {
        state.hover = None;
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(if state.status_message.is_some() {
                "Chart unavailable: the season files could not be loaded"
            } else {
                "Open two season files to view the chart  (File → Open…)"
            });
        });
        return;
    };

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let config = &state.config;
            let (response, painter) =
                ui.allocate_painter(Vec2::new(config.width, config.height), Sense::hover());
            let plot = plot_rect(response.rect, config);
            let ink = ui.visuals().text_color();

            for season in Season::ALL {
                let points: Vec<Pos2> = model
                    .line_points(season)
                    .iter()
                    .map(|&[x, y]| to_screen(plot, x, y))
                    .collect();
                let stroke = Stroke::new(1.5, state.colors.color_for(season));
                painter.add(Shape::line(points, stroke));
            }

            draw_x_axis(&painter, plot, model, config, ink);
            draw_y_axis(&painter, plot, response.rect, model, config, ink);

            // The overlay only tracks the pointer inside the plot area.
            state.hover = response
                .hover_pos()
                .filter(|pos| plot.contains(*pos))
                .and_then(|pos| model.hover((pos.x - plot.left()) as f64));

            if let Some(hover) = &state.hover {
                draw_marker(&painter, plot, hover, config, ink);
            }
        });
}

/// Plot area inside the canvas after margins.
fn plot_rect(canvas: Rect, config: &ChartConfig) -> Rect {
    Rect::from_min_size(
        canvas.min + Vec2::new(config.margin.left, config.margin.top),
        Vec2::new(config.plot_width(), config.plot_height()),
    )
}

fn to_screen(plot: Rect, x: f64, y: f64) -> Pos2 {
    Pos2::new(plot.left() + x as f32, plot.top() + y as f32)
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

fn draw_x_axis(painter: &Painter, plot: Rect, model: &ChartModel, config: &ChartConfig, ink: Color32) {
    let stroke = Stroke::new(1.0, ink);
    let y = plot.bottom();
    let right = plot.left() + model.width() as f32;
    painter.line_segment([plot.left_bottom(), Pos2::new(right, y)], stroke);

    for date in model.x_scale().ticks(config.x_ticks) {
        let x = plot.left() + model.map_date(date) as f32;
        painter.line_segment([Pos2::new(x, y), Pos2::new(x, y + TICK_LENGTH)], stroke);
        painter.text(
            Pos2::new(x, y + TICK_LENGTH + TICK_PADDING),
            Align2::CENTER_TOP,
            tick_label(date),
            tick_font(),
            ink,
        );
    }

    painter.text(
        Pos2::new(plot.center().x, y + config.margin.top + 25.0),
        Align2::CENTER_CENTER,
        &config.x_title,
        FontId::proportional(12.0),
        ink,
    );
}

fn draw_y_axis(
    painter: &Painter,
    plot: Rect,
    canvas: Rect,
    model: &ChartModel,
    config: &ChartConfig,
    ink: Color32,
) {
    let stroke = Stroke::new(1.0, ink);
    let x = plot.left();
    let bottom = plot.top() + model.height() as f32;
    painter.line_segment([plot.left_top(), Pos2::new(x, bottom)], stroke);

    let ticks = model.y_scale().ticks(config.y_ticks);
    let step = match ticks.as_slice() {
        [first, second, ..] => second - first,
        _ => 1.0,
    };
    for value in ticks {
        let y = plot.top() + model.map_value(value) as f32;
        painter.line_segment([Pos2::new(x - TICK_LENGTH, y), Pos2::new(x, y)], stroke);
        painter.text(
            Pos2::new(x - TICK_LENGTH - TICK_PADDING, y),
            Align2::RIGHT_CENTER,
            format_value_tick(value, step),
            tick_font(),
            ink,
        );
    }

    // Title reads bottom-to-top along the left edge of the canvas.
    let galley = painter.layout_no_wrap(config.y_title.clone(), FontId::proportional(12.0), ink);
    let pos = Pos2::new(canvas.left() + 2.0, plot.center().y + galley.size().x / 2.0);
    painter.add(TextShape::new(pos, galley, ink).with_angle(-FRAC_PI_2));
}

/// Enough decimals to tell adjacent ticks apart.
fn format_value_tick(value: f64, step: f64) -> String {
    if step >= 1.0 || step <= 0.0 {
        format!("{value:.0}")
    } else {
        let decimals = (-step.log10()).ceil() as usize;
        format!("{value:.decimals$}")
    }
}

// ---------------------------------------------------------------------------
// Hover overlay
// ---------------------------------------------------------------------------

fn draw_marker(painter: &Painter, plot: Rect, hover: &Hover, config: &ChartConfig, ink: Color32) {
    let center = to_screen(plot, hover.x, hover.y);
    painter.circle_stroke(center, config.marker_radius, Stroke::new(1.5, ink));
    painter.text(
        center + Vec2::new(config.marker_radius + 4.5, 0.0),
        Align2::LEFT_CENTER,
        hover.sample.value.to_string(),
        tick_font(),
        ink,
    );
}
