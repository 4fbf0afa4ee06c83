use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::model::{ChartModel, ExtentPolicy};
use crate::data::model::Season;
use crate::state::AppState;

const WARNING: Color32 = Color32::from_rgb(230, 150, 40);

// ---------------------------------------------------------------------------
// Left side panel – legend, extents, hover readout
// ---------------------------------------------------------------------------

/// Render the left legend panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Seasons");
    ui.separator();

    let Some(model) = &state.model else {
        ui.label("No seasons loaded.");
        return;
    };

    for season in Season::ALL {
        let series = model.series(season);
        let color = state.colors.color_for(season);
        ui.label(RichText::new(format!("━━ {}", series.label())).color(color).strong());
        ui.label(format!(
            "{} samples, {} to {}",
            series.len(),
            series.first_date(),
            series.last_date()
        ));
        ui.label(format!("peak {:.1} in", series.max_value()));
        ui.label(RichText::new(state.sources.path(season).display().to_string()).weak());
        ui.add_space(4.0);
    }

    ui.separator();
    extents_section(ui, model);

    ui.separator();
    ui.strong("Pointer");
    match &state.hover {
        Some(hover) => {
            let label = model.series(hover.season).label();
            ui.label(hover.sample.date.format("%A").to_string());
            ui.label(
                RichText::new(hover.sample.to_string())
                    .color(state.colors.color_for(hover.season))
                    .strong(),
            );
            ui.label(RichText::new(label).weak());
        }
        None => {
            ui.label(RichText::new("Move the pointer over the chart.").weak());
        }
    }
}

fn extents_section(ui: &mut Ui, model: &ChartModel) {
    let extents = model.extents();
    let policy = match model.policy() {
        ExtentPolicy::Reference => "reference",
        ExtentPolicy::Merged => "merged",
    };
    ui.strong(format!("Axes ({policy} extents)"));
    ui.label(format!("Date: {} to {}", extents.dates.0, extents.dates.1));
    ui.label(format!(
        "Value: {:.1} to {:.1} in",
        extents.values.0, extents.values.1
    ));
    ui.label(format!(
        "Lookup index: {} samples",
        model.index().entries().len()
    ));
    if model.index().is_merged() {
        ui.label(
            RichText::new("Seasons overlap in time; lookup merges them by date.").color(WARNING),
        );
    }

    let notes = model.notes();
    if !notes.is_empty() {
        ui.add_space(4.0);
        egui::CollapsingHeader::new(
            RichText::new(format!("Outside the plot area ({})", notes.len())).color(WARNING),
        )
        .id_salt("out_of_extent")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for note in notes {
                ui.label(note);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for season in Season::ALL {
                if ui.button(format!("Open {season}…")).clicked() {
                    open_file_dialog(state, season);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Reload both").clicked() {
                state.reload_all();
                ui.close_menu();
            }
        });

        ui.separator();

        let mut policy = state.extent_policy;
        ui.selectable_value(&mut policy, ExtentPolicy::Reference, "Reference extents")
            .on_hover_text("x: first date of season A to last date of season B; y: 0 to season A's peak");
        ui.selectable_value(&mut policy, ExtentPolicy::Merged, "Merged extents")
            .on_hover_text("Both axes cover both seasons");
        state.set_extent_policy(policy);

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, season: Season) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {season}"))
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Replacing {season} with {}", path.display());
        state.reload_season(season, path);
    }
}
