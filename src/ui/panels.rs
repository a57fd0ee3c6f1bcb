use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::curve::CurveMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: subject checklist and curve type.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Curve type");
    ui.separator();

    let mut mode = state.mode();
    ui.radio_value(&mut mode, CurveMode::Raw, "Raw (lines + markers)");
    ui.radio_value(&mut mode, CurveMode::Smoothed, "LOWESS smoothed");
    state.set_mode(mode);

    ui.add_space(8.0);

    let subjects: Vec<String> = state.dataset.registry.sorted().cloned().collect();
    let n_selected = state.selection().len();
    ui.heading(format!("Select subjects  ({n_selected}/{})", subjects.len()));
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for subject in &subjects {
                let mut checked = state.is_selected(subject);
                let mut text = RichText::new(subject).color(state.colors.color_for(subject));
                if state.is_dashed(subject) {
                    text = text.italics();
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_subject(subject);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, dataset summary, status and warnings.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&state.chart.layout.title);

        ui.separator();

        ui.label(format!(
            "{}: {} measurements, {} subjects",
            state
                .dataset
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            state.dataset.len(),
            state.dataset.registry.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }

        if !state.warnings.is_empty() {
            ui.separator();
            ui.label(
                RichText::new(format!("{} subject(s) not drawn", state.warnings.len()))
                    .color(Color32::YELLOW),
            )
            .on_hover_text(state.warnings.join("\n"));
        }
    });
}
