use super::state::Tone;
use super::UvrUploader;
use crate::upload::ChecklistKey;
use crate::utils::period::MONTHS;
use eframe::egui::{self, Align, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);

impl UvrUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 30.0;
            let content_height = total_height - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(10.0);
                    ui.heading("User Verification Automation");
                    ui.add_space(5.0);
                    ui.label(RichText::new("Run User Verification Reports (UVR)").size(18.0));
                    ui.add_space(5.0);

                    let uploaded = self
                        .session
                        .upload_count
                        .map_or_else(|| "-".to_string(), |count| count.to_string());
                    ui.label(format!(
                        "• Upload all {total} required UVR files to run reports ({uploaded}/{total} uploaded)",
                        total = ChecklistKey::ALL.len()
                    ));
                    ui.label(
                        "• If you are unsure of which files to upload, refer to the checklist at the bottom of the window",
                    );

                    ui.add_space(15.0);
                    self.render_dropzone(ui);

                    ui.add_space(15.0);
                    self.render_period_selectors(ui);

                    ui.add_space(15.0);
                    self.render_status(ui);

                    ui.add_space(10.0);
                    self.render_download_actions(ui);

                    ui.add_space(20.0);
                    self.render_checklist(ui);
                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!("Server: {}", self.client.server_url()))
                        .color(ui.visuals().text_color().gamma_multiply(0.6)),
                );
            });
        });
    }

    fn render_dropzone(&mut self, ui: &mut egui::Ui) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let fill = if hovering && self.session.can_upload() {
            ui.visuals().selection.bg_fill.gamma_multiply(0.3)
        } else {
            ui.visuals().extreme_bg_color
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(2.0, Color32::GRAY))
            .rounding(4.0)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(ui.available_width(), 160.0));
                ui.vertical_centered(|ui| {
                    if self.session.is_loading {
                        ui.add_space(30.0);
                        ui.add(egui::Spinner::new().size(48.0));
                        ui.add_space(10.0);
                        ui.label("Uploading and processing...");
                        return;
                    }

                    ui.add_space(20.0);
                    ui.label(RichText::new("⬆").size(32.0).color(ACCENT));
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Choose files or drag here")
                            .size(16.0)
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        let width = 2.0 * 140.0 + ui.spacing().item_spacing.x;
                        ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
                        if ui
                            .add_sized([140.0, 28.0], egui::Button::new("📄 Choose Files"))
                            .clicked()
                        {
                            self.pick_files();
                        }
                        if ui
                            .add_sized([140.0, 28.0], egui::Button::new("📁 Choose Folder"))
                            .clicked()
                        {
                            self.pick_folder();
                        }
                    });
                });
            });
    }

    fn render_period_selectors(&mut self, ui: &mut egui::Ui) {
        let mut selected = self.session.period;

        ui.add_enabled_ui(self.session.can_upload(), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Month:").strong());
                egui::ComboBox::from_id_source("month")
                    .selected_text(selected.month.name())
                    .show_ui(ui, |ui| {
                        for month in MONTHS {
                            ui.selectable_value(&mut selected.month, month, month.name());
                        }
                    });

                ui.add_space(10.0);
                ui.label(RichText::new("Year:").strong());
                egui::ComboBox::from_id_source("year")
                    .selected_text(selected.year.to_string())
                    .show_ui(ui, |ui| {
                        for year in self.year_options {
                            ui.selectable_value(&mut selected.year, year, year.to_string());
                        }
                    });
            });
        });

        if selected != self.session.period {
            self.select_period(selected);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let status = &self.session.status;
        let color = match status.tone() {
            Tone::Neutral => ui.visuals().text_color(),
            Tone::Progress => Color32::from_rgb(29, 78, 216),
            Tone::Success => Color32::from_rgb(22, 163, 74),
            Tone::Error => Color32::from_rgb(220, 38, 38),
        };

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Status:").strong().size(16.0));
            ui.label(RichText::new(status.to_string()).color(color).size(16.0));
        });
    }

    fn render_download_actions(&mut self, ui: &mut egui::Ui) {
        let enabled = self.session.can_download();
        ui.horizontal(|ui| {
            let download = egui::Button::new(
                RichText::new("⬇ Download Processed Reports").color(Color32::WHITE),
            )
            .fill(if enabled { ACCENT } else { Color32::GRAY })
            .min_size(egui::vec2(220.0, 32.0));
            if ui.add_enabled(enabled, download).clicked() {
                self.save_processed_files();
            }

            if ui
                .add_enabled(enabled, egui::Button::new("🌐 Open in Browser"))
                .clicked()
            {
                self.open_processed_files();
            }

            if self.session.is_downloading {
                ui.spinner();
            }
        });
    }

    fn render_checklist(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("UVR Files Checklist:").size(18.0));
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for (key, present) in self.session.checklist.iter() {
                    ui.horizontal(|ui| {
                        if present {
                            ui.label("✅");
                            ui.colored_label(Color32::from_rgb(0, 180, 0), key.label());
                        } else {
                            ui.label("⬜");
                            ui.label(key.label());
                        }
                    });
                }
            });
    }
}
