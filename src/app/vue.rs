// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Écran : ligne d’opération en attente + valeur active (formatée par le noyau)
// - Pavé : chiffres, point, opérateurs, "=", "C"
// - Clavier : caractères tapés -> touches ; Enter = "=" ; Escape = "C" (dans app.rs)
// - Bandeau d’erreur au-dessus de l’écran, avec fondu

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::Entree;

/// Disposition du pavé (4 colonnes), hors ligne "C / =".
const PAVE: [[char; 4]; 4] = [
    ['7', '8', '9', '/'],
    ['4', '5', '6', '*'],
    ['1', '2', '3', '-'],
    ['0', '.', '^', '+'],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.heading("Calculatrice");
        ui.add_space(6.0);

        self.ui_bandeau(ui);
        self.ui_ecran(ui);

        ui.add_space(8.0);

        self.ui_pave(ui);
    }

    /// Touches tapées au clavier pendant cette frame.
    pub fn ui_clavier(&mut self, ctx: &egui::Context) {
        let (texte, entree) = ctx.input(|i| {
            let texte: String = i
                .events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect();
            (texte, i.key_pressed(egui::Key::Enter))
        });

        self.taper(&texte);
        if entree {
            self.appuyer(Entree::Egal);
        }
    }

    fn ui_bandeau(&self, ui: &mut egui::Ui) {
        let Some((titre, message, opacite)) = self.bandeau.visible() else {
            return;
        };
        let couleur = ui.visuals().error_fg_color.gamma_multiply(opacite);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.colored_label(couleur, egui::RichText::new(titre).strong());
            ui.colored_label(couleur, message);
        });
        ui.add_space(6.0);
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        let operation = self.ligne_operation().unwrap_or_default();
        let ecran = self.ecran();

        // Affichage lecture seule, cadre visuel via Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.monospace(operation);
                    ui.label(egui::RichText::new(ecran).monospace().size(28.0));
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for c in rangee {
                        self.bouton_touche(ui, c);
                    }
                    ui.end_row();
                }

                let resp = ui
                    .add_sized([56.0, 36.0], egui::Button::new("C"))
                    .on_hover_text("Nouvelle saisie");
                if resp.clicked() {
                    self.reset();
                }
                ui.label("");
                ui.label("");
                self.bouton_touche(ui, '=');
                ui.end_row();
            });
    }

    fn bouton_touche(&mut self, ui: &mut egui::Ui, c: char) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(c.to_string()));
        if !resp.clicked() {
            return;
        }
        match Entree::try_from(c) {
            Ok(entree) => {
                self.appuyer(entree);
            }
            Err(e) => log::error!("pavé mal configuré : {e}"),
        }
    }
}
