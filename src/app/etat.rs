//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder l’UNIQUE cellule d’état de la calculette et le bandeau d’erreur.
//! Toutes les touches passent par `appuyer` (un seul écrivain, appels séquentiels).
//!
//! Contrats :
//! - Aucune arithmétique ici : tout passe par le noyau.
//! - Une erreur ne touche jamais l’écran : elle va au bandeau, qui s’efface seul.

use crate::noyau::{afficher, ligne_operation, CanalErreurs, Entree, Etat};

/// Durée d’affichage du bandeau d’erreur (secondes).
const FADE: f64 = 3.0;

/// Début du fondu (secondes après le signalement).
const DEBUT_FONDU: f64 = 2.5;

/// Bandeau d’erreur transitoire. L’horloge est celle de l’UI (secondes).
#[derive(Clone, Debug, Default)]
pub struct Bandeau {
    titre: String,
    message: String,
    depuis: Option<f64>,
    horloge: f64,
}

impl Bandeau {
    /// Avance l’horloge ; masque le bandeau une fois le délai écoulé.
    pub fn tic(&mut self, maintenant: f64) {
        self.horloge = maintenant;
        if let Some(t0) = self.depuis {
            if maintenant - t0 >= FADE {
                self.depuis = None;
            }
        }
    }

    /// (titre, message, opacité) si visible.
    pub fn visible(&self) -> Option<(&str, &str, f32)> {
        let t0 = self.depuis?;
        let age = (self.horloge - t0).max(0.0);
        let opacite = if age <= DEBUT_FONDU {
            1.0
        } else {
            (1.0 - (age - DEBUT_FONDU) / (FADE - DEBUT_FONDU)).clamp(0.0, 1.0)
        };
        Some((self.titre.as_str(), self.message.as_str(), opacite as f32))
    }
}

impl CanalErreurs for Bandeau {
    /// Un nouveau signalement remplace le précédent et relance le délai.
    fn signaler(&mut self, titre: &str, message: &str) {
        self.titre = titre.to_string();
        self.message = message.to_string();
        self.depuis = Some(self.horloge);
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    pub etat: Etat,
    pub bandeau: Bandeau,
}

impl AppCalc {
    /* ------------------------ Actions “touches” ------------------------ */

    pub fn appuyer(&mut self, entree: Entree) -> bool {
        crate::noyau::appuyer(&mut self.etat, entree, &mut self.bandeau)
    }

    /// Texte tapé au clavier : chaque caractère reconnu est une touche.
    pub fn taper(&mut self, texte: &str) {
        for c in texte.chars() {
            match Entree::try_from(c) {
                Ok(entree) => {
                    self.appuyer(entree);
                }
                Err(e) => log::trace!("{e}"),
            }
        }
    }

    /// C : nouvelle saisie (équivaut à remonter le widget).
    pub fn reset(&mut self) {
        self.etat = Etat::default();
    }

    pub fn tic(&mut self, maintenant: f64) {
        self.bandeau.tic(maintenant);
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn ecran(&self) -> String {
        afficher(&self.etat)
    }

    pub fn ligne_operation(&self) -> Option<String> {
        ligne_operation(&self.etat)
    }
}
