// src/noyau/signal.rs
//
// Touche -> cellule d’état de l’hôte.
// L’hôte possède l’unique cellule et sérialise les appels ; ici on applique,
// on remplace la cellule si tout va bien, sinon on signale et on continue.

use super::affichage::afficher;
use super::machine::{appliquer, Entree, Etat};

/// Titre commun des erreurs remontées à l’hôte.
pub const TITRE_ERREUR: &str = "Calculatrice";

/// Canal d’erreurs générique de l’hôte : “signaler et continuer”.
pub trait CanalErreurs {
    fn signaler(&mut self, titre: &str, message: &str);
}

/// Retourne `true` si la touche a été acceptée.
/// En cas d’échec : un seul signalement, cellule laissée telle quelle.
pub fn appuyer<C: CanalErreurs + ?Sized>(etat: &mut Etat, entree: Entree, canal: &mut C) -> bool {
    match appliquer(entree, etat) {
        Ok(suivant) => {
            *etat = suivant;
            log::debug!("touche {entree} -> écran {:?}", afficher(etat));
            true
        }
        Err(e) => {
            log::warn!("touche {entree} refusée : {e}");
            canal.signaler(TITRE_ERREUR, &e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErreurCalcul;
    use crate::noyau::machine::Operateur;

    #[derive(Default)]
    struct Journal(Vec<(String, String)>);

    impl CanalErreurs for Journal {
        fn signaler(&mut self, titre: &str, message: &str) {
            self.0.push((titre.to_string(), message.to_string()));
        }
    }

    fn touches(s: &str) -> Vec<Entree> {
        s.chars().map(|c| Entree::try_from(c).unwrap()).collect()
    }

    #[test]
    fn division_par_zero_signalee_une_fois() {
        let mut etat = Etat::default();
        let mut journal = Journal::default();

        for e in touches("5/0") {
            assert!(appuyer(&mut etat, e, &mut journal));
        }
        let avant = etat.clone();

        assert!(!appuyer(&mut etat, Entree::Egal, &mut journal));
        assert_eq!(etat, avant);
        assert_eq!(
            journal.0,
            vec![("Calculatrice".to_string(), "Division par zéro".to_string())]
        );

        // la calculette reste utilisable
        for e in touches("2=") {
            assert!(appuyer(&mut etat, e, &mut journal));
        }
        assert_eq!(afficher(&etat), "2.5");
        assert_eq!(journal.0.len(), 1);
    }

    #[test]
    fn debordement_signale_une_fois_sans_mutation() {
        let mut etat = Etat::default();
        let mut journal = Journal::default();

        // 10 ^ 10^16 : exposant ajusté hors bornes
        for e in touches(&format!("10^1{}", "0".repeat(16))) {
            assert!(appuyer(&mut etat, e, &mut journal));
        }
        let avant = etat.clone();

        assert!(!appuyer(&mut etat, Entree::Egal, &mut journal));
        assert!(!appuyer(
            &mut etat,
            Entree::Operateur(Operateur::Fois),
            &mut journal
        ));
        assert_eq!(etat, avant);
        assert_eq!(
            journal.0,
            vec![
                ("Calculatrice".to_string(), ErreurCalcul::Debordement.to_string());
                2
            ]
        );
        assert_eq!(afficher(&etat), format!("1{}", "0".repeat(16)));
    }

    #[test]
    fn repli_par_operateur_aussi_signale() {
        let mut etat = Etat::default();
        let mut journal = Journal::default();
        for e in touches("9/0") {
            appuyer(&mut etat, e, &mut journal);
        }
        assert!(!appuyer(
            &mut etat,
            Entree::Operateur(Operateur::Plus),
            &mut journal
        ));
        assert_eq!(afficher(&etat), "0");
        assert_eq!(journal.0.len(), 1);
    }
}
