// src/noyau/affichage.rs
//
// Écran de la calculette : état -> texte. Ne peut pas échouer
// (le décimal est toujours fini et exact).

use super::decimal::Decimal;
use super::machine::Etat;

/// Valeur “active” + compteur de décimales (0 si l’état n’en porte pas).
fn valeur_active(etat: &Etat) -> (&Decimal, u32) {
    match etat {
        Etat::Premier { premier, compteur } => (premier, *compteur),
        Etat::OpEnAttente { premier, .. } => (premier, 0),
        Etat::Second {
            second, compteur, ..
        } => (second, *compteur),
        Etat::Resultat { resultat } => (resultat, 0),
    }
}

/// - compteur 0 : chaîne exacte
/// - compteur 1 : virgule posée, pas encore de chiffre ("3.")
/// - compteur k : exactement k-1 chiffres après la virgule ("3.10")
pub fn afficher(etat: &Etat) -> String {
    let (valeur, compteur) = valeur_active(etat);
    match compteur {
        0 => valeur.to_string(),
        1 => format!("{valeur}."),
        k => valeur.to_fixed(k - 1),
    }
}

/// Ligne secondaire : le calcul en attente ("12 +"), s’il y en a un.
pub fn ligne_operation(etat: &Etat) -> Option<String> {
    match etat {
        Etat::OpEnAttente { premier, op } | Etat::Second { premier, op, .. } => {
            Some(format!("{premier} {op}"))
        }
        Etat::Premier { .. } | Etat::Resultat { .. } => None,
    }
}
