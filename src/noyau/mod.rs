//! Noyau calculette (saisie touche par touche, décimal exact)
//!
//! Organisation interne :
//! - decimal.rs    : décimal exact (BigDecimal) + précision globale
//! - erreur.rs     : erreurs typées (calcul, configuration, littéraux, touches)
//! - machine.rs    : touches, états, transition totale
//! - affichage.rs  : écran (état -> texte)
//! - signal.rs     : touche -> cellule d’état de l’hôte + canal d’erreurs

pub mod affichage;
pub mod decimal;
pub mod erreur;
pub mod machine;
pub mod signal;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use affichage::{afficher, ligne_operation};
pub use decimal::{configurer_precision, PRECISION_DEFAUT};
#[cfg(not(target_arch = "wasm32"))]
pub use decimal::lire_precision;
pub use machine::{Entree, Etat};
pub use signal::{appuyer, CanalErreurs};
