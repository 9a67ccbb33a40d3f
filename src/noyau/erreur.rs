// src/noyau/erreur.rs
//
// Erreurs typées du noyau.
// - ErreurCalcul : échec d’une opération (la cellule d’état reste intacte)
// - ErreurConfig : précision globale
// - LitteralInvalide / ToucheInconnue : entrées texte (hôte, tests)

/// Échec d’un calcul. Toujours récupéré à la frontière de la transition :
/// l’état précédent est conservé, l’erreur est signalée une seule fois.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalcul {
    #[error("Division par zéro")]
    DivisionParZero,

    #[error("Puissance non réelle : base négative et exposant non entier")]
    PuissanceNonReelle,

    #[error("Dépassement : résultat hors de l’intervalle représentable")]
    Debordement,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErreurConfig {
    #[error("précision déjà fixée à {actuelle} chiffres significatifs")]
    DejaFixee { actuelle: u32 },

    #[error("précision invalide : {0:?}")]
    Invalide(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("littéral décimal invalide : {0:?}")]
pub struct LitteralInvalide(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("touche non reconnue : {0:?}")]
pub struct ToucheInconnue(pub char);
