//! src/noyau/machine.rs
//!
//! Machine à états de la saisie (calculette de bureau).
//!
//! Évaluation immédiate : pas de priorité entre opérateurs. Chaque opérateur
//! replie le calcul en attente dans le total courant : 2 + 3 × 4 = 20.
//!
//! Contrats :
//! - `appliquer` est pure et totale : les 4 états × 4 touches ont une issue définie,
//!   vérifiée par le compilateur (match sur le couple, aucune branche joker).
//! - Un échec ne modifie rien : l’état reçu par référence reste l’état courant.

use std::fmt;

use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, ToucheInconnue};

/* ------------------------ Touches ------------------------ */

/// Chiffre 0..=9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chiffre(u8);

impl Chiffre {
    pub fn new(valeur: u8) -> Option<Self> {
        (valeur <= 9).then_some(Self(valeur))
    }

    pub fn valeur(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entree {
    Chiffre(Chiffre),
    Operateur(Operateur),
    Point,
    Egal,
}

impl fmt::Display for Entree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entree::Chiffre(c) => write!(f, "{}", c.valeur()),
            Entree::Operateur(op) => write!(f, "{op}"),
            Entree::Point => f.write_str("."),
            Entree::Egal => f.write_str("="),
        }
    }
}

/// Clavier physique -> touche. La virgule vaut le point (pavé numérique FR).
impl TryFrom<char> for Entree {
    type Error = ToucheInconnue;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0'..='9' => Chiffre::new(c as u8 - b'0')
                .map(Entree::Chiffre)
                .ok_or(ToucheInconnue(c)),
            '+' => Ok(Entree::Operateur(Operateur::Plus)),
            '-' => Ok(Entree::Operateur(Operateur::Moins)),
            '*' | '×' => Ok(Entree::Operateur(Operateur::Fois)),
            '/' | '÷' => Ok(Entree::Operateur(Operateur::Divise)),
            '^' => Ok(Entree::Operateur(Operateur::Puissance)),
            '.' | ',' => Ok(Entree::Point),
            '=' => Ok(Entree::Egal),
            autre => Err(ToucheInconnue(autre)),
        }
    }
}

/* ------------------------ États ------------------------ */

/// `compteur` : 0 = saisie entière ; k > 0 = virgule posée, le prochain
/// chiffre vaut d × 10^-k.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Etat {
    Premier {
        premier: Decimal,
        compteur: u32,
    },
    OpEnAttente {
        premier: Decimal,
        op: Operateur,
    },
    Second {
        op: Operateur,
        premier: Decimal,
        second: Decimal,
        compteur: u32,
    },
    Resultat {
        resultat: Decimal,
    },
}

impl Default for Etat {
    fn default() -> Self {
        Etat::Premier {
            premier: Decimal::zero(),
            compteur: 0,
        }
    }
}

/* ------------------------ Transition ------------------------ */

pub fn calculer(a: &Decimal, op: Operateur, b: &Decimal) -> Result<Decimal, ErreurCalcul> {
    match op {
        Operateur::Plus => a.add(b),
        Operateur::Moins => a.sub(b),
        Operateur::Fois => a.mul(b),
        Operateur::Divise => a.div(b),
        Operateur::Puissance => a.pow(b),
    }
}

/// Ajoute un chiffre à l’opérande en cours : décalage si entier,
/// sinon d × 10^-k puis compteur k+1.
fn saisir(valeur: &Decimal, compteur: u32, chiffre: Chiffre) -> Result<(Decimal, u32), ErreurCalcul> {
    let d = Decimal::from(chiffre.valeur());
    if compteur == 0 {
        Ok((valeur.decaler(1).add(&d)?, 0))
    } else {
        let fraction = d.decaler(-i64::from(compteur));
        Ok((valeur.add(&fraction)?, compteur.saturating_add(1)))
    }
}

pub fn appliquer(entree: Entree, etat: &Etat) -> Result<Etat, ErreurCalcul> {
    use Etat::{OpEnAttente, Premier, Resultat, Second};

    let suivant = match (entree, etat) {
        /* --- saisie du premier opérande --- */
        (Entree::Chiffre(c), Premier { premier, compteur }) => {
            let (premier, compteur) = saisir(premier, *compteur, c)?;
            Premier { premier, compteur }
        }
        (Entree::Operateur(op), Premier { premier, .. }) => OpEnAttente {
            premier: premier.clone(),
            op,
        },
        (Entree::Point, Premier { premier, compteur }) => Premier {
            premier: premier.clone(),
            compteur: (*compteur).max(1),
        },
        (Entree::Egal, Premier { premier, .. }) => Resultat {
            resultat: premier.clone(),
        },

        /* --- opérateur choisi, second opérande pas commencé --- */
        (Entree::Chiffre(c), OpEnAttente { premier, op }) => Second {
            op: *op,
            premier: premier.clone(),
            second: Decimal::from(c.valeur()),
            compteur: 0,
        },
        (Entree::Operateur(nouveau), OpEnAttente { premier, .. }) => OpEnAttente {
            premier: premier.clone(),
            op: nouveau,
        },
        (Entree::Point, OpEnAttente { premier, op }) => Second {
            op: *op,
            premier: premier.clone(),
            second: Decimal::zero(),
            compteur: 1,
        },
        (Entree::Egal, OpEnAttente { .. }) => etat.clone(),

        /* --- saisie du second opérande --- */
        (
            Entree::Chiffre(c),
            Second {
                op,
                premier,
                second,
                compteur,
            },
        ) => {
            let (second, compteur) = saisir(second, *compteur, c)?;
            Second {
                op: *op,
                premier: premier.clone(),
                second,
                compteur,
            }
        }
        // total courant : on replie tout de suite
        (
            Entree::Operateur(nouveau),
            Second {
                op,
                premier,
                second,
                ..
            },
        ) => OpEnAttente {
            premier: calculer(premier, *op, second)?,
            op: nouveau,
        },
        (
            Entree::Point,
            Second {
                op,
                premier,
                second,
                compteur,
            },
        ) => Second {
            op: *op,
            premier: premier.clone(),
            second: second.clone(),
            compteur: (*compteur).max(1),
        },
        (
            Entree::Egal,
            Second {
                op,
                premier,
                second,
                ..
            },
        ) => Resultat {
            resultat: calculer(premier, *op, second)?,
        },

        /* --- résultat affiché --- */
        (Entree::Chiffre(c), Resultat { .. }) => Premier {
            premier: Decimal::from(c.valeur()),
            compteur: 0,
        },
        (Entree::Operateur(op), Resultat { resultat }) => OpEnAttente {
            premier: resultat.clone(),
            op,
        },
        (Entree::Point, Resultat { .. }) => Premier {
            premier: Decimal::zero(),
            compteur: 1,
        },
        (Entree::Egal, Resultat { .. }) => etat.clone(),
    };

    Ok(suivant)
}
