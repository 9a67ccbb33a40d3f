//! Tests de propriétés : la calculette touche par touche.
//!
//! - saisie exacte (pas d’artefact binaire)
//! - évaluation immédiate (aucune priorité)
//! - échecs sans effet sur l’état
//! - idempotences (=, point décimal)
//!
//! Les cas aléatoires passent par proptest (tailles bornées : on reste
//! sous la précision de 100 chiffres pour comparer à des entiers natifs).

use proptest::prelude::*;

use super::affichage::afficher;
use super::erreur::ErreurCalcul;
use super::machine::{appliquer, Entree, Etat, Operateur};

fn taper_depuis(etat: Etat, touches: &str) -> Result<Etat, ErreurCalcul> {
    touches.chars().try_fold(etat, |etat, c| {
        let entree = Entree::try_from(c).unwrap_or_else(|e| panic!("{e}"));
        appliquer(entree, &etat)
    })
}

fn taper(touches: &str) -> Etat {
    taper_depuis(Etat::default(), touches)
        .unwrap_or_else(|e| panic!("touches={touches:?} err={e}"))
}

fn ecran(touches: &str) -> String {
    afficher(&taper(touches))
}

/* ------------------------ Cas de référence ------------------------ */

#[test]
fn prop_saisie_entiere() {
    assert_eq!(ecran("123"), "123");
    assert_eq!(ecran("007"), "7");
}

#[test]
fn prop_saisie_decimale_exacte() {
    assert_eq!(ecran("3.14"), "3.14");
    assert_eq!(ecran("0.1+0.2="), "0.3");
    assert_eq!(ecran(".5"), "0.5");
    assert_eq!(ecran("2.50"), "2.50");
}

#[test]
fn prop_sans_priorite() {
    assert_eq!(ecran("2+3*4="), "20");
    assert_eq!(ecran("2+3*4"), "4");
    assert_eq!(ecran("2+3*"), "5");
    assert_eq!(ecran("10-4/3="), "2");
    assert_eq!(ecran("2^3^2="), "64");
}

#[test]
fn prop_division_par_zero() {
    let avant = taper("5/0");
    assert_eq!(
        appliquer(Entree::Egal, &avant),
        Err(ErreurCalcul::DivisionParZero)
    );
    assert_eq!(afficher(&avant), "0");

    // 0.0 est aussi exactement zéro
    let avant = taper("5/0.0");
    assert_eq!(
        appliquer(Entree::Egal, &avant),
        Err(ErreurCalcul::DivisionParZero)
    );
    assert_eq!(afficher(&avant), "0.0");
}

#[test]
fn prop_egal_idempotent_sur_resultat() {
    let r1 = taper("6*7=");
    let r2 = appliquer(Entree::Egal, &r1).unwrap();
    let r3 = appliquer(Entree::Egal, &r2).unwrap();
    assert_eq!(r1, r2);
    assert_eq!(r2, r3);
    assert_eq!(afficher(&r3), "42");
}

#[test]
fn prop_suite_apres_resultat() {
    let dix = taper("10=");
    let suite = taper_depuis(dix.clone(), "+5=").unwrap();
    assert_eq!(afficher(&suite), "15");

    let neuf = taper_depuis(dix, "7").unwrap();
    assert_eq!(afficher(&neuf), "7");
}

#[test]
fn prop_operateur_remplace_sans_calcul() {
    assert_eq!(ecran("8+-*2="), "16");
    assert_eq!(ecran("8+="), "8");
}

#[test]
fn prop_point_apres_operateur() {
    assert_eq!(ecran("1+."), "0.");
    assert_eq!(ecran("1+.5="), "1.5");
    assert_eq!(ecran("4=.25"), "0.25");
}

#[test]
fn prop_tiers_a_cent_chiffres() {
    let attendu = format!("0.{}", "3".repeat(100));
    assert_eq!(ecran("1/3="), attendu);
}

#[test]
fn prop_saisie_au_dela_de_la_precision() {
    // 101e chiffre : arrondi demi vers le haut à 100 chiffres significatifs
    let etat = taper(&format!("{}5", "1".repeat(100)));
    let attendu = format!("{}20", "1".repeat(99));
    assert_eq!(
        etat,
        Etat::Premier {
            premier: attendu.parse().unwrap(),
            compteur: 0
        }
    );
    assert_eq!(afficher(&etat), format!("1.{}2e+100", "1".repeat(98)));

    let etat = taper(&format!("{}4", "1".repeat(100)));
    assert_eq!(afficher(&etat), format!("1.{}e+100", "1".repeat(99)));
}

#[test]
fn prop_puissance_non_entiere() {
    assert_eq!(ecran("4^.5="), "2");
    assert_eq!(ecran("9^1.5="), "27");
}

/* ------------------------ Campagne aléatoire ------------------------ */

fn arb_operateur() -> impl Strategy<Value = Operateur> {
    prop_oneof![
        Just(Operateur::Plus),
        Just(Operateur::Moins),
        Just(Operateur::Fois),
    ]
}

fn natif(a: i128, op: Operateur, b: i128) -> i128 {
    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise | Operateur::Puissance => unreachable!("hors stratégie"),
    }
}

proptest! {
    #[test]
    fn prop_chiffres_forment_l_entier(chiffres in proptest::collection::vec(0u8..=9, 1..60)) {
        let touches: String = chiffres.iter().map(|d| char::from(b'0' + d)).collect();
        let attendu = touches.trim_start_matches('0');
        let attendu = if attendu.is_empty() { "0" } else { attendu };
        let etat = taper(&touches);
        // au-delà de 20 chiffres l’écran passe en notation scientifique
        if attendu.len() <= 21 {
            prop_assert_eq!(afficher(&etat), attendu);
        }
        prop_assert_eq!(etat, Etat::Premier { premier: attendu.parse().unwrap(), compteur: 0 });
    }

    #[test]
    fn prop_fraction_conserve_ses_chiffres(
        entiere in 1u32..100_000,
        fraction in proptest::collection::vec(0u8..=9, 1..20),
    ) {
        let fraction: String = fraction.iter().map(|d| char::from(b'0' + d)).collect();
        let touches = format!("{entiere}.{fraction}");
        prop_assert_eq!(ecran(&touches), touches);
    }

    #[test]
    fn prop_chaine_gauche_a_droite(
        premier in 0i128..1000,
        suite in proptest::collection::vec((arb_operateur(), 0i128..1000), 1..5),
    ) {
        let mut touches = premier.to_string();
        let mut total = premier;
        for (op, n) in &suite {
            touches.push(op.symbole());
            touches.push_str(&n.to_string());
            total = natif(total, *op, *n);
        }
        touches.push('=');
        prop_assert_eq!(ecran(&touches), total.to_string());
    }

    #[test]
    fn prop_point_repete_sans_effet(
        points in 1usize..6,
        avant in 0u32..1000,
        apres in proptest::collection::vec(0u8..=9, 0..8),
    ) {
        let apres: String = apres.iter().map(|d| char::from(b'0' + d)).collect();
        let une_fois = format!("{avant}.{apres}");
        let plusieurs = format!("{avant}{}{apres}", ".".repeat(points));
        prop_assert_eq!(taper(&une_fois), taper(&plusieurs));
    }

    #[test]
    fn prop_division_puis_produit(a in 1u32..100_000, b in 1u32..1000) {
        prop_assert_eq!(ecran(&format!("{a}*{b}/{b}=")), a.to_string());
    }
}
