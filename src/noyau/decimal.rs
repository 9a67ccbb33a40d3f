// src/noyau/decimal.rs
//
// Décimal exact sur `bigdecimal::BigDecimal`
// ------------------------------------------
// - Jamais de flottant binaire : 0.1 + 0.2 = 0.3 exactement.
// - Chaque résultat est arrondi à la précision globale (chiffres significatifs),
//   `RoundingMode::HalfUp` (ex æquo : on s’éloigne de zéro).
// - Valeur toujours normalisée (`normalized`) => `==` est l’égalité numérique.
// - Précision fixée UNE fois par processus (OnceLock), défaut 100 chiffres.
//
// Le `Div` de la crate travaille à sa précision de compilation (100 chiffres) :
// le quotient passe par les parties entières pour suivre la précision globale
// et les chiffres de garde de ln/exp.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use num_traits::{One, ToPrimitive, Zero};

use super::erreur::{ErreurCalcul, ErreurConfig, LitteralInvalide};

/* ------------------------ Précision globale ------------------------ */

/// Précision par défaut (chiffres significatifs).
pub const PRECISION_DEFAUT: u32 = 100;

/// Plancher : on ne descend jamais sous 100 chiffres.
pub const PRECISION_MIN: u32 = 100;

/// Garde-fou : au-delà, chaque division devient coûteuse.
pub const PRECISION_MAX: u32 = 2000;

/// Chiffres de garde des puissances entières (en plus de ceux de l’exposant).
const CHIFFRES_GARDE: u32 = 10;

/// Chiffres de garde de exp(y·ln x) : |y·ln x| peut approcher 10^17.
const CHIFFRES_GARDE_REELS: u32 = 30;

/// Exposant ajusté maximal (au-delà : Debordement ; en deçà de -MAX : zéro).
pub const EXPOSANT_MAX: i64 = 9_000_000_000_000_000;

/// Bornes de l’écriture “plate” (hors bornes : notation scientifique).
const EXP_NEG: i64 = -7;
const EXP_POS: i64 = 21;

static PRECISION: OnceLock<u32> = OnceLock::new();

/// Fixe la précision globale (bornée à [PRECISION_MIN, PRECISION_MAX]).
/// Un seul appel possible, et seulement avant le premier calcul.
pub fn configurer_precision(chiffres: u32) -> Result<u32, ErreurConfig> {
    let voulue = chiffres.clamp(PRECISION_MIN, PRECISION_MAX);
    if voulue != chiffres {
        log::warn!("précision {chiffres} bornée à {voulue}");
    }

    PRECISION
        .set(voulue)
        .map_err(|_| ErreurConfig::DejaFixee {
            actuelle: precision(),
        })?;

    log::info!("précision décimale : {voulue} chiffres significatifs");
    Ok(voulue)
}

/// Précision en vigueur (fixe le défaut si personne ne l’a configurée).
pub fn precision() -> u32 {
    *PRECISION.get_or_init(|| PRECISION_DEFAUT)
}

/// Lecture d’une précision depuis du texte (variable d’environnement, etc.).
pub fn lire_precision(brut: &str) -> Result<u32, ErreurConfig> {
    brut.trim()
        .parse::<u32>()
        .map_err(|_| ErreurConfig::Invalide(brut.to_string()))
}

/* ------------------------ Helpers BigDecimal ------------------------ */

fn arrondir(x: &BigDecimal, chiffres: u32) -> BigDecimal {
    let prec = NonZeroU64::new(u64::from(chiffres)).unwrap_or(NonZeroU64::MIN);
    x.with_precision_round(prec, RoundingMode::HalfUp).normalized()
}

/// Position du chiffre de tête : 123.4 -> 2, 0.05 -> -2 (0 pour zéro).
fn ajuste(x: &BigDecimal) -> i64 {
    if x.is_zero() {
        return 0;
    }
    let (_, echelle) = x.as_bigint_and_exponent();
    x.digits() as i64 - 1 - echelle
}

fn negatif(x: &BigDecimal) -> bool {
    x.sign() == Sign::Minus
}

/// x × 10^n, exact.
fn decaler(x: &BigDecimal, n: i64) -> BigDecimal {
    let (entier, echelle) = x.as_bigint_and_exponent();
    BigDecimal::new(entier, echelle - n).normalized()
}

fn hors_bornes(x: &BigDecimal) -> bool {
    ajuste(x).abs() > EXPOSANT_MAX
}

fn borner(x: BigDecimal) -> Result<BigDecimal, ErreurCalcul> {
    let e = ajuste(&x);
    if e > EXPOSANT_MAX {
        Err(ErreurCalcul::Debordement)
    } else if e < -EXPOSANT_MAX {
        Ok(BigDecimal::zero())
    } else {
        Ok(x)
    }
}

/// a / b arrondi à `chiffres` (b non nul).
/// Quotient entier tronqué d’au moins `chiffres + 1` chiffres, puis HalfUp.
fn diviser(a: &BigDecimal, b: &BigDecimal, chiffres: u32) -> BigDecimal {
    let (na, sa) = a.as_bigint_and_exponent();
    let (nb, sb) = b.as_bigint_and_exponent();
    let decalage = (i64::from(chiffres) + 1 + b.digits() as i64 - a.digits() as i64).max(0);

    let q = na * BigInt::from(10u8).pow(decalage as u32) / nb;
    arrondir(&BigDecimal::new(q, sa - sb + decalage), chiffres)
}

/// Un terme trop petit ne change pas l’arrondi : on ne l’aligne pas
/// (l’alignement des échelles matérialiserait tous les chiffres de l’écart).
fn somme(a: &BigDecimal, b: &BigDecimal, chiffres: u32) -> BigDecimal {
    if a.is_zero() {
        return arrondir(b, chiffres);
    }
    if b.is_zero() {
        return arrondir(a, chiffres);
    }
    let ecart = ajuste(a) - ajuste(b);
    let seuil = i64::from(chiffres) + 2;
    if ecart > seuil {
        return arrondir(a, chiffres);
    }
    if -ecart > seuil {
        return arrondir(b, chiffres);
    }
    arrondir(&(a + b), chiffres)
}

/* ------------------------ ln / exp ------------------------ */

/// atanh(s) = s + s³/3 + s⁵/5 + …  (|s| <= 1/3 ici)
fn atanh(s: &BigDecimal, chiffres: u32) -> BigDecimal {
    if s.is_zero() {
        return BigDecimal::zero();
    }
    let carre = arrondir(&(s * s), chiffres);
    let mut puissance = s.clone();
    let mut total = s.clone();
    let mut k = 1u32;
    loop {
        k += 2;
        puissance = arrondir(&(&puissance * &carre), chiffres);
        let terme = diviser(&puissance, &BigDecimal::from(k), chiffres);
        if terme.is_zero() || ajuste(&terme) < ajuste(&total) - i64::from(chiffres) - 2 {
            return total;
        }
        total = arrondir(&(&total + &terme), chiffres);
    }
}

/// ln r = 2·atanh((r-1)/(r+1)), pour r dans [1, 2].
fn ln_proche(r: &BigDecimal, chiffres: u32) -> BigDecimal {
    let un = BigDecimal::one();
    let s = diviser(&(r - &un), &(r + &un), chiffres);
    atanh(&s, chiffres) * BigDecimal::from(2u8)
}

fn ln2(chiffres: u32) -> BigDecimal {
    ln_proche(&BigDecimal::from(2u8), chiffres)
}

/// ln 10 = 3·ln 2 + ln 1.25
fn ln10(chiffres: u32) -> BigDecimal {
    let ln125 = ln_proche(&BigDecimal::new(BigInt::from(125u8), 2), chiffres);
    arrondir(&(ln2(chiffres) * BigDecimal::from(3u8) + ln125), chiffres)
}

/// ln x pour x > 0 : x = r × 2^j × 10^e, r dans [1, 2).
fn ln(x: &BigDecimal, chiffres: u32) -> BigDecimal {
    // e·ln10 avec |e| jusqu’à 9e15 : 20 chiffres de plus sur les constantes
    let w = chiffres + 20;
    let e = ajuste(x);
    let mut r = decaler(x, -e);

    let deux = BigDecimal::from(2u8);
    let demi = BigDecimal::new(BigInt::from(5u8), 1);
    let mut j = 0u8;
    while r >= deux {
        r = &r * &demi;
        j += 1;
    }

    let mut total = ln_proche(&r, w);
    if j > 0 {
        total += ln2(w) * BigDecimal::from(j);
    }
    if e != 0 {
        total += ln10(w) * BigDecimal::from(e);
    }
    arrondir(&total, chiffres)
}

/// exp z = 10^n × exp(z - n·ln10), |z - n·ln10| <= ~1.2, puis Taylor.
fn exp(z: &BigDecimal, chiffres: u32) -> Result<BigDecimal, ErreurCalcul> {
    if z.is_zero() {
        return Ok(BigDecimal::one());
    }
    // |z| >= 10^18 : 10^(z/ln10) sort forcément des bornes
    if ajuste(z) > 17 {
        return if negatif(z) {
            Ok(BigDecimal::zero())
        } else {
            Err(ErreurCalcul::Debordement)
        };
    }

    let w = chiffres + 20;
    let ln10 = ln10(w);
    let n = diviser(z, &ln10, w)
        .with_scale_round(0, RoundingMode::HalfEven)
        .to_i64()
        .ok_or(ErreurCalcul::Debordement)?;
    if n > EXPOSANT_MAX + 1 {
        return Err(ErreurCalcul::Debordement);
    }
    if n < -EXPOSANT_MAX - 1 {
        return Ok(BigDecimal::zero());
    }

    let r = arrondir(&(z - &(BigDecimal::from(n) * &ln10)), w);
    let mut terme = BigDecimal::one();
    let mut total = BigDecimal::one();
    let mut k = 0u32;
    loop {
        k += 1;
        terme = diviser(&arrondir(&(&terme * &r), w), &BigDecimal::from(k), w);
        if terme.is_zero() || ajuste(&terme) < -i64::from(w) - 2 {
            break;
        }
        total = arrondir(&(&total + &terme), w);
    }
    Ok(decaler(&total, n))
}

/// b^n, n naturel, carré-et-multiplie. `None` dès qu’un facteur sort des bornes
/// (tous les facteurs vont dans le même sens : |b| > 1 grandit, |b| < 1 s’annule).
fn puissance_naturelle(base: &BigDecimal, mut n: u64, chiffres: u32) -> Option<BigDecimal> {
    let mut base = base.clone();
    let mut acc = BigDecimal::one();
    loop {
        if n & 1 == 1 {
            acc = arrondir(&(&acc * &base), chiffres);
            if hors_bornes(&acc) {
                return None;
            }
        }
        n >>= 1;
        if n == 0 {
            return Some(acc);
        }
        base = arrondir(&(&base * &base), chiffres);
        if hors_bornes(&base) {
            return None;
        }
    }
}

/// x^y par exp(y·ln|x|) ; si x < 0 (y alors entier), le signe suit la parité de y.
fn puissance_reelle(x: &BigDecimal, y: &BigDecimal, p: u32) -> Result<BigDecimal, ErreurCalcul> {
    let w = p + CHIFFRES_GARDE_REELS;
    let z = arrondir(&(y * &ln(&x.abs(), w)), w);
    let v = exp(&z, w)?;

    let (entier, echelle) = y.as_bigint_and_exponent();
    let impair = echelle == 0 && entier.magnitude().bit(0);
    Ok(if negatif(x) && impair { -v } else { v })
}

/* ------------------------ Décimal ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn un() -> Self {
        Self(BigDecimal::one())
    }

    pub fn est_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplie par 10^n (exact).
    pub fn decaler(&self, n: i64) -> Self {
        Self(decaler(&self.0, n))
    }

    /* ------------------------ Opérations ------------------------ */

    pub fn add(&self, autre: &Self) -> Result<Self, ErreurCalcul> {
        borner(somme(&self.0, &autre.0, precision())).map(Self)
    }

    pub fn sub(&self, autre: &Self) -> Result<Self, ErreurCalcul> {
        borner(somme(&self.0, &(-autre.0.clone()), precision())).map(Self)
    }

    pub fn mul(&self, autre: &Self) -> Result<Self, ErreurCalcul> {
        borner(arrondir(&(&self.0 * &autre.0), precision())).map(Self)
    }

    pub fn div(&self, autre: &Self) -> Result<Self, ErreurCalcul> {
        if autre.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        borner(diviser(&self.0, &autre.0, precision())).map(Self)
    }

    /// Puissance réelle, comme la bibliothèque décimale d’origine.
    ///
    /// - 0^0 = 1, 0^y = 0 (y > 0), 0^y avec y < 0 : `DivisionParZero`
    /// - base négative, exposant non entier : `PuissanceNonReelle`
    /// - exposant entier tenant sur 64 bits : carré-et-multiplie, inverse si y < 0
    /// - sinon : exp(y·ln|x|) avec chiffres de garde
    pub fn pow(&self, exposant: &Self) -> Result<Self, ErreurCalcul> {
        let p = precision();
        let (x, y) = (&self.0, &exposant.0);

        if y.is_zero() {
            return Ok(Self::un());
        }
        let y_negatif = negatif(y);
        if x.is_zero() {
            return if y_negatif {
                Err(ErreurCalcul::DivisionParZero)
            } else {
                Ok(Self::zero())
            };
        }

        let brut = if !y.is_integer() {
            if negatif(x) {
                return Err(ErreurCalcul::PuissanceNonReelle);
            }
            puissance_reelle(x, y, p)?
        } else {
            let n = if ajuste(y) < 19 { y.abs().to_u64() } else { None };
            match n {
                Some(n) => {
                    let w = p + CHIFFRES_GARDE + n.to_string().len() as u32;
                    match puissance_naturelle(x, n, w) {
                        Some(v) if y_negatif => diviser(&BigDecimal::one(), &v, w),
                        Some(v) => v,
                        // b^|n| hors bornes : débordement, ou zéro une fois inversé
                        None => {
                            let grandit = (x.abs() > BigDecimal::one()) != y_negatif;
                            if grandit {
                                return Err(ErreurCalcul::Debordement);
                            }
                            BigDecimal::zero()
                        }
                    }
                }
                None => puissance_reelle(x, y, p)?,
            }
        };

        borner(arrondir(&brut, p)).map(Self)
    }

    /* ------------------------ Rendu ------------------------ */

    /// Écriture plate avec exactement `decimales` chiffres après la virgule
    /// (arrondi demi vers le haut, complétée par des zéros).
    pub fn to_fixed(&self, decimales: u32) -> String {
        self.0
            .with_scale_round(i64::from(decimales), RoundingMode::HalfUp)
            .to_plain_string()
    }
}

/// Chaîne exacte : écriture plate si l’exposant ajusté est dans [-7, 21),
/// notation scientifique sinon (1e+21, 1.5e-7).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_zero() {
            return f.write_str("0");
        }

        let x = ajuste(&self.0);
        if x > EXP_NEG && x < EXP_POS {
            return f.write_str(&self.0.to_plain_string());
        }

        let (entier, _) = self.0.as_bigint_and_exponent();
        if entier.sign() == Sign::Minus {
            f.write_str("-")?;
        }
        let chiffres = entier.magnitude().to_str_radix(10);
        let (tete, queue) = chiffres.split_at(1);
        f.write_str(tete)?;
        if !queue.is_empty() {
            write!(f, ".{queue}")?;
        }
        write!(f, "e{}{}", if x < 0 { '-' } else { '+' }, x.abs())
    }
}

impl From<u8> for Decimal {
    fn from(v: u8) -> Self {
        Self(BigDecimal::from(v).normalized())
    }
}

/// Littéral décimal (syntaxe de la crate), arrondi à la précision.
impl FromStr for Decimal {
    type Err = LitteralInvalide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let brut = BigDecimal::from_str(s.trim()).map_err(|_| LitteralInvalide(s.to_string()))?;
        Ok(Self(arrondir(&brut, precision())))
    }
}
