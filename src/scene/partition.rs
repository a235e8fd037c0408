//! Opsplitsen van simplexen in wel/niet-vervullende groepen per propositie.

use crate::complex::color::{ColorTable, Rgb, resolve_color};
use crate::complex::valuation::{ValuationError, ValuationTable};
use crate::complex::{Arity, SimplicialComplex};

use super::SceneError;

/// Geometrie van één simplex binnen een partitie.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexGeom {
    /// Globale simplexindex in laadvolgorde.
    pub global_index: usize,
    /// Hoekpuntcoördinaten, in de volgorde van de simplexdefinitie.
    pub corners: Vec<[f64; 3]>,
    /// Weergavekleur, al opgelost tegen de kleurtabel.
    pub color: Rgb,
}

/// Resultaat van één partitie: eerst de simplexen waarvoor de propositie
/// geldt, dan de rest. Binnen beide groepen blijft de aantreffingsvolgorde
/// behouden; er wordt verder niet gesorteerd.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub satisfying: Vec<SimplexGeom>,
    pub non_satisfying: Vec<SimplexGeom>,
}

impl Partition {
    /// Grensindex voor de tekenlaag. Dit is een *simplex*-aantal en wordt
    /// nooit afgeleid uit de lengte van een platgeslagen coördinatenbuffer.
    #[must_use]
    pub fn satisfying_count(&self) -> usize {
        self.satisfying.len()
    }

    /// Totaal aantal gepartitioneerde simplexen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.satisfying.len() + self.non_satisfying.len()
    }
}

/// Verdeelt de simplexen van één ariteit over de twee groepen van `atom`.
/// Simplexen van een andere ariteit worden overgeslagen maar behouden hun
/// indexslot in `row`. Een rijlengte die niet met het model overeenkomt is
/// een fatale invoerfout.
pub fn partition(
    complex: &SimplicialComplex,
    arity: Arity,
    atom: &str,
    row: &[bool],
    colors: Option<&ColorTable>,
    valuations: &ValuationTable,
    fallback: Rgb,
) -> Result<Partition, SceneError> {
    if row.len() != complex.simplex_count() {
        return Err(ValuationError::LengthMismatch {
            atom: atom.to_owned(),
            expected: complex.simplex_count(),
            found: row.len(),
        }
        .into());
    }

    let mut result = Partition::default();
    for simplex in complex.simplices() {
        if simplex.arity() != Some(arity) {
            continue;
        }

        let geom = SimplexGeom {
            global_index: simplex.global_index,
            corners: complex.corners_of(simplex),
            color: resolve_color(colors, valuations, simplex.global_index, fallback),
        };

        if row[simplex.global_index] {
            result.satisfying.push(geom);
        } else {
            result.non_satisfying.push(geom);
        }
    }

    Ok(result)
}
