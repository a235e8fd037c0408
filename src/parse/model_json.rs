//! Parser voor de JSON-documenten: geometrie, valuaties en kleuren.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::complex::color::{ColorTable, Rgb};
use crate::complex::valuation::ValuationTable;
use crate::complex::{ComplexError, SimplicialComplex};

/// Result type voor het parsen van documenten.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het parsen.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Het JSON-document kon niet gede-serialiseerd worden.
    #[error("JSON parsefout: {0}")]
    Json(#[from] serde_json::Error),
    /// Het geometriedocument schendt een modelinvariant.
    #[error("ongeldig model: {0}")]
    Model(#[from] ComplexError),
}

/// Het geometriedocument zoals de viewer het aangeleverd krijgt.
#[derive(Debug, Deserialize)]
pub struct GeometryDocument {
    /// Hoekpuntcoördinaten, geïndexeerd door de simplexdefinities.
    #[serde(rename = "coordinatesOfPoints")]
    pub coordinates_of_points: Vec<[f64; 3]>,
    /// Simplexen in laadvolgorde; de positie is de globale simplexindex.
    pub simplexes: Vec<SimplexEntry>,
}

/// Eén simplexregel. Overige velden in het document (zoals een ingebedde
/// atoomlijst uit oudere exports) worden genegeerd.
#[derive(Debug, Deserialize)]
pub struct SimplexEntry {
    pub points: Vec<usize>,
}

/// Leest een geometriedocument en bouwt er een [`SimplicialComplex`] van.
pub fn parse_model_str(input: &str) -> ParseResult<SimplicialComplex> {
    log::debug!("start parsing geometriedocument");
    let document: GeometryDocument = serde_json::from_str(input)?;
    log::debug!(
        "gevonden: {} hoekpunten, {} simplexen",
        document.coordinates_of_points.len(),
        document.simplexes.len()
    );

    let vertex_lists = document
        .simplexes
        .into_iter()
        .map(|entry| entry.points)
        .collect();

    Ok(SimplicialComplex::new(
        document.coordinates_of_points,
        vertex_lists,
    )?)
}

/// Leest een valuatiedocument: propositienaam naar booleaanse rij, met
/// behoud van declaratievolgorde.
pub fn parse_valuations_str(input: &str) -> ParseResult<ValuationTable> {
    let rows: IndexMap<String, Vec<bool>> = serde_json::from_str(input)?;
    Ok(ValuationTable::new(rows))
}

/// Leest een kleurdocument: propositienaam naar `0xRRGGBB`-kleur, met behoud
/// van declaratievolgorde (de prioriteitsvolgorde bij kleurresolutie).
pub fn parse_colors_str(input: &str) -> ParseResult<ColorTable> {
    let entries: IndexMap<String, Rgb> = serde_json::from_str(input)?;
    Ok(ColorTable::new(entries))
}
