//! Scène-opbouw: van gevalideerde documenten naar tekenbuffers.

pub mod partition;
pub mod shrink;

use indexmap::IndexMap;
use thiserror::Error;

use crate::complex::color::{ColorTable, Rgb, resolve_color};
use crate::complex::valuation::{ValuationError, ValuationTable};
use crate::complex::{Arity, SimplicialComplex};

use partition::partition;
use shrink::{barycenter, resize_tetrahedra, shrink_tetrahedron};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Standaardkleuren per ariteit, overgenomen van de oorspronkelijke viewer.
pub const DEFAULT_POINT_COLOR: Rgb = 0x00ff00;
pub const DEFAULT_EDGE_COLOR: Rgb = 0x0000ff;
pub const DEFAULT_TRIANGLE_COLOR: Rgb = 0xff0000;
pub const DEFAULT_TETRAHEDRON_COLOR: Rgb = 0xff0000;

/// Standaard verkleiningsfactor voor tetraëders.
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.3;

/// Terugvalkleur voor simplexen van één ariteit.
#[must_use]
pub const fn default_color(arity: Arity) -> Rgb {
    match arity {
        Arity::Point => DEFAULT_POINT_COLOR,
        Arity::Edge => DEFAULT_EDGE_COLOR,
        Arity::Triangle => DEFAULT_TRIANGLE_COLOR,
        Arity::Tetrahedron => DEFAULT_TETRAHEDRON_COLOR,
    }
}

/// Fouten bij het opbouwen van een scène.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// Eén tekenbuffer: posities, per-simplex kleuren en de groepsgrens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerBuffer {
    /// Bufferpunten, `corners_per_simplex` punten per simplex; eerst de
    /// vervullende groep, dan de rest.
    pub positions: Vec<[f64; 3]>,
    /// Opgeloste kleur per simplex (niet per bufferpunt).
    pub colors: Vec<Rgb>,
    /// Aantal simplexen in de vervullende groep; de grens waarop de
    /// tekenlaag haar materiaalgroepen splitst.
    pub satisfying_count: usize,
}

/// Buffers voor de vier ariteiten van één laag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerSet {
    pub points: LayerBuffer,
    pub edges: LayerBuffer,
    pub triangles: LayerBuffer,
    pub tetrahedra: LayerBuffer,
}

impl LayerSet {
    #[must_use]
    pub fn buffer(&self, arity: Arity) -> &LayerBuffer {
        match arity {
            Arity::Point => &self.points,
            Arity::Edge => &self.edges,
            Arity::Triangle => &self.triangles,
            Arity::Tetrahedron => &self.tetrahedra,
        }
    }

    fn buffer_mut(&mut self, arity: Arity) -> &mut LayerBuffer {
        match arity {
            Arity::Point => &mut self.points,
            Arity::Edge => &mut self.edges,
            Arity::Triangle => &mut self.triangles,
            Arity::Tetrahedron => &mut self.tetrahedra,
        }
    }
}

/// Ondersteuningsdata om tetraëderbuffers in situ te kunnen herschalen:
/// oorspronkelijke hoekpunten (vier per tetraëder, in buffervolgorde) en het
/// zwaartepunt per tetraëder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TetraSupport {
    pub corners: Vec<[f64; 3]>,
    pub barycenters: Vec<[f64; 3]>,
}

/// Eén laag: de tekenbuffers plus de herschalingsdata voor tetraëders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneLayer {
    pub set: LayerSet,
    pub tetra: TetraSupport,
}

/// Volledige momentopname van één geladen model. Bij nieuwe invoer bouwt de
/// aanroeper een verse `SceneData` en vervangt de oude in zijn geheel; de
/// enige mutatie is de verkleiningsfactor, die uitsluitend
/// tetraëderposities herschrijft.
#[derive(Debug, Clone)]
pub struct SceneData {
    complex: SimplicialComplex,
    valuations: ValuationTable,
    colors: Option<ColorTable>,
    shrink_factor: f64,
    base: SceneLayer,
    properties: IndexMap<String, SceneLayer>,
}

impl SceneData {
    /// Bouwt de scène in één synchrone doorloop: de basislaag in
    /// laadvolgorde plus per propositie een gepartitioneerde laag. Een lege
    /// valuatietabel levert een scène zonder propositielagen op.
    pub fn load(
        complex: SimplicialComplex,
        valuations: ValuationTable,
        colors: Option<ColorTable>,
        shrink_factor: f64,
    ) -> Result<Self, SceneError> {
        valuations.validate(complex.simplex_count())?;

        let base = build_base_layer(&complex, &valuations, colors.as_ref(), shrink_factor);

        let entries: Vec<(&str, &[bool])> = valuations.iter().collect();
        let built = build_property_layers(&complex, &valuations, colors.as_ref(), shrink_factor, &entries)?;

        let properties = entries
            .iter()
            .map(|(atom, _)| (*atom).to_owned())
            .zip(built)
            .collect();

        Ok(Self {
            complex,
            valuations,
            colors,
            shrink_factor,
            base,
            properties,
        })
    }

    #[must_use]
    pub fn complex(&self) -> &SimplicialComplex {
        &self.complex
    }

    #[must_use]
    pub fn valuations(&self) -> &ValuationTable {
        &self.valuations
    }

    #[must_use]
    pub fn colors(&self) -> Option<&ColorTable> {
        self.colors.as_ref()
    }

    #[must_use]
    pub fn shrink_factor(&self) -> f64 {
        self.shrink_factor
    }

    #[must_use]
    pub fn base(&self) -> &SceneLayer {
        &self.base
    }

    /// Propositielagen in declaratievolgorde van het valuatiedocument.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SceneLayer)> {
        self.properties
            .iter()
            .map(|(atom, layer)| (atom.as_str(), layer))
    }

    #[must_use]
    pub fn property(&self, atom: &str) -> Option<&SceneLayer> {
        self.properties.get(atom)
    }

    /// Herschrijft alle tetraëderbuffers in situ voor de nieuwe factor.
    /// Andere buffers blijven onaangeroerd; er wordt niets gealloceerd.
    pub fn set_shrink_factor(&mut self, factor: f64) {
        self.shrink_factor = factor;
        resize_layer_tetrahedra(&mut self.base, factor);
        for layer in self.properties.values_mut() {
            resize_layer_tetrahedra(layer, factor);
        }
    }
}

fn resize_layer_tetrahedra(layer: &mut SceneLayer, factor: f64) {
    resize_tetrahedra(
        &mut layer.set.tetrahedra.positions,
        &layer.tetra.corners,
        &layer.tetra.barycenters,
        factor,
    );
}

#[cfg(feature = "parallel")]
fn build_property_layers(
    complex: &SimplicialComplex,
    valuations: &ValuationTable,
    colors: Option<&ColorTable>,
    shrink_factor: f64,
    entries: &[(&str, &[bool])],
) -> Result<Vec<SceneLayer>, SceneError> {
    entries
        .par_iter()
        .map(|(atom, row)| build_property_layer(complex, valuations, colors, shrink_factor, atom, row))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_property_layers(
    complex: &SimplicialComplex,
    valuations: &ValuationTable,
    colors: Option<&ColorTable>,
    shrink_factor: f64,
    entries: &[(&str, &[bool])],
) -> Result<Vec<SceneLayer>, SceneError> {
    entries
        .iter()
        .map(|(atom, row)| build_property_layer(complex, valuations, colors, shrink_factor, atom, row))
        .collect()
}

fn build_property_layer(
    complex: &SimplicialComplex,
    valuations: &ValuationTable,
    colors: Option<&ColorTable>,
    shrink_factor: f64,
    atom: &str,
    row: &[bool],
) -> Result<SceneLayer, SceneError> {
    let mut layer = SceneLayer::default();

    for arity in Arity::ALL {
        let part = partition(complex, arity, atom, row, colors, valuations, default_color(arity))?;

        let buffer = layer.set.buffer_mut(arity);
        buffer.satisfying_count = part.satisfying_count();

        for geom in part.satisfying.iter().chain(&part.non_satisfying) {
            if arity == Arity::Tetrahedron {
                push_tetrahedron(buffer, &mut layer.tetra, &geom.corners, shrink_factor);
            } else {
                buffer.positions.extend_from_slice(&geom.corners);
            }
            buffer.colors.push(geom.color);
        }
    }

    Ok(layer)
}

fn build_base_layer(
    complex: &SimplicialComplex,
    valuations: &ValuationTable,
    colors: Option<&ColorTable>,
    shrink_factor: f64,
) -> SceneLayer {
    let mut layer = SceneLayer::default();

    for simplex in complex.simplices() {
        let Some(arity) = simplex.arity() else {
            continue;
        };

        let corners = complex.corners_of(simplex);
        let color = resolve_color(colors, valuations, simplex.global_index, default_color(arity));

        let buffer = layer.set.buffer_mut(arity);
        if arity == Arity::Tetrahedron {
            push_tetrahedron(buffer, &mut layer.tetra, &corners, shrink_factor);
        } else {
            buffer.positions.extend_from_slice(&corners);
        }
        buffer.colors.push(color);

        // de basislaag kent één tekengroep die alles omvat
        buffer.satisfying_count = buffer.colors.len();
    }

    layer
}

fn push_tetrahedron(
    buffer: &mut LayerBuffer,
    support: &mut TetraSupport,
    corners: &[[f64; 3]],
    shrink_factor: f64,
) {
    let tet = [corners[0], corners[1], corners[2], corners[3]];
    support.corners.extend_from_slice(&tet);
    support.barycenters.push(barycenter(&tet));
    buffer
        .positions
        .extend_from_slice(&shrink_tetrahedron(&tet, shrink_factor));
}

#[cfg(test)]
mod tests {
    use super::shrink::POINTS_PER_TETRAHEDRON;
    use super::*;
    use crate::complex::valuation::ValuationTable;
    use indexmap::IndexMap;

    fn single_tetra_complex() -> SimplicialComplex {
        SimplicialComplex::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            vec![vec![0, 1, 2, 3]],
        )
        .unwrap()
    }

    fn valuations(entries: &[(&str, &[bool])]) -> ValuationTable {
        ValuationTable::new(
            entries
                .iter()
                .map(|(atom, row)| ((*atom).to_owned(), row.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn single_satisfied_tetrahedron_fills_the_satisfying_group() {
        let scene = SceneData::load(
            single_tetra_complex(),
            valuations(&[("p", &[true])]),
            None,
            0.5,
        )
        .unwrap();

        let layer = scene.property("p").expect("laag voor p");
        assert_eq!(layer.set.tetrahedra.satisfying_count, 1);
        assert_eq!(layer.set.tetrahedra.positions.len(), POINTS_PER_TETRAHEDRON);
        assert_eq!(layer.tetra.barycenters.len(), 1);
        assert_eq!(layer.set.points.positions.len(), 0);
    }

    #[test]
    fn empty_valuation_table_yields_no_property_layers() {
        let scene = SceneData::load(
            single_tetra_complex(),
            ValuationTable::new(IndexMap::new()),
            None,
            DEFAULT_SHRINK_FACTOR,
        )
        .unwrap();

        assert_eq!(scene.properties().count(), 0);
        // de basislaag bestaat wel
        assert_eq!(scene.base().set.tetrahedra.positions.len(), POINTS_PER_TETRAHEDRON);
    }

    #[test]
    fn row_length_mismatch_refuses_to_build() {
        let err = SceneData::load(
            single_tetra_complex(),
            valuations(&[("p", &[true, false])]),
            None,
            DEFAULT_SHRINK_FACTOR,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SceneError::Valuation(ValuationError::LengthMismatch { expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn shrink_factor_update_keeps_buffer_lengths() {
        let mut scene = SceneData::load(
            single_tetra_complex(),
            valuations(&[("p", &[true])]),
            None,
            0.3,
        )
        .unwrap();

        let before = scene.property("p").unwrap().set.tetrahedra.positions.clone();
        scene.set_shrink_factor(1.0);
        let layer = scene.property("p").unwrap();

        assert_eq!(layer.set.tetrahedra.positions.len(), before.len());
        assert_ne!(layer.set.tetrahedra.positions, before);
        assert_eq!(scene.shrink_factor(), 1.0);

        // factor 1.0 reproduceert de oorspronkelijke hoekpunten
        assert_eq!(layer.set.tetrahedra.positions[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn base_layer_group_spans_everything() {
        let complex = SimplicialComplex::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            vec![vec![0], vec![1], vec![0, 1]],
        )
        .unwrap();

        let scene = SceneData::load(
            complex,
            valuations(&[("p", &[true, false, false])]),
            None,
            DEFAULT_SHRINK_FACTOR,
        )
        .unwrap();

        assert_eq!(scene.base().set.points.satisfying_count, 2);
        assert_eq!(scene.base().set.edges.satisfying_count, 1);
        // propositielaag splitst wel
        let layer = scene.property("p").unwrap();
        assert_eq!(layer.set.points.satisfying_count, 1);
    }
}
