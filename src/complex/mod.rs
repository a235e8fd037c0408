//! Kern datastructuren voor het simpliciale model.

use std::fmt;

pub mod color;
pub mod valuation;

/// Dimensieklasse van een simplex, bepaald door het aantal hoekpunten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Point,
    Edge,
    Triangle,
    Tetrahedron,
}

impl Arity {
    /// Alle ondersteunde ariteiten, in oplopende dimensie.
    pub const ALL: [Arity; 4] = [
        Arity::Point,
        Arity::Edge,
        Arity::Triangle,
        Arity::Tetrahedron,
    ];

    /// Classificeert op het aantal hoekpunten. Simplexen met 0 of met 5 of
    /// meer hoekpunten vallen buiten de viewer en leveren `None`.
    #[must_use]
    pub const fn from_vertex_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Point),
            2 => Some(Self::Edge),
            3 => Some(Self::Triangle),
            4 => Some(Self::Tetrahedron),
            _ => None,
        }
    }

    /// Aantal hoekpunten van één simplex van deze ariteit.
    #[must_use]
    pub const fn vertex_count(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Edge => 2,
            Self::Triangle => 3,
            Self::Tetrahedron => 4,
        }
    }

    /// Aantal punten dat één simplex in de tekenbuffer inneemt. Een
    /// tetraëder wordt als vier losse driehoeksvlakken getekend en neemt dus
    /// twaalf bufferpunten in.
    #[must_use]
    pub const fn corners_per_simplex(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Edge => 2,
            Self::Triangle => 3,
            Self::Tetrahedron => 12,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "punt",
            Self::Edge => "lijnstuk",
            Self::Triangle => "driehoek",
            Self::Tetrahedron => "tetraëder",
        };
        f.write_str(name)
    }
}

/// Eén simplex: een geordende lijst hoekpunt-indices plus zijn positie in de
/// laadvolgorde. De globale index is de sleutel in de valuatietabel en wordt
/// expliciet opgeslagen in plaats van uit een luspositie afgeleid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplex {
    /// Positie in de laadvolgorde over alle ariteiten heen.
    pub global_index: usize,
    /// Indices in de hoekpuntenlijst van het complex.
    pub vertices: Vec<usize>,
}

impl Simplex {
    /// Ariteit van deze simplex, of `None` bij een niet-ondersteund aantal
    /// hoekpunten.
    #[must_use]
    pub fn arity(&self) -> Option<Arity> {
        Arity::from_vertex_count(self.vertices.len())
    }
}

/// Onveranderlijk simpliciaal complex: hoekpuntcoördinaten plus simplexen in
/// laadvolgorde. Eenmaal geconstrueerd wordt er niets meer aan gemuteerd.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplicialComplex {
    points: Vec<[f64; 3]>,
    simplices: Vec<Simplex>,
}

impl SimplicialComplex {
    /// Bouw een complex uit hoekpunten en per simplex een lijst
    /// hoekpunt-indices. Elke verwijzing naar een niet-bestaand hoekpunt is
    /// een fout; ook simplexen van een niet-ondersteunde ariteit worden
    /// gecontroleerd, omdat ze een indexslot in de valuatietabel innemen.
    pub fn new(
        points: Vec<[f64; 3]>,
        vertex_lists: Vec<Vec<usize>>,
    ) -> Result<Self, ComplexError> {
        let mut simplices = Vec::with_capacity(vertex_lists.len());
        for (global_index, vertices) in vertex_lists.into_iter().enumerate() {
            if let Some(out_of_range) = vertices.iter().copied().find(|v| *v >= points.len()) {
                return Err(ComplexError::VertexOutOfRange {
                    simplex: global_index,
                    vertex: out_of_range,
                    point_count: points.len(),
                });
            }
            simplices.push(Simplex {
                global_index,
                vertices,
            });
        }
        Ok(Self { points, simplices })
    }

    #[must_use]
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    #[must_use]
    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    /// Totaal aantal simplexen, inclusief die van niet-ondersteunde ariteit.
    /// Dit is de verwachte rijlengte van de valuatietabel.
    #[must_use]
    pub fn simplex_count(&self) -> usize {
        self.simplices.len()
    }

    /// Aantal simplexen van één ariteit.
    #[must_use]
    pub fn count_of(&self, arity: Arity) -> usize {
        self.simplices
            .iter()
            .filter(|simplex| simplex.arity() == Some(arity))
            .count()
    }

    /// Hoekpuntcoördinaten van één simplex, in definitievolgorde.
    #[must_use]
    pub fn corners_of(&self, simplex: &Simplex) -> Vec<[f64; 3]> {
        simplex
            .vertices
            .iter()
            .map(|vertex| self.points[*vertex])
            .collect()
    }
}

/// Fouten bij het opbouwen van het complex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexError {
    VertexOutOfRange {
        simplex: usize,
        vertex: usize,
        point_count: usize,
    },
}

impl fmt::Display for ComplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange {
                simplex,
                vertex,
                point_count,
            } => write!(
                f,
                "simplex {simplex} verwijst naar hoekpunt {vertex}, maar het model telt er {point_count}"
            ),
        }
    }
}

impl std::error::Error for ComplexError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_points() -> Vec<[f64; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn classifies_supported_arities() {
        assert_eq!(Arity::from_vertex_count(1), Some(Arity::Point));
        assert_eq!(Arity::from_vertex_count(4), Some(Arity::Tetrahedron));
        assert_eq!(Arity::from_vertex_count(0), None);
        assert_eq!(Arity::from_vertex_count(5), None);
    }

    #[test]
    fn global_indices_follow_load_order() {
        let complex = SimplicialComplex::new(
            unit_points(),
            vec![vec![0], vec![0, 1], vec![0, 1, 2, 3]],
        )
        .unwrap();

        let indices: Vec<usize> = complex
            .simplices()
            .iter()
            .map(|simplex| simplex.global_index)
            .collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(complex.count_of(Arity::Point), 1);
        assert_eq!(complex.count_of(Arity::Tetrahedron), 1);
    }

    #[test]
    fn unsupported_arity_still_consumes_an_index_slot() {
        let complex = SimplicialComplex::new(
            unit_points(),
            vec![vec![0], vec![0, 1, 2, 3, 0], vec![1]],
        )
        .unwrap();

        assert_eq!(complex.simplex_count(), 3);
        assert_eq!(complex.count_of(Arity::Point), 2);
        assert_eq!(complex.simplices()[2].global_index, 2);
    }

    #[test]
    fn rejects_vertex_reference_out_of_range() {
        let err = SimplicialComplex::new(unit_points(), vec![vec![0, 7]]).unwrap_err();
        assert!(matches!(
            err,
            ComplexError::VertexOutOfRange {
                simplex: 0,
                vertex: 7,
                point_count: 4
            }
        ));
    }
}
