//! Valuatietabel: per atomaire propositie één boolean per simplexindex.

use indexmap::IndexMap;
use thiserror::Error;

/// Geordende tabel van propositienaam naar booleaanse rij. De volgorde is de
/// declaratievolgorde van het valuatiedocument en bepaalt onder meer de
/// volgorde van de GUI-keuzelijst.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuationTable {
    rows: IndexMap<String, Vec<bool>>,
}

/// Schendingen van de tabelinvarianten.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValuationError {
    /// Een rij dekt niet precies alle simplexindices.
    #[error(
        "valuatie voor `{atom}` heeft lengte {found}, maar het model telt {expected} simplexen"
    )]
    LengthMismatch {
        atom: String,
        expected: usize,
        found: usize,
    },
}

impl ValuationTable {
    #[must_use]
    pub fn new(rows: IndexMap<String, Vec<bool>>) -> Self {
        Self { rows }
    }

    /// Controleer dat elke rij exact één boolean per simplexindex bevat.
    /// Een afwijkende lengte is een fatale invoerfout; er wordt nooit
    /// stilzwijgend afgekapt of aangevuld.
    pub fn validate(&self, simplex_count: usize) -> Result<(), ValuationError> {
        for (atom, row) in &self.rows {
            if row.len() != simplex_count {
                return Err(ValuationError::LengthMismatch {
                    atom: atom.clone(),
                    expected: simplex_count,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Propositienamen in declaratievolgorde.
    pub fn atom_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    #[must_use]
    pub fn row(&self, atom: &str) -> Option<&[bool]> {
        self.rows.get(atom).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.rows
            .iter()
            .map(|(atom, row)| (atom.as_str(), row.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &[bool])]) -> ValuationTable {
        ValuationTable::new(
            entries
                .iter()
                .map(|(atom, row)| ((*atom).to_owned(), row.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn accepts_rows_matching_simplex_count() {
        let table = table(&[("p", &[true, false]), ("q", &[false, false])]);
        assert!(table.validate(2).is_ok());
    }

    #[test]
    fn rejects_row_with_wrong_length() {
        let table = table(&[("p", &[true, false]), ("q", &[false])]);
        let err = table.validate(2).unwrap_err();
        assert_eq!(
            err,
            ValuationError::LengthMismatch {
                atom: "q".to_owned(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn atom_names_keep_declaration_order() {
        let table = table(&[("zz", &[]), ("aa", &[]), ("mm", &[])]);
        let names: Vec<&str> = table.atom_names().collect();
        assert_eq!(names, ["zz", "aa", "mm"]);
    }
}
