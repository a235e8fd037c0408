//! Kleurtabel en kleurresolutie per simplex.

use indexmap::IndexMap;

use super::valuation::ValuationTable;

/// Kleur als geheel getal in `0xRRGGBB`-vorm, zoals in het kleurdocument.
pub type Rgb = u32;

/// Geordende tabel van propositienaam naar kleur. De declaratievolgorde is
/// de prioriteitsvolgorde: bij een simplex dat meerdere gekleurde proposities
/// vervult wint de eerst gedeclareerde.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: IndexMap<String, Rgb>,
}

impl ColorTable {
    #[must_use]
    pub fn new(entries: IndexMap<String, Rgb>) -> Self {
        Self { entries }
    }

    /// Tabelregels in declaratievolgorde.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(atom, color)| (atom.as_str(), *color))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Kiest de weergavekleur van één simplex. Zonder kleurtabel geldt altijd de
/// terugvalkleur; anders wint de eerst gedeclareerde tabelregel waarvan de
/// propositie op deze index waar is. Een tabelregel zonder bijbehorende
/// valuatierij telt als niet-vervuld en is geen fout.
#[must_use]
pub fn resolve_color(
    colors: Option<&ColorTable>,
    valuations: &ValuationTable,
    index: usize,
    fallback: Rgb,
) -> Rgb {
    let Some(colors) = colors else {
        return fallback;
    };

    for (atom, color) in colors.iter() {
        let holds = valuations
            .row(atom)
            .is_some_and(|row| row.get(index).copied().unwrap_or(false));
        if holds {
            return color;
        }
    }

    fallback
}

/// Pakt `0xRRGGBB` uit naar drie componenten in het bereik [0, 1], in de
/// volgorde die de tekenlaag in haar kleurattribuut verwacht.
#[must_use]
pub fn unpack_rgb(color: Rgb) -> [f64; 3] {
    [
        f64::from((color >> 16) & 0xff) / 255.0,
        f64::from((color >> 8) & 0xff) / 255.0,
        f64::from(color & 0xff) / 255.0,
    ]
}
