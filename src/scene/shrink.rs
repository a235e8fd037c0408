//! Verkleinde tetraëdergeometrie voor visuele scheiding.

/// Hoekpunt-tripels van de vier zijvlakken, in vaste volgorde. De tekenlaag
/// rekent op exact deze winding; de volgorde is een contract, geen detail.
pub const FACE_CORNERS: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [1, 3, 2], [0, 2, 3]];

/// Aantal bufferpunten per tetraëder: vier zijvlakken van elk drie punten.
pub const POINTS_PER_TETRAHEDRON: usize = 12;

/// Rekenkundig gemiddelde van de vier hoekpunten.
#[must_use]
pub fn barycenter(corners: &[[f64; 3]; 4]) -> [f64; 3] {
    let mut center = [0.0; 3];
    for corner in corners {
        center[0] += corner[0];
        center[1] += corner[1];
        center[2] += corner[2];
    }
    [center[0] / 4.0, center[1] / 4.0, center[2] / 4.0]
}

fn lerp(from: [f64; 3], to: [f64; 3], t: f64) -> [f64; 3] {
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}

/// Schaalt een tetraëder naar zijn zwaartepunt toe en geeft de twaalf
/// bufferpunten van de vier zijvlakken terug. Factor 1.0 laat het origineel
/// intact, 0.0 laat alles samenvallen met het zwaartepunt. Waarden buiten
/// [0, 1] extrapoleren; er wordt hier nooit geklemd, dat is aan de UI.
#[must_use]
pub fn shrink_tetrahedron(
    corners: &[[f64; 3]; 4],
    factor: f64,
) -> [[f64; 3]; POINTS_PER_TETRAHEDRON] {
    let center = barycenter(corners);
    let shrunk = shrink_corners(center, corners, factor);

    let mut faces = [[0.0; 3]; POINTS_PER_TETRAHEDRON];
    write_faces(&mut faces, &shrunk);
    faces
}

/// Herschrijft een bestaande tetraëderbuffer in situ voor een nieuwe factor.
/// Alleen de `12 * barycenters.len()` punten vooraan worden overschreven; de
/// buffer wordt niet opnieuw gealloceerd en houdt zijn lengte.
pub fn resize_tetrahedra(
    positions: &mut [[f64; 3]],
    corners: &[[f64; 3]],
    barycenters: &[[f64; 3]],
    factor: f64,
) {
    let count = barycenters.len();
    debug_assert!(corners.len() >= 4 * count);
    debug_assert!(positions.len() >= POINTS_PER_TETRAHEDRON * count);

    for i in 0..count {
        let tet = [
            corners[4 * i],
            corners[4 * i + 1],
            corners[4 * i + 2],
            corners[4 * i + 3],
        ];
        let shrunk = shrink_corners(barycenters[i], &tet, factor);
        let slot = POINTS_PER_TETRAHEDRON * i;
        write_faces(&mut positions[slot..slot + POINTS_PER_TETRAHEDRON], &shrunk);
    }
}

fn shrink_corners(center: [f64; 3], corners: &[[f64; 3]; 4], factor: f64) -> [[f64; 3]; 4] {
    [
        lerp(center, corners[0], factor),
        lerp(center, corners[1], factor),
        lerp(center, corners[2], factor),
        lerp(center, corners[3], factor),
    ]
}

fn write_faces(out: &mut [[f64; 3]], shrunk: &[[f64; 3]; 4]) {
    for (face, triple) in FACE_CORNERS.iter().enumerate() {
        for (slot, corner) in triple.iter().enumerate() {
            out[face * 3 + slot] = shrunk[*corner];
        }
    }
}
