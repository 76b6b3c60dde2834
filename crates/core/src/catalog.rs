//! Piece catalog - the seven fixed templates.
//!
//! Templates are immutable statics. Spawning copies the shape out of the
//! template; nothing ever writes back to it.

use crate::rng::RandomSource;
use crate::shape::Shape;
use crate::types::{Color, PieceKind};

/// An immutable catalog entry: shape matrix plus color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

/// Catalog order: I, O, T, Z, S, J, L.
pub static TEMPLATES: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        shape: Shape::from_rows(&[&[1, 1, 1, 1]]),
        color: Color::Cyan,
    },
    PieceTemplate {
        kind: PieceKind::O,
        shape: Shape::from_rows(&[&[1, 1], &[1, 1]]),
        color: Color::Yellow,
    },
    PieceTemplate {
        kind: PieceKind::T,
        shape: Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        color: Color::Purple,
    },
    PieceTemplate {
        kind: PieceKind::Z,
        shape: Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        color: Color::Red,
    },
    PieceTemplate {
        kind: PieceKind::S,
        shape: Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        color: Color::Green,
    },
    PieceTemplate {
        kind: PieceKind::J,
        shape: Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        color: Color::Blue,
    },
    PieceTemplate {
        kind: PieceKind::L,
        shape: Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        color: Color::Orange,
    },
];

/// Look up the template for a kind.
pub fn template(kind: PieceKind) -> &'static PieceTemplate {
    match kind {
        PieceKind::I => &TEMPLATES[0],
        PieceKind::O => &TEMPLATES[1],
        PieceKind::T => &TEMPLATES[2],
        PieceKind::Z => &TEMPLATES[3],
        PieceKind::S => &TEMPLATES[4],
        PieceKind::J => &TEMPLATES[5],
        PieceKind::L => &TEMPLATES[6],
    }
}

/// Pick a template uniformly at random.
pub fn random_template<R: RandomSource + ?Sized>(rng: &mut R) -> &'static PieceTemplate {
    let idx = rng.next_range(TEMPLATES.len() as u32) as usize;
    &TEMPLATES[idx % TEMPLATES.len()]
}
