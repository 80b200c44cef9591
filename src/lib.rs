//! Chess position editing: a square-to-piece layout with its notation codec,
//! rights inference from placement, legality checks, puzzle answer grading,
//! a pluggable rules engine port, and timed board feedback.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod castling_right;
pub mod color;
pub mod coord;
pub mod editor;
pub mod feedback;
pub mod fen;
pub mod layout;
pub mod misc;
pub mod piece;
pub mod position;
pub mod preset;
pub mod rights;
pub mod rules;
pub mod solution;
pub mod uci_move;
pub mod validate;
