//! Anatomy Review - Spaced-repetition scheduling for anatomy flashcards
//!
//! This crate decides when each flashcard is next shown to a learner, using a
//! forgetting-curve memory model, and which cards make up today's study queue.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
