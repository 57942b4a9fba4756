//! Terminal flashcard quiz for recognising the pinyin of Chinese characters.
//!
//! The quiz core (`bank`, `quiz`) has no terminal dependencies: the binary in
//! `main.rs` renders [`quiz::view::QuizView`] snapshots and feeds key presses
//! back as [`quiz::Action`]s.

pub mod app;
pub mod bank;
pub mod config;
pub mod event;
pub mod logging;
pub mod quiz;
pub mod ui;
