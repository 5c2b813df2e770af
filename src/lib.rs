//! tweetgen: a terminal front-end for an AI tweet generation service.
//!
//! One view, one button, one request: press generate, the view asks the
//! service at `http://localhost:5000/generate-tweets` for a batch of tweets
//! and renders them as cards.

pub mod app;
pub mod config;
pub mod event;
pub mod feeds;
pub mod ui;
pub mod view;
