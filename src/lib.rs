//! fairbook - Generate printable golf yardage books from OpenStreetMap data

pub mod api;
pub mod book;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod osm;
pub mod render;
