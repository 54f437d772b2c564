#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod command;
pub mod document;
pub mod geometry;
pub mod id_generator;
pub mod persistence;
pub mod schema;
pub mod shape;

pub use canvas::{Canvas, RecordingCanvas, render_document};
pub use command::{Command, CommandHistory};
pub use document::Document;
pub use persistence::{JsonFileStore, MemoryStore, ShapeRecord, ShapeStore, StoreError};
pub use shape::{Shape, ShapeId, ShapeStyle};
