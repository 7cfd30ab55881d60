//! Scan physical documents to searchable, compressed PDF files by
//! orchestrating scanimage, tesseract, and Ghostscript.

pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod exec;
pub mod ocr;
pub mod papersize;
pub mod pipeline;
pub mod scan;
