//! Swagger route generator - Route handler stubs from a Swagger/OpenAPI document.
//!
//! This library converts the `paths` of an API schema into a generated application with one
//! route module per resource. A resource is a base path together with its
//! path-parameterized children, so `/users` and `/users/{id}` land in the same file while
//! `/users` and `/orders` do not. Every (method, response code, content type) combination
//! declared for a resource becomes one documented handler stub.
//!
//! # Architecture
//!
//! 1. [`parser`] - Loads a JSON or YAML schema into a [`document::Document`]
//! 2. [`naming`] - Derives the application name from the schema title
//! 3. [`classifier`] - Groups declared paths into resources via a path-segment tree
//! 4. [`expander`] - Expands one path's operations into route blocks
//! 5. [`aggregator`] - Packs a resource's blocks into an output unit
//! 6. [`emitter`] - Renders output units and writes them to disk
//! 7. [`scaffold`] - Creates the application skeleton the routes are written into
//! 8. [`generator`] - Runs the whole pipeline
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_routegen::{
//!     aggregator::ResourceAggregator,
//!     emitter::write_unit,
//!     naming::derive_app_name,
//!     parser::SchemaParser,
//!     scaffold::{AppConfig, ProjectScaffolder, SkeletonScaffolder},
//! };
//! use std::path::Path;
//!
//! let out = Path::new("./outpath");
//! let document = SchemaParser::parse_file(Path::new("swagger.json")).unwrap();
//!
//! let name = derive_app_name(document.info.title.as_deref());
//! let config = AppConfig::new(&name, &document.info);
//! SkeletonScaffolder.create_files(&config, out).unwrap();
//!
//! let aggregator = ResourceAggregator::new(out, &name);
//! for unit in aggregator.build_units(&document) {
//!     let path = write_unit(&unit).unwrap();
//!     println!("{}", path.display());
//! }
//! ```
//!
//! Or in one call, with errors logged rather than returned:
//!
//! ```no_run
//! use std::path::Path;
//!
//! swagger_routegen::generator::create_app(Path::new("swagger.json"), Path::new("./outpath"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod document;
pub mod emitter;
pub mod error;
pub mod expander;
pub mod generator;
pub mod naming;
pub mod parser;
pub mod scaffold;
