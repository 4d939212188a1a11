//! `panref` is a command line tool written to choose the reference genome of
//! a sheep pangenome graph. Candidate assemblies are scored against five
//! weighted quality criteria and the best one is copied out, together with a
//! metadata document and a full selection report, for downstream graph
//! construction. This package is composed of both a library crate, as well as
//! a binary crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `panref`. The scoring core lives in [`select`]:
//! [`select::extract`] turns upstream documents into candidates,
//! [`select::criteria`] scores them, [`select::rank`] chooses the reference and
//! [`select::report`] writes the results.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod list;
pub mod select;
pub mod utils;
