//! Full and Final Settlement Document Controller
//!
//! This crate drives an employee full-and-final settlement record: it fetches
//! a server-computed payload of payable components, rebuilds the document's
//! payables table, keeps row amounts and the document total consistent, and
//! propagates the resolved currency across every currency-reference field the
//! document schema declares.

#![warn(missing_docs)]

pub mod calculation;
pub mod controller;
pub mod error;
pub mod models;
pub mod remote;
pub mod schema;
pub mod session;
