//! Kinship Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Kinship layout
//! engine and its consumers. It includes:
//!
//! - **Identifiers**: Interned person identifiers ([`identifier::PersonId`])
//! - **Family**: The person/relationship snapshot model ([`family`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod family;
pub mod geometry;
pub mod identifier;
