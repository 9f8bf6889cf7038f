//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the
//! application shell, following Domain-Driven Design principles for
//! better organization and scalability.

pub mod cache;
pub mod catalog;
pub mod loader;
pub mod pages;
pub mod router;
