//! Business services behind the HTTP routes.
//!
//! ## Available Services
//! - [`rental_service`] - Checkout and return as atomic units of work

pub mod rental_service;

pub use rental_service::RentalManager;
