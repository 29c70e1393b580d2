pub mod bouts;
pub mod credentials;
pub mod outcomes;
pub mod rating;
pub mod registration;
