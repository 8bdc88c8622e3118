//! HTTP surface for DineWise
//!
//! JSON endpoints over a shared [`Recommender`](dinewise_engine::Recommender):
//!
//! | Method | Path                          | Purpose                          |
//! |--------|-------------------------------|----------------------------------|
//! | GET    | `/health`                     | liveness                         |
//! | POST   | `/recommendations`            | personalized ranking             |
//! | GET    | `/cuisines`                   | cuisine vocabulary               |
//! | GET    | `/restaurants/{id}/cluster`   | location cluster of a restaurant |
//! | POST   | `/browse`                     | hard-filtered listing by rating  |
//! | GET    | `/stats`                      | model size figures               |
//!
//! Errors are returned as `{"error": "..."}` with 404 for unknown users, 400
//! for invalid parameters and 500 otherwise.

pub mod rest;

pub use rest::RestApi;
