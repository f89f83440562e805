//! Application services - the business rules of the blog backend.
//!
//! Services speak only to ports, so they run identically against Postgres,
//! the in-memory store, or the fakes used in tests below.

mod accounts;
mod posts;

pub use accounts::AccountService;
pub use posts::PostService;
