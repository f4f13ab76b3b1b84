//! # API Route Modules
//!
//! - `users` — sample registration endpoints showing strict decoding
//!   (`/v1/users/check`), strict decoding plus constraint validation
//!   (`/v1/users`), and a non-consuming dry run (`/v1/users/preview`).

pub mod users;
