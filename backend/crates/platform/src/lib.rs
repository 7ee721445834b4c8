//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the feature crates:
//! - Cryptographic utilities (random tokens, SHA-1 request signing)
//! - Password hashing (Argon2id with optional pepper)
//! - Cookie building and extraction
//! - Client header helpers (bearer token, client IP)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
