// src/models/mod.rs
//! Data structures shared by the wallet, the CA client and the workflows.

pub mod connection_profile;
pub mod credential;
pub mod enrollment;
