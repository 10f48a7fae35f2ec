// Internal types shared between coordinators, providers and stores
pub mod auth;
pub mod listing;
pub mod operation;
