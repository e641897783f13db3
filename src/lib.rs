pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod rating;
pub mod response;
pub mod services;
pub mod state;
pub mod view;
