//! Data and domain core of Alerta Segura RD: emergency alerts and citizen
//! accounts kept in a relational store, with thin validating services on top.

pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{AppError, ErrorKind};
