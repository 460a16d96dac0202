//! Local relational store for synced PMS data

pub mod db;
pub mod entities;
pub mod services;
