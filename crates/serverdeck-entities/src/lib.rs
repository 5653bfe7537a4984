//! Сущности и wire-типы реестра серверов serverdeck.

pub mod ipv4;
pub mod resources;
pub mod servers;
