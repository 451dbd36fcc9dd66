//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod components;
pub mod formatting;
pub mod ghost;
pub mod input;
pub mod item;
pub mod movement;
pub mod player;
pub mod profiling;
pub mod render;
pub mod state;
