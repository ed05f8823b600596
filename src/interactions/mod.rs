//! This module acts as a central router for all inline-button callbacks.
//!
//! `handler.rs` delegates here based on the callback id's family (rewards,
//! resources, abyss); each specialized handler funnels into the shared
//! data-command path and returns the reply to edit into the message.

pub mod abyss_handler;
pub mod ids;
pub mod resources_handler;
pub mod rewards_handler;
