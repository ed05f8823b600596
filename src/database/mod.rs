//! This module acts as a central hub for all database-related logic.
//! It declares the specialized submodules so they can be accessed from
//! elsewhere in the application via their full path, e.g.,
//! `database::users::get_user`.

pub mod init;
pub mod logs;
pub mod users;

pub use init::DbPool;
