//! Session types shared by Ecclesia services.
//!
//! Provides the server-side session record with its password-reset slots and
//! the cookie builders that carry the session id to the browser.

pub mod cookie;
pub mod session;
