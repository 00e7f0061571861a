//! Data models for the attendance server

pub mod attendance;
pub mod user;

// Re-export commonly used types
pub use attendance::{AttendanceField, AttendanceRecord, WeekView};
pub use user::{Role, SessionContext, User, UserShort};
