// Versioned resume persistence and the user directory.
// All mutations are owner-scoped; version numbers are assigned transactionally.

pub mod handlers;
pub mod resumes;
pub mod users;
