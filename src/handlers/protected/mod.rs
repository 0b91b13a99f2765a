// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Role gates (moderator / client) are attached per route in app.rs.

pub mod product;
pub mod pvz;
pub mod reception;
