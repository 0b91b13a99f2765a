// handlers/mod.rs - two tier handler layout
//
// public:    no token required (/dummyLogin, /register, /login, /health)
// protected: bearer token required, some routes further gated by role

pub mod extract;
pub mod protected;
pub mod public;
