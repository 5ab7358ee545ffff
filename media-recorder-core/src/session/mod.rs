pub mod controller;
pub mod negotiator;
pub mod recording_session;
