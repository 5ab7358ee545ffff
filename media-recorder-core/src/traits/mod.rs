pub mod capture_environment;
pub mod media_recorder;
pub mod media_stream;
pub mod preview_sink;
pub mod session_observer;
