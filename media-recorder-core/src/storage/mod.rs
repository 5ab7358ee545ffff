pub mod artifact_registry;
