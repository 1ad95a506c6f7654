// MindCare - Mental health support chat with symptom triage
// Library exports

pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod providers; // Optional generative reply collaborators
pub mod server; // HTTP daemon mode
pub mod triage; // Detection, severity and reply selection core
