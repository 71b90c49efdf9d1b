// Sahay - message triage for a student-wellness support chatbot
// Library exports
//
// The triage pipeline receives a raw message and a short rolling history
// and returns a structured decision. Transport, authentication, and
// account persistence are callers' concerns. Classification here is
// keyword/lexicon pattern matching, not a clinical assessment.

pub mod chat; // Response composer and session lifecycle
pub mod config;
pub mod generator; // External text-generation backends
pub mod store; // Append-only conversation record
pub mod triage; // Crisis and emotion classifiers, interventions

pub use chat::{Chatbot, TriageOutcome};
pub use triage::{EmotionCategory, SeverityLevel};
