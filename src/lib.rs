//! TalentScout - Conversational Hiring Intake Assistant
//!
//! This crate screens job candidates through a guided chat: it collects seven
//! candidate attributes from free text, walks the interview through fixed
//! phases, asks stack-specific technical questions through a chat completion
//! backend, and persists an export plus an anonymised candidate record.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
