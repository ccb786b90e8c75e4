//! Scenario tests driving the full auth flow with mocked wallet and
//! backend.

mod support;

mod registration;
