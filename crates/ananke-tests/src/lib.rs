//! Test-only crate; see `tests/` for the integration and property suites.
