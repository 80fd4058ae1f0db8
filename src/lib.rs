//! Converts JUnit, XUnit (robot framework) and Gherkin test result reports
//! into the ALM Octane `test_result` XML format.

#[macro_use]
extern crate log;

#[macro_use]
extern crate derive_builder;

pub mod configuration;
pub mod converter;
pub mod report;
