//! Shared test harness modules for the Wayfinder CLI.

use super::*;

mod command_steps;
mod helpers;
