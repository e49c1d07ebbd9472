// SPDX-License-Identifier: MIT

pub mod cli;
pub mod config;
pub mod diff;
pub mod diff_color;
pub mod testing;
pub mod utils;
