// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod load_config;
pub mod schema;
mod submission_config;
mod yaml;

pub use schema::*;
pub use submission_config::*;
