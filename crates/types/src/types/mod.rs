// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod boolean;
pub mod int_pow;
pub mod int_unsafe;

pub use boolean::BoolType;
pub use int_pow::{compute_powers, IntPowType, Power, ALLOWED_POWERS};
pub use int_unsafe::IntUnsafeType;
