// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! These functions never open a transaction themselves. Callers that need
//! several of them to succeed or fail together wrap them in one.

pub mod items;
pub mod logs;
pub mod staff;
pub mod workers;
